use anyhow::{Result, bail};
use tripnav_core::asset::storage_id_from_url;

use super::Context;

pub fn storage_id(ctx: &Context, url: &str) -> Result<()> {
    let marker = &ctx.config.assets.upload_marker;
    let Some(id) = storage_id_from_url(url, marker) else {
        bail!("No storage id found in {} (expected '{}' in the path)", url, marker);
    };
    println!("{}", id);
    Ok(())
}
