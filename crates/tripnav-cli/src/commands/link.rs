use anyhow::Result;
use tripnav_core::deep_link::DeepLinkParser;

use super::Context;

/// Prints the intent for `uri`, or logs why it was rejected.
///
/// An unsupported link is not a command failure; the client ignores those too.
pub fn parse(ctx: &Context, uri: &str) -> Result<()> {
    let parser = DeepLinkParser::new(ctx.config.deep_link.clone());
    match parser.parse(uri) {
        Ok(intent) => println!("{}", serde_json::to_string_pretty(&intent)?),
        Err(e) => tracing::warn!("Ignoring link: {}", e),
    }
    Ok(())
}
