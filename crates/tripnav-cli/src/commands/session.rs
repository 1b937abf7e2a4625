use anyhow::{Context as _, Result};
use std::sync::Arc;
use tripnav_application::SessionStore;
use tripnav_core::session::SignIn;
use tripnav_infrastructure::TomlPreferenceStore;

use super::Context;

pub struct SignInArgs {
    pub token: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
}

fn open_store(ctx: &Context) -> SessionStore {
    SessionStore::new(Arc::new(TomlPreferenceStore::new(ctx.session_path.clone())))
}

pub async fn show(ctx: &Context) -> Result<()> {
    let store = open_store(ctx);
    let session = store.restore().await;

    println!("{}", serde_json::to_string_pretty(&session)?);
    println!("Signed in as: {}", session.display_name());
    Ok(())
}

pub async fn sign_in(ctx: &Context, args: SignInArgs) -> Result<()> {
    let form = SignIn {
        token: args.token,
        first_name: args.first_name,
        last_name: args.last_name,
        username: args.username,
        email: args.email,
    };

    let session = open_store(ctx)
        .sign_in(form)
        .await
        .with_context(|| format!("Failed to write {}", ctx.session_path.display()))?;

    println!("✓ Signed in as {}", session.display_name());
    Ok(())
}

pub async fn sign_out(ctx: &Context) -> Result<()> {
    open_store(ctx)
        .sign_out()
        .await
        .with_context(|| format!("Failed to write {}", ctx.session_path.display()))?;

    println!("✓ Signed out");
    Ok(())
}
