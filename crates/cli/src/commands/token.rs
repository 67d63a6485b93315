//! Bearer token commands.

use std::io::Write;

use blanja_storefront::config::StorefrontConfig;
use blanja_storefront::Result;
use secrecy::SecretString;

/// Persist a token for later commands.
pub fn set(
    config: &StorefrontConfig,
    token: String,
    out: &mut impl Write,
) -> Result<()> {
    let store = config.token_store();
    store.store(&SecretString::from(token))?;
    tracing::info!(path = %store.path().display(), "Token stored");

    if config.token.is_some() {
        writeln!(out, "Token stored, but BLANJA_TOKEN is set and takes precedence.")?;
    } else {
        writeln!(out, "Token stored.")?;
    }
    Ok(())
}

/// Forget the stored token.
pub fn clear(config: &StorefrontConfig, out: &mut impl Write) -> Result<()> {
    let store = config.token_store();
    store.clear()?;
    tracing::info!(path = %store.path().display(), "Token cleared");
    writeln!(out, "Token cleared.")?;
    Ok(())
}
