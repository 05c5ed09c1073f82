//! Startup checks and the startup banner.

use qrbox_core::ServiceConfig;
use tracing::info;

use crate::config::ServerConfig;

/// Refuse to start with a configuration that cannot work.
pub fn verify_config(config: &ServerConfig) -> anyhow::Result<()> {
    let base_url = config.base_url();
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        anyhow::bail!(
            "base_url must start with http:// or https:// (got '{}').\n\
             Printed codes would not open in a phone browser.",
            base_url
        );
    }
    if config.storage.data_dir.trim().is_empty() {
        anyhow::bail!("Storage data_dir is empty in configuration.");
    }
    Ok(())
}

/// Log where the server listens and what printed codes will point at.
pub fn log_banner(config: &ServiceConfig) {
    info!("qrboxd {} starting", env!("CARGO_PKG_VERSION"));
    info!("  listen:    {}", config.listen);
    info!("  base url:  {}", config.public_base());
    info!(
        "  admin pin: {}",
        if config.pin_required() { "required" } else { "not set" }
    );
    info!("  data file: {}", config.resolve_data_file().display());
}
