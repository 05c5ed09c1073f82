//! `qrboxd`: the QR box inventory server.
//!
//! Usage:
//!   qrboxd [-c <config.toml>] [--port <port>] [--base-url <url>] [--admin-pin <pin>]
//!
//! Every flag can also come from the environment (`PORT`, `BASE_URL`,
//! `ADMIN_PIN`, ...), including a `.env` file in the working directory.

mod bootstrap;
mod config;
mod routes;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use inventory::store::{FileInventory, InventoryStore};
use inventory::InventoryModule;
use qrbox_core::{AllowAll, Authenticator, Module, PinGate};
use tracing::info;

use config::{Overrides, ServerConfig};

/// QR box inventory server.
#[derive(Parser, Debug)]
#[command(name = "qrboxd", version, about = "QR-labelled storage box inventory")]
struct Cli {
    /// Path to a TOML config file.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Listen address, e.g. 127.0.0.1:8000.
    #[arg(long, env = "LISTEN")]
    listen: Option<String>,

    /// Port to bind on all interfaces (ignored when --listen is set).
    #[arg(long, env = "PORT")]
    port: Option<u16>,

    /// Public base URL printed into QR codes, e.g. http://192.168.1.20:8000.
    #[arg(long, env = "BASE_URL")]
    base_url: Option<String>,

    /// Shared PIN required for edits. Empty or unset disables it.
    #[arg(long, env = "ADMIN_PIN", hide_env_values = true)]
    admin_pin: Option<String>,

    /// Directory holding boxes.json.
    #[arg(long, env = "DATA_DIR")]
    data_dir: Option<PathBuf>,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            listen: self.listen.clone(),
            port: self.port,
            base_url: self.base_url.clone(),
            admin_pin: self.admin_pin.clone(),
            data_dir: self.data_dir.as_ref().map(|d| d.display().to_string()),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is normal.
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    if let Ok(path) = &dotenv {
        info!("Loaded environment from {}", path.display());
    }

    let cli = Cli::parse();

    let mut server_config = match &cli.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            ServerConfig::load(path)?
        }
        None => ServerConfig::default(),
    };
    server_config.apply(cli.overrides());

    bootstrap::verify_config(&server_config)?;

    let core_config = server_config.service_config();
    bootstrap::log_banner(&core_config);

    let store: Arc<dyn InventoryStore> = Arc::new(
        FileInventory::open(&core_config.resolve_data_file())
            .map_err(|e| anyhow::anyhow!("failed to open inventory: {}", e))?,
    );

    // Surface a corrupt document at startup; requests keep failing until it is fixed.
    match store.list_boxes() {
        Ok(boxes) => info!("Inventory loaded: {} boxes", boxes.len()),
        Err(e) => tracing::error!("Inventory document is unreadable: {}", e),
    }

    let authenticator: Arc<dyn Authenticator> = if core_config.pin_required() {
        Arc::new(PinGate::new(core_config.admin_pin.clone()))
    } else {
        Arc::new(AllowAll)
    };

    let inventory_module = InventoryModule::new(store, authenticator, core_config.public_base());
    info!("Inventory module initialized");

    let module_routes = vec![(inventory_module.name(), inventory_module.routes())];
    let app = routes::build_router(module_routes);

    let listener = tokio::net::TcpListener::bind(&core_config.listen).await?;
    info!("QR box server listening on {}", core_config.listen);
    axum::serve(listener, app).await?;

    Ok(())
}
