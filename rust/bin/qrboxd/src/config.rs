//! Server configuration.
//!
//! Optional TOML file, then environment/flag overrides on top:
//!
//! ```toml
//! [server]
//! listen = "0.0.0.0:8000"
//!
//! [site]
//! base_url = "http://192.168.1.20:8000"
//! admin_pin = "1234"
//!
//! [storage]
//! data_dir = "data"
//! data_file = "boxes.json"
//! ```

use std::path::{Path, PathBuf};

use qrbox_core::config::{DEFAULT_DATA_FILE, DEFAULT_LISTEN};
use qrbox_core::ServiceConfig;
use serde::Deserialize;

/// Directory for the inventory document when none is configured.
pub const DEFAULT_DATA_DIR: &str = "data";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub server: ListenConfig,
    pub site: SiteConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ListenConfig {
    /// Bind address. Empty means the built-in default.
    pub listen: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Public base URL for printed codes. Empty means
    /// `http://localhost:<port>`.
    pub base_url: String,
    /// Shared admin PIN. Empty disables the gate.
    pub admin_pin: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: String,
    pub data_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: DEFAULT_DATA_DIR.to_string(),
            data_file: DEFAULT_DATA_FILE.to_string(),
        }
    }
}

/// Values taken from flags or the environment. `None` keeps the file value.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub listen: Option<String>,
    pub port: Option<u16>,
    pub base_url: Option<String>,
    pub admin_pin: Option<String>,
    pub data_dir: Option<String>,
}

impl ServerConfig {
    /// Load from a TOML file. A named file that does not exist is an error.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("cannot read config {}: {}", path.display(), e))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply flag/env overrides. `--listen` beats `--port`; `--port` alone
    /// binds all interfaces on that port.
    pub fn apply(&mut self, overrides: Overrides) {
        if let Some(listen) = overrides.listen {
            self.server.listen = listen;
        } else if let Some(port) = overrides.port {
            self.server.listen = format!("0.0.0.0:{port}");
        }
        if let Some(base_url) = overrides.base_url {
            self.site.base_url = base_url;
        }
        if let Some(pin) = overrides.admin_pin {
            self.site.admin_pin = pin;
        }
        if let Some(dir) = overrides.data_dir {
            self.storage.data_dir = dir;
        }
    }

    pub fn listen(&self) -> &str {
        let listen = self.server.listen.trim();
        if listen.is_empty() {
            DEFAULT_LISTEN
        } else {
            listen
        }
    }

    /// Port part of the listen address, for the default base URL.
    fn port(&self) -> &str {
        self.listen().rsplit(':').next().unwrap_or("8000")
    }

    pub fn base_url(&self) -> String {
        let base = self.site.base_url.trim();
        if base.is_empty() {
            format!("http://localhost:{}", self.port())
        } else {
            base.trim_end_matches('/').to_string()
        }
    }

    /// Runtime settings handed to the stores and routers.
    pub fn service_config(&self) -> ServiceConfig {
        let data_dir = PathBuf::from(self.storage.data_dir.trim());
        let data_file = match self.storage.data_file.trim() {
            "" => None,
            file => Some(data_dir.join(file)),
        };
        ServiceConfig {
            data_dir: Some(data_dir),
            data_file,
            base_url: self.base_url(),
            admin_pin: self.site.admin_pin.clone(),
            listen: self.listen().to_string(),
        }
    }
}
