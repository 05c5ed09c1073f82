use std::path::PathBuf;

/// Default listen address for the HTTP server.
pub const DEFAULT_LISTEN: &str = "0.0.0.0:8000";

/// Default name of the inventory document inside `data_dir`.
pub const DEFAULT_DATA_FILE: &str = "boxes.json";

/// Process-wide settings fixed at startup.
///
/// The binary builds this from its config file, environment and flags,
/// then hands it to the store and the HTTP layer. Nothing reads these
/// values from ambient globals.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Directory holding the inventory document.
    pub data_dir: Option<PathBuf>,

    /// Path to the inventory document.
    /// Defaults to `{data_dir}/boxes.json` if not specified.
    pub data_file: Option<PathBuf>,

    /// Externally reachable base URL, used to build each box's public link.
    /// Only affects URL construction, never stored data.
    pub base_url: String,

    /// Shared PIN for mutating routes. Empty means no gate.
    pub admin_pin: String,

    /// Listen address for the HTTP server.
    pub listen: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            data_file: None,
            base_url: "http://localhost:8000".to_string(),
            admin_pin: String::new(),
            listen: DEFAULT_LISTEN.to_string(),
        }
    }
}

impl ServiceConfig {
    /// Resolve the document path, falling back to `{data_dir}/boxes.json`.
    pub fn resolve_data_file(&self) -> PathBuf {
        self.data_file
            .clone()
            .unwrap_or_else(|| self.resolve_data_subpath(DEFAULT_DATA_FILE))
    }

    /// Base URL without trailing slashes.
    pub fn public_base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Whether mutating routes require a PIN.
    pub fn pin_required(&self) -> bool {
        !self.admin_pin.is_empty()
    }

    fn resolve_data_subpath(&self, name: &str) -> PathBuf {
        self.data_dir
            .as_ref()
            .map(|d| d.join(name))
            .unwrap_or_else(|| PathBuf::from(name))
    }
}
