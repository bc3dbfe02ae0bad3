//! CLI configuration: optional JSON file overlaid by command-line flags.
//!
//! ```json
//! {
//!   "store_id": 1003,
//!   "token": "secret_...",
//!   "http": { "read_timeout_ms": 30000 },
//!   "log": { "level": "info", "components": { "storeapi-core": "debug" } }
//! }
//! ```

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use storeapi_core::client::{ApiConfig, DEFAULT_BASE_URL};
use storeapi_http::HttpTransportConfig;

use crate::logging::LogConfig;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub store_id: Option<u64>,
    pub base_url: Option<String>,
    pub token: Option<String>,
    pub http: HttpTransportConfig,
    pub log: LogConfig,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))
    }
}

/// Values given on the command line; each one wins over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub store_id: Option<u64>,
    pub base_url: Option<String>,
    pub token: Option<String>,
    pub log_level: Option<String>,
    pub json_logs: bool,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub api: ApiConfig,
    pub http: HttpTransportConfig,
    pub log: LogConfig,
}

impl Settings {
    pub fn resolve(file: FileConfig, flags: Overrides) -> Result<Self> {
        let store_id = flags.store_id.or(file.store_id).ok_or_else(|| {
            anyhow!("no store id: pass --store-id or set \"store_id\" in the config file")
        })?;

        let api = ApiConfig {
            base_url: flags
                .base_url
                .or(file.base_url)
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            store_id,
            token: flags.token.or(file.token),
        };

        let mut log = file.log;
        if let Some(level) = flags.log_level {
            log.level = level;
        }
        log.json |= flags.json_logs;

        Ok(Self {
            api,
            http: file.http,
            log,
        })
    }
}
