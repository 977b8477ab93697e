//! Engine Configuration
//!
//! Tunables for the generation engine, loaded from TOML.
//!
//! ## Loading Order
//!
//! 1. `GRIDSIM_CONFIG` environment variable (path to a TOML file)
//! 2. `gridsim.toml` in the current working directory
//! 3. Built-in defaults
//!
//! A missing file is not an error — defaults apply. A file that exists
//! but does not parse is logged and ignored rather than silently
//! half-applied.

use serde::Deserialize;
use std::path::Path;
use tracing::{info, warn};

/// Tunables for a generation run. Cloned into each member task.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Upper bound on concurrently running channel-generation tasks.
    /// Defaults to the host's available parallelism.
    pub max_concurrent_tasks: Option<usize>,
}

impl EngineConfig {
    /// Resolve the loading order and return a usable config.
    #[must_use]
    pub fn load() -> Self {
        if let Ok(path) = std::env::var("GRIDSIM_CONFIG") {
            if let Some(config) = Self::from_file(Path::new(&path)) {
                info!(path = %path, "Loaded engine config from GRIDSIM_CONFIG");
                return config;
            }
            warn!(path = %path, "GRIDSIM_CONFIG set but unreadable — falling back");
        }

        let cwd_path = Path::new("gridsim.toml");
        if cwd_path.exists() {
            if let Some(config) = Self::from_file(cwd_path) {
                info!("Loaded engine config from ./gridsim.toml");
                return config;
            }
        }

        Self::default()
    }

    /// Parse a TOML config file; `None` when missing or malformed.
    #[must_use]
    pub fn from_file(path: &Path) -> Option<Self> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Cannot read config file");
                return None;
            }
        };
        match toml::from_str(&raw) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Cannot parse config file");
                None
            }
        }
    }

    /// Permit count for the channel-task admission gate.
    #[must_use]
    pub fn worker_permits(&self) -> usize {
        self.max_concurrent_tasks
            .filter(|n| *n > 0)
            .unwrap_or_else(|| {
                std::thread::available_parallelism().map_or(4, std::num::NonZeroUsize::get)
            })
    }
}
