//! Configuration System
//!
//! Layered configuration for the merge CLI. Precedence, lowest to highest:
//! built-in defaults, an optional TOML file, `UNIBIN_*` environment
//! variables, then CLI flags (applied by the caller).

use crate::error::CliError;
use crate::fuse::DEFAULT_FUSE_TOOL;
use crate::logging::LoggingConfig;
use config::{Config, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnibinConfig {
    /// External fuse tool settings
    #[serde(default)]
    pub fuse: FuseConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// External fuse tool configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuseConfig {
    /// Executable invoked as `<tool> -create -output <dst> <a> <b>`
    #[serde(default = "default_fuse_tool")]
    pub tool: String,
}

fn default_fuse_tool() -> String {
    DEFAULT_FUSE_TOOL.to_string()
}

impl Default for FuseConfig {
    fn default() -> Self {
        Self {
            tool: default_fuse_tool(),
        }
    }
}

impl UnibinConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.fuse.tool.trim().is_empty() {
            return Err("Fuse tool cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration, optionally layering a specific TOML file over the
    /// defaults, then applying environment overrides.
    pub fn load(config_path: Option<&Path>) -> Result<UnibinConfig, CliError> {
        let mut builder = Config::builder().set_default("fuse.tool", DEFAULT_FUSE_TOOL)?;

        if let Some(path) = config_path {
            let path_str = path.to_str().ok_or_else(|| {
                CliError::Config(format!("Config path {:?} is not valid UTF-8", path))
            })?;
            builder = builder.add_source(File::with_name(path_str).required(true));
        }

        let mut config: UnibinConfig = builder.build()?.try_deserialize()?;

        // Environment overrides
        if let Ok(tool) = std::env::var("UNIBIN_FUSE_TOOL") {
            if !tool.is_empty() {
                config.fuse.tool = tool;
            }
        }

        config.validate().map_err(CliError::Config)?;
        Ok(config)
    }
}
