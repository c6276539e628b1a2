//! Architecture-fusing capability
//!
//! The merge core never parses binary formats; combining two
//! single-architecture files into one universal binary is delegated through
//! the `Fuser` trait. Production uses `lipo` (or a configured equivalent);
//! tests substitute deterministic stubs.

use crate::error::FuseError;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Tool used when none is configured.
pub const DEFAULT_FUSE_TOOL: &str = "lipo";

/// Combines two single-architecture files into one universal output.
pub trait Fuser {
    fn fuse(&self, output: &Path, input_a: &Path, input_b: &Path) -> Result<(), FuseError>;
}

/// `Fuser` backed by an external lipo-style executable, invoked as
/// `<tool> -create -output <dst> <a> <b>`.
///
/// The invocation blocks until the tool exits; no timeout is applied.
#[derive(Debug, Clone)]
pub struct LipoFuser {
    tool: String,
}

impl LipoFuser {
    pub fn new(tool: impl Into<String>) -> Self {
        Self { tool: tool.into() }
    }

    pub fn tool(&self) -> &str {
        &self.tool
    }
}

impl Default for LipoFuser {
    fn default() -> Self {
        Self::new(DEFAULT_FUSE_TOOL)
    }
}

impl Fuser for LipoFuser {
    fn fuse(&self, output: &Path, input_a: &Path, input_b: &Path) -> Result<(), FuseError> {
        debug!(
            tool = %self.tool,
            output = %output.display(),
            input_a = %input_a.display(),
            input_b = %input_b.display(),
            "invoking fuse tool"
        );

        let result = Command::new(&self.tool)
            .arg("-create")
            .arg("-output")
            .arg(output)
            .arg(input_a)
            .arg(input_b)
            .output()
            .map_err(|e| FuseError::Launch {
                tool: self.tool.clone(),
                source: e,
            })?;

        if !result.status.success() {
            return Err(FuseError::Failed {
                tool: self.tool.clone(),
                code: result.status.code(),
                stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
            });
        }

        Ok(())
    }
}
