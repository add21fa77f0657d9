use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::rename::DEFAULT_MAX_ATTEMPTS;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub tools: ToolsConfig,

    #[serde(default)]
    pub rename: RenameConfig,

    #[serde(default)]
    pub scan: ScanConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ToolsConfig {
    /// Explicit exiftool executable. Falls back to `EXIFTOOL_PATH`, then `PATH`.
    #[serde(default)]
    pub exiftool: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RenameConfig {
    /// Suffixed names to try when the corrected name is taken
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,

    /// Report planned renames without touching any file
    #[serde(default)]
    pub dry_run: bool,
}

fn default_max_attempts() -> usize {
    DEFAULT_MAX_ATTEMPTS
}

impl Default for RenameConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            dry_run: false,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ScanConfig {
    /// Worker threads for reconciling files (0 = one per CPU)
    #[serde(default)]
    pub workers: usize,

    /// Follow symbolic links while walking
    #[serde(default)]
    pub follow_links: bool,
}
