mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

use crate::reconcile::ReconcileOptions;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./takeoutfix.toml",
        "~/.config/takeoutfix/config.toml",
        "/etc/takeoutfix/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
fn validate_config(config: &Config) -> Result<()> {
    if config.rename.max_attempts == 0 {
        anyhow::bail!("rename.max_attempts must be at least 1");
    }

    if let Some(path) = &config.tools.exiftool {
        if !path.exists() {
            tracing::warn!("Configured exiftool does not exist: {:?}", path);
        }
    }

    Ok(())
}

impl Config {
    /// Options for the reconciler derived from this config.
    pub fn reconcile_options(&self) -> ReconcileOptions {
        ReconcileOptions {
            dry_run: self.rename.dry_run,
            max_attempts: self.rename.max_attempts,
            workers: self.scan.workers,
            follow_links: self.scan.follow_links,
        }
    }
}
