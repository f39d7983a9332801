use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};

use densela::{DispatchConfig, Strategy};

/// Load a dispatch configuration from a JSON file.
pub fn load_dispatch_config<P: AsRef<Path>>(path: P) -> Result<DispatchConfig> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config: {}", path.as_ref().display()))?;
    let config: DispatchConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.as_ref().display()))?;
    Ok(config)
}

/// Resolve the effective configuration: the file when given, otherwise the
/// defaults, with `strategy` taking precedence over either.
pub fn resolve_dispatch_config<P: AsRef<Path>>(
    config_path: Option<P>,
    strategy: Option<&str>,
) -> Result<DispatchConfig> {
    let mut config = match config_path {
        Some(path) => load_dispatch_config(path)?,
        None => DispatchConfig::default(),
    };
    if let Some(name) = strategy {
        config.strategy = Strategy::from_str(name).map_err(anyhow::Error::msg)?;
    }
    Ok(config)
}
