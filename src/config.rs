use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use parkreach_core::AnalysisConfig;

/// Reads an analysis configuration from a TOML file.
///
/// Relative input paths are resolved against the directory holding the
/// configuration file, so a config can travel together with its data.
pub fn load_config(path: &Path) -> Result<AnalysisConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let mut config = parse_config(&text)
        .with_context(|| format!("Invalid config file {}", path.display()))?;

    if let Some(base) = path.parent() {
        resolve_relative(&mut config, base);
    }
    Ok(config)
}

fn parse_config(text: &str) -> Result<AnalysisConfig> {
    Ok(toml::from_str(text)?)
}

fn resolve_relative(config: &mut AnalysisConfig, base: &Path) {
    for path in [
        &mut config.nodes_path,
        &mut config.edges_path,
        &mut config.buildings_path,
        &mut config.parks_path,
    ] {
        if path.is_relative() {
            *path = join(base, path);
        }
    }
    if let Some(path) = config.boundary_path.as_mut().filter(|p| p.is_relative()) {
        *path = join(base, path);
    }
}

fn join(base: &Path, path: &Path) -> PathBuf {
    if base.as_os_str().is_empty() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
