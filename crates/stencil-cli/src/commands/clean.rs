//! `stencil clean`: remove every cached archive.

use stencil_core::application::DownloadCache;

use crate::{commands, config::AppConfig, error::CliResult, output::OutputManager};

pub fn execute(config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let root = commands::cache_root(config)?;
    let ports = commands::build_ports(config)?;
    let cache = DownloadCache::new(&root, ports.http, ports.filesystem);

    if cache.clean()? {
        output.success(&format!("Cleared package cache: {}", root.display()))?;
    } else {
        output.info(&format!("Cache is already empty: {}", root.display()))?;
    }
    Ok(())
}
