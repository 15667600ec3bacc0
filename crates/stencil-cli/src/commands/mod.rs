//! Command handlers and the adapter wiring they share.

use std::path::PathBuf;

use stencil_adapters::{ReqwestClient, local_ports, usage_reporter};
use stencil_core::{VERSION, application::Ports};

use crate::{
    config::AppConfig,
    error::{CliError, CliResult},
};

pub mod clean;
pub mod completions;
pub mod init;
pub mod list;
pub mod new;

/// Production ports built from the loaded configuration.
pub fn build_ports(config: &AppConfig) -> CliResult<Ports> {
    let http = ReqwestClient::from_env(&config.http.user_agent, &config.http.token_env)?;
    let usage = usage_reporter(
        config.telemetry.endpoint.as_deref(),
        &config.http.user_agent,
        VERSION,
    );
    Ok(local_ports(http, usage))
}

pub fn cache_root(config: &AppConfig) -> CliResult<PathBuf> {
    config
        .cache_root()
        .ok_or_else(|| CliError::config("cannot determine the home directory; set cache.dir"))
}
