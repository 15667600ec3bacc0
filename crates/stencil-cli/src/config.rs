//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only receives the sources and
//! post-install rules it needs.
//!
//! # Resolution order (highest priority first)
//!
//! 1. `STENCIL_*` environment variables (`__` separates nested keys,
//!    e.g. `STENCIL_CACHE__DIR`)
//! 2. Config file: `--config <FILE>`, else `./stencil.config.json`, else
//!    `config.json` in the platform config directory
//! 3. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use stencil_adapters::{DEFAULT_TOKEN_ENV, DEFAULT_USER_AGENT};
use stencil_core::domain::{PostInstallRule, TemplateSource};

/// File name looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "stencil.config.json";

const ENV_PREFIX: &str = "STENCIL";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Registries searched for bare template names, in order.
    #[serde(default = "default_sources")]
    pub sources: Vec<TemplateSource>,
    /// Commands run after a project is created.
    #[serde(default = "default_postinstall")]
    pub postinstall: Vec<PostInstallRule>,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Overrides `~/.stencil/cache`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Environment variable holding a GitHub token.
    #[serde(default = "default_token_env")]
    pub token_env: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Usage ping endpoint. No ping is sent when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub no_color: bool,
}

fn default_sources() -> Vec<TemplateSource> {
    vec![
        TemplateSource::new(
            ".NET Core C# Templates",
            "https://api.github.com/orgs/NetCoreTemplates/repos",
        ),
        TemplateSource::new(
            ".NET Framework C# Templates",
            "https://api.github.com/orgs/NetFrameworkTemplates/repos",
        ),
        TemplateSource::new(
            ".NET Framework ASP.NET Core C# Templates",
            "https://api.github.com/orgs/NetFrameworkCoreTemplates/repos",
        ),
    ]
}

fn default_postinstall() -> Vec<PostInstallRule> {
    vec![
        PostInstallRule::new("MyApp/package.json", Some("cd \"MyApp\" && npm install")),
        PostInstallRule::new("MyApp.sln", Some("nuget restore")),
    ]
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_token_env() -> String {
    DEFAULT_TOKEN_ENV.to_string()
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            token_env: default_token_env(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sources: default_sources(),
            postinstall: default_postinstall(),
            cache: CacheConfig::default(),
            http: HttpConfig::default(),
            telemetry: TelemetryConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the first config file found plus the
    /// environment.
    ///
    /// An explicit `config_file` must exist; the implicit locations are
    /// optional.
    pub fn load(config_file: Option<&Path>) -> anyhow::Result<Self> {
        let file = match config_file {
            Some(path) => {
                if !path.is_file() {
                    bail!("config file not found: {}", path.display());
                }
                Some(path.to_path_buf())
            }
            None => Self::discover(),
        };

        let mut builder = Config::builder();
        if let Some(path) = &file {
            tracing::debug!(path = %path.display(), "Loading config file");
            builder = builder.add_source(File::from(path.as_path()).format(FileFormat::Json));
        }
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .context("failed to read configuration")?
            .try_deserialize()
            .with_context(|| match &file {
                Some(path) => format!("malformed configuration in {}", path.display()),
                None => "malformed configuration in environment".to_string(),
            })?;
        Ok(config)
    }

    /// First existing implicit config file.
    fn discover() -> Option<PathBuf> {
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.is_file() {
            return Some(local);
        }
        Self::config_path().filter(|p| p.is_file())
    }

    /// Path to the user-level configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness.
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "stencil", "stencil")
            .map(|d| d.config_dir().join("config.json"))
    }

    /// Directory holding downloaded archives.
    pub fn cache_root(&self) -> Option<PathBuf> {
        match &self.cache.dir {
            Some(dir) => Some(dir.clone()),
            None => dirs::home_dir().map(|home| home.join(".stencil").join("cache")),
        }
    }
}
