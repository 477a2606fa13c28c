// ⚙️ Configuration
//
// Layering, lowest to highest precedence:
//   built-in defaults → TOML file → ESTATE_* environment variables → CLI flags
// CLI flags are applied by the server binary.
//
// Environment keys name a section and a field joined by a double
// underscore: ESTATE_SERVER__PORT=8080, ESTATE_CATALOG__SEED_SAMPLE_DATA=false.

use crate::error::ConfigError;
use ::config::builder::DefaultState;
use ::config::{Config, ConfigBuilder, Environment, File, FileFormat, Map};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const ENV_PREFIX: &str = "ESTATE";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub catalog: CatalogSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Path every API route is nested under
    pub api_prefix: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        ServerSettings {
            host: "0.0.0.0".to_string(),
            port: 3000,
            api_prefix: "/api".to_string(),
        }
    }
}

impl ServerSettings {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// Load the sample listings and articles at start-up
    pub seed_sample_data: bool,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        CatalogSettings {
            seed_sample_data: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// `EnvFilter` directive; `RUST_LOG` takes precedence
    pub filter: String,
    pub json: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        LogSettings {
            filter: "estate_catalog=info,estate_server=info,tower_http=info".to_string(),
            json: false,
        }
    }
}

impl Settings {
    /// Defaults, overlaid with `path` (if any) and the process environment
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Self::defaults()?;
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml));
        }
        Self::build(builder.add_source(environment()))
    }

    /// Same layering as [`Settings::load`], from in-memory TOML and an
    /// explicit variable map instead of a file and the process environment
    pub fn from_sources(toml: &str, vars: Map<String, String>) -> Result<Self, ConfigError> {
        let builder = Self::defaults()?
            .add_source(File::from_str(toml, FileFormat::Toml))
            .add_source(environment().source(Some(vars)));
        Self::build(builder)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let defaults = Settings::default();
        let builder = Config::builder()
            .set_default("server.host", defaults.server.host)?
            .set_default("server.port", i64::from(defaults.server.port))?
            .set_default("server.api_prefix", defaults.server.api_prefix)?
            .set_default("catalog.seed_sample_data", defaults.catalog.seed_sample_data)?
            .set_default("log.filter", defaults.log.filter)?
            .set_default("log.json", defaults.log.json)?;
        Ok(builder)
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "server.host".to_string(),
                value: self.server.host.clone(),
                reason: "host cannot be empty".to_string(),
            });
        }

        let prefix = &self.server.api_prefix;
        if !prefix.starts_with('/') || (prefix.len() > 1 && prefix.ends_with('/')) {
            return Err(ConfigError::InvalidValue {
                field: "server.api_prefix".to_string(),
                value: prefix.clone(),
                reason: "must start with '/' and not end with '/'".to_string(),
            });
        }

        Ok(())
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
