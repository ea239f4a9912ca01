use serde::{Deserialize, Serialize};

use std::{
    env, fs,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::Path,
};

/// The server only ever listens on the loopback interface.
pub const HOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        source: serde_yaml::Error,
    },

    #[error("Failed to parse {name}: {value:?} is not a valid port")]
    InvalidPort { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self { port: DEFAULT_PORT }
    }
}

impl Config {
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(HOST, self.port)
    }

    /// Applies environment overrides. `lookup` resolves a variable name to its value.
    fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(value) = lookup("PORT") {
            self.port = value
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort { name: "PORT", value })?;
        }

        Ok(self)
    }
}

fn read_file(path: &str) -> Result<Config, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_string(),
        source,
    })?;

    serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_string(),
        source,
    })
}

fn load_with(lookup: impl Fn(&str) -> Option<String>) -> Result<Config, ConfigError> {
    let config_path = lookup("NOTEPAD_CONFIG").unwrap_or_else(|| "config.yaml".to_string());

    let config = if Path::new(&config_path).exists() {
        read_file(&config_path)?
    } else if Path::new("config.yaml").exists() {
        tracing::warn!(
            "Config file '{}' not found, falling back to 'config.yaml'",
            config_path
        );
        read_file("config.yaml")?
    } else {
        tracing::info!("No config file found, using defaults and environment variables");
        Config::default()
    };

    config.with_overrides(lookup)
}

/// Loads the file named by `NOTEPAD_CONFIG` (or `config.yaml`), then applies
/// the `PORT` override. Missing files fall back to defaults.
pub fn load_config() -> Result<Config, ConfigError> {
    load_with(|name| env::var(name).ok())
}
