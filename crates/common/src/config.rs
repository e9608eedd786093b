use std::{net::SocketAddr, path::PathBuf};

use byte_unit::n_kib_bytes;
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;

#[cfg(feature = "logging")]
use tracing_subscriber::filter::LevelFilter;

/// Database configuration.
#[derive(Deserialize)]
pub struct Database {
    /// Database URL string.
    pub url: String,
}

/// HTTP server configuration.
#[derive(Deserialize)]
pub struct Server {
    /// Address, that HTTP server will listen on.
    pub address: SocketAddr,
}

/// Implementation of [`serde`]'s deserializer for [`FromStr`] types.
#[cfg(feature = "logging")]
fn deserialize_from_str<'de, T, D>(deserializer: D) -> Result<T, D::Error>
where
    T: std::str::FromStr,
    T::Err: std::error::Error,
    D: serde::de::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    std::str::FromStr::from_str(&s).map_err(serde::de::Error::custom)
}

/// Logging configuration.
#[cfg(feature = "logging")]
#[derive(Deserialize)]
pub struct Logging {
    /// Log level.
    #[serde(deserialize_with = "deserialize_from_str")]
    pub level: LevelFilter,
}

#[cfg(feature = "logging")]
impl Default for Logging {
    fn default() -> Self {
        Self {
            level: LevelFilter::WARN,
        }
    }
}

/// Student avatar storage configuration.
#[derive(Deserialize)]
pub struct Storage {
    /// Directory in which avatar files are stored, one file per student.
    pub avatars_path: PathBuf,

    /// Max avatar file size, in bytes.
    #[serde(default = "default_avatar_size_limit")]
    pub avatar_size_limit: usize,
}

fn default_avatar_size_limit() -> usize {
    n_kib_bytes!(300) as usize
}

/// General configuration.
#[derive(Deserialize)]
pub struct Config {
    /// General database configuration.
    pub database: Database,

    /// HTTP server configuration.
    #[serde(default)]
    pub server: Option<Server>,

    /// Logging configuration.
    #[cfg(feature = "logging")]
    #[serde(default)]
    pub logging: Logging,

    /// Avatar storage configuration.
    pub storage: Storage,
}

impl Config {
    /// Create new config using default configuration file or environment variables.
    ///
    /// See [`Env`] for more details on how to use environment variables configuration.
    ///
    /// [`Env`]: figment::providers::Env
    pub fn new(path: Option<PathBuf>) -> Result<Self, figment::Error> {
        Self::from_figment(
            Figment::new()
                .merge(Toml::file(path.unwrap_or(PathBuf::from("Config.toml"))))
                .merge(Env::prefixed("CONFIG_").split("_")),
        )
    }

    fn from_figment(figment: Figment) -> Result<Self, figment::Error> {
        figment.extract()
    }

    /// Port the HTTP server is configured to listen on, if any.
    pub fn server_port(&self) -> Option<u16> {
        self.server.as_ref().map(|server| server.address.port())
    }

    /// Create new config suitable for running unit tests.
    #[cfg(feature = "test-utils")]
    pub fn for_tests() -> Self {
        Self {
            database: Database {
                url: String::from("sqlite::memory:"),
            },
            server: Some(Server {
                address: "127.0.0.1:3000".parse().unwrap(),
            }),
            #[cfg(feature = "logging")]
            logging: Logging::default(),
            storage: Storage {
                avatars_path: std::env::temp_dir().join("school-avatars"),
                avatar_size_limit: default_avatar_size_limit(),
            },
        }
    }
}
