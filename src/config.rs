use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} value {value:?} is invalid: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub geocoder_url: String,
    pub geocoder_user_agent: String,
    pub geocoder_timeout: Duration,
    pub display_place: String,
    pub static_dir: PathBuf,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            geocoder_url: "https://nominatim.openstreetmap.org".to_string(),
            geocoder_user_agent: "FareCalculator/0.1".to_string(),
            geocoder_timeout: Duration::from_secs(5),
            display_place: "Davao City".to_string(),
            static_dir: PathBuf::from("static"),
        }
    }
}

impl ServiceConfig {
    pub fn init() -> Result<ServiceConfig, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<ServiceConfig, ConfigError> {
        let defaults = ServiceConfig::default();

        let port = match lookup("PORT") {
            Some(value) => parse("PORT", value)?,
            None => defaults.port,
        };
        let geocoder_timeout = match lookup("GEOCODER_TIMEOUT_SECS") {
            Some(value) => Duration::from_secs(parse("GEOCODER_TIMEOUT_SECS", value)?),
            None => defaults.geocoder_timeout,
        };

        Ok(ServiceConfig {
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
            geocoder_url: lookup("GEOCODER_URL").unwrap_or(defaults.geocoder_url),
            geocoder_user_agent: lookup("GEOCODER_USER_AGENT").unwrap_or(defaults.geocoder_user_agent),
            geocoder_timeout,
            display_place: lookup("DISPLAY_PLACE").unwrap_or(defaults.display_place),
            static_dir: lookup("STATIC_DIR").map(PathBuf::from).unwrap_or(defaults.static_dir),
        })
    }

    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse().map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
            name: "HOST",
            value: self.host.clone(),
            reason: e.to_string(),
        })
    }
}

fn parse<T>(name: &'static str, value: String) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        name,
        reason: e.to_string(),
        value,
    })
}
