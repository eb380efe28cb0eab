//! Process settings read from the environment.

use std::collections::HashMap;
use std::path::PathBuf;

use chrono_tz::Tz;

use crate::error::{EngineError, EngineResult};

/// Default IANA time zone for business-hours advisories.
pub const DEFAULT_TIMEZONE: &str = "America/Santiago";

/// Default host for the distance matrix API.
pub const DEFAULT_MAPS_API_BASE: &str = "maps.googleapis.com";

/// Credentials and sender for the transactional email API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailSettings {
    /// Endpoint that accepts `{from, to, subject, text}` JSON.
    pub api_url: String,
    /// Bearer key for the endpoint.
    pub api_key: String,
    /// Sender address.
    pub from: String,
}

/// Settings for the HTTP service.
///
/// Read once at start-up by [`ServiceSettings::from_env`]. Unset variables
/// take the defaults listed on each field.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceSettings {
    /// Bind host (`HOST`, default `0.0.0.0`).
    pub host: String,
    /// Bind port (`PORT`, default `3000`).
    pub port: u16,
    /// Tariff file (`TARIFF_FILE`, default `tariff.yaml`).
    pub tariff_file: PathBuf,
    /// Directory served for non-API paths (`STATIC_DIR`, default `public`).
    pub static_dir: PathBuf,
    /// Business time zone (`BUSINESS_TIMEZONE`).
    pub timezone: Tz,
    /// Distance matrix key (`GOOGLE_MAPS_API_KEY`).
    pub maps_api_key: Option<String>,
    /// Distance matrix host (`GOOGLE_MAPS_API_BASE`).
    pub maps_api_base: String,
    /// Token required on admin routes (`ADMIN_TOKEN`); admin is open when unset.
    pub admin_token: Option<String>,
    /// Email API (`EMAIL_API_URL`, `EMAIL_API_KEY`, `EMAIL_FROM`); all three
    /// must be set, otherwise quotes are only logged.
    pub email: Option<EmailSettings>,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            tariff_file: PathBuf::from("tariff.yaml"),
            static_dir: PathBuf::from("public"),
            timezone: chrono_tz::America::Santiago,
            maps_api_key: None,
            maps_api_base: DEFAULT_MAPS_API_BASE.to_string(),
            admin_token: None,
            email: None,
        }
    }
}

impl ServiceSettings {
    /// Loads settings from the process environment, after reading `.env`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidSetting`] when `PORT` or
    /// `BUSINESS_TIMEZONE` cannot be parsed.
    pub fn from_env() -> EngineResult<Self> {
        let _ = dotenvy::dotenv();
        Self::from_vars(std::env::vars().collect())
    }

    /// Builds settings from an explicit variable map.
    pub fn from_vars(vars: HashMap<String, String>) -> EngineResult<Self> {
        let get = |name: &str| {
            vars.get(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut settings = Self::default();

        if let Some(host) = get("HOST") {
            settings.host = host;
        }
        if let Some(port) = get("PORT") {
            settings.port = port.parse().map_err(|_| EngineError::InvalidSetting {
                name: "PORT".to_string(),
                message: format!("'{}' is not a valid port", port),
            })?;
        }
        if let Some(path) = get("TARIFF_FILE") {
            settings.tariff_file = PathBuf::from(path);
        }
        if let Some(path) = get("STATIC_DIR") {
            settings.static_dir = PathBuf::from(path);
        }
        if let Some(tz) = get("BUSINESS_TIMEZONE") {
            settings.timezone = tz.parse().map_err(|_| EngineError::InvalidSetting {
                name: "BUSINESS_TIMEZONE".to_string(),
                message: format!("'{}' is not an IANA time zone", tz),
            })?;
        }
        if let Some(base) = get("GOOGLE_MAPS_API_BASE") {
            settings.maps_api_base = base;
        }
        settings.maps_api_key = get("GOOGLE_MAPS_API_KEY");
        settings.admin_token = get("ADMIN_TOKEN");

        settings.email = match (get("EMAIL_API_URL"), get("EMAIL_API_KEY"), get("EMAIL_FROM")) {
            (Some(api_url), Some(api_key), Some(from)) => Some(EmailSettings {
                api_url,
                api_key,
                from,
            }),
            _ => None,
        };

        Ok(settings)
    }

    /// Returns the `host:port` bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
