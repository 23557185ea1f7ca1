use std::net::SocketAddr;
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Medi Portal";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// OpenAI-compatible gateway used when `MEDI_PORTAL_GATEWAY_URL` is unset.
pub const DEFAULT_GATEWAY_URL: &str = "https://ai.gateway.lovable.dev";

/// Model requested from the gateway unless overridden.
pub const DEFAULT_MODEL: &str = "google/gemini-2.5-flash";

pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 2000;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

/// Environment variable names.
pub mod env {
    pub const API_KEY: &str = "LOVABLE_API_KEY";
    pub const GATEWAY_URL: &str = "MEDI_PORTAL_GATEWAY_URL";
    pub const MODEL: &str = "MEDI_PORTAL_MODEL";
    pub const BIND: &str = "MEDI_PORTAL_BIND";
    pub const DATABASE: &str = "MEDI_PORTAL_DB";
}

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "medi_portal_lib=info,medi_portal=info,tower_http=warn"
}

/// Get the application data directory.
/// `~/MediPortal/`, falling back to the working directory when no home exists.
pub fn app_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("MediPortal")
}

/// Default location of the SQLite database.
pub fn default_database_path() -> PathBuf {
    app_data_dir().join("medi_portal.db")
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },
}

/// Settings for the text-generation gateway.
///
/// The API key is optional here: a missing key must not stop the service
/// from starting, only fail each analysis before it reaches the network.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl GatewayConfig {
    pub fn new(base_url: &str, api_key: Option<String>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }
}

/// Process-level configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub database_path: PathBuf,
    pub gateway: GatewayConfig,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_raw = lookup(env::BIND).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidValue {
                var: env::BIND,
                value: bind_raw.clone(),
            })?;

        let database_path = lookup(env::DATABASE)
            .map(PathBuf::from)
            .unwrap_or_else(default_database_path);

        let base_url = lookup(env::GATEWAY_URL).unwrap_or_else(|| DEFAULT_GATEWAY_URL.to_string());
        let mut gateway = GatewayConfig::new(&base_url, lookup(env::API_KEY));
        if let Some(model) = lookup(env::MODEL).filter(|m| !m.trim().is_empty()) {
            gateway.model = model;
        }

        Ok(Self {
            bind_addr,
            database_path,
            gateway,
        })
    }
}
