// Standard library imports
use std::{
    env,
    net::{IpAddr, SocketAddr},
    path::PathBuf,
};

// Third party imports
use dotenv::dotenv;
use thiserror::Error;

/// Endpoint gốc của RugCheck API
pub const DEFAULT_UPSTREAM_BASE_URL: &str = "https://api.rugcheck.xyz/v1";
/// User-Agent gửi kèm mọi request upstream
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";
pub const DEFAULT_API_HOST: &str = "0.0.0.0";
pub const DEFAULT_API_PORT: u16 = 5000;

/// Lỗi cấu hình
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },
}

/// Cấu hình server, tạo một lần khi khởi động
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    // API
    pub api_host: String,
    pub api_port: u16,

    // Upstream
    pub upstream_base_url: String,
    pub user_agent: String,

    // Logging (None: chỉ ghi ra stderr)
    pub log_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        Self {
            api_host: DEFAULT_API_HOST.to_string(),
            api_port: DEFAULT_API_PORT,
            upstream_base_url: DEFAULT_UPSTREAM_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            log_dir: None,
        }
    }

    /// Đọc cấu hình từ biến môi trường (có nạp file `.env` nếu tồn tại)
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Đọc cấu hình từ một nguồn key/value bất kỳ; key thiếu dùng giá trị mặc định
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::new();

        let api_port = match lookup("API_PORT") {
            Some(raw) => raw.trim().parse().map_err(|e| ConfigError::InvalidValue {
                key: "API_PORT",
                message: format!("{raw:?}: {e}"),
            })?,
            None => defaults.api_port,
        };

        let user_agent = lookup("RUGCHECK_USER_AGENT").unwrap_or(defaults.user_agent);
        if user_agent.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "RUGCHECK_USER_AGENT",
                message: "user agent must not be empty".to_string(),
            });
        }

        Ok(Config {
            api_host: lookup("API_HOST").unwrap_or(defaults.api_host),
            api_port,
            upstream_base_url: lookup("RUGCHECK_API_URL").unwrap_or(defaults.upstream_base_url),
            user_agent,
            log_dir: lookup("LOG_DIR")
                .filter(|dir| !dir.trim().is_empty())
                .map(PathBuf::from),
        })
    }

    /// Địa chỉ lắng nghe của API server
    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self.api_host.parse().map_err(|e| ConfigError::InvalidValue {
            key: "API_HOST",
            message: format!("{:?}: {}", self.api_host, e),
        })?;
        Ok(SocketAddr::new(ip, self.api_port))
    }
}
