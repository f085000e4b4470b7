use std::net::IpAddr;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://umzzcc503l.execute-api.us-west-2.amazonaws.com/dishes/";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    /// Where dish submissions are POSTed.
    pub api_url: String,
    pub api_timeout: Duration,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let host: IpAddr = env_or("DISHFORM_HOST", "127.0.0.1")
            .parse()
            .map_err(|e| format!("Invalid DISHFORM_HOST: {e}"))?;

        let port: u16 = env_or("DISHFORM_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid DISHFORM_PORT: {e}"))?;

        let api_url = env_or("DISHFORM_API_URL", DEFAULT_API_URL);
        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(format!(
                "Invalid DISHFORM_API_URL '{api_url}': must start with http:// or https://"
            ));
        }

        let timeout_secs: u64 = env_or("DISHFORM_API_TIMEOUT_SECS", "30")
            .parse()
            .map_err(|e| format!("Invalid DISHFORM_API_TIMEOUT_SECS: {e}"))?;
        if timeout_secs == 0 {
            return Err("Invalid DISHFORM_API_TIMEOUT_SECS: must be greater than 0".to_string());
        }

        let log_level = env_or("DISHFORM_LOG_LEVEL", "info");

        Ok(Config {
            host,
            port,
            api_url,
            api_timeout: Duration::from_secs(timeout_secs),
            log_level,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
