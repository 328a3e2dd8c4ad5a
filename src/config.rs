use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;
use std::time::Duration;

const DEFAULT_API_BASE_URL: &str = "http://localhost:5512/api";

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub api_base_url: String,
    pub static_dir: String,
    pub request_timeout: Option<Duration>,
    pub dashboard_rps: u32,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let api_base_url = match get_env_opt("API_BASE_URL") {
            Some(url) => url,
            None => resolve_api_base_url(get_env_opt("DEPLOYMENT_HOST").as_deref()),
        };
        validate_base_url(&api_base_url)?;

        Ok(Self {
            server_address: get_env("SERVER_ADDRESS")?,
            api_base_url,
            static_dir: get_env_opt("STATIC_DIR").unwrap_or_else(|| "./frontend".to_string()),
            request_timeout: get_env_parse_opt::<u64>("REQUEST_TIMEOUT_SECS")?
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
            dashboard_rps: get_env_parse_opt("DASHBOARD_RPS")?.unwrap_or(50),
        })
    }
}

/// Maps the host the dashboard is deployed on to the screening API base URL.
pub fn resolve_api_base_url(host: Option<&str>) -> String {
    let host = host
        .map(|h| {
            h.trim()
                .trim_start_matches("http://")
                .trim_start_matches("https://")
                .trim_end_matches('/')
        })
        .filter(|h| !h.is_empty());

    match host {
        None | Some("localhost") | Some("127.0.0.1") => DEFAULT_API_BASE_URL.to_string(),
        Some("103.149.105.113") => "http://103.149.105.113:5512/api".to_string(),
        Some("hra.betopialimited.com") => "http://hra.betopialimited.com/api".to_string(),
        Some(other) => format!("http://{}/api", other),
    }
}

fn validate_base_url(raw: &str) -> Result<()> {
    let parsed = url::Url::parse(raw)
        .map_err(|e| Error::Config(format!("Invalid API base URL {}: {}", raw, e)))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(Error::Config(format!(
            "API base URL must be http(s), got {}",
            parsed.scheme()
        )));
    }
    Ok(())
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_opt(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn get_env_parse_opt<T>(name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match get_env_opt(name) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}
