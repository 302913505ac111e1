use anyhow::{Context, Result};
use reqwest::Url;

pub const DEFAULT_API_URL: &str = "http://localhost:5000/properties";
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone)]
pub struct Config {
    /// Collection endpoint, used for both listing and creation
    pub api_url: Url,
    /// `tracing_subscriber::EnvFilter` directive
    pub log_filter: String,
    pub user_agent: String,
}

impl Config {
    /// Read settings from the environment, after loading `.env` if there is one
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let raw_url = value("PROPERTY_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = Url::parse(raw_url.trim())
            .with_context(|| format!("PROPERTY_API_URL is not a valid URL: {raw_url}"))?;
        if !matches!(api_url.scheme(), "http" | "https") {
            anyhow::bail!("PROPERTY_API_URL must be http or https, got {}", api_url.scheme());
        }

        let log_filter =
            value("PROPERTY_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
        let user_agent = value("PROPERTY_USER_AGENT")
            .unwrap_or_else(|| format!("property-listings/{}", env!("CARGO_PKG_VERSION")));

        Ok(Self {
            api_url,
            log_filter,
            user_agent,
        })
    }
}
