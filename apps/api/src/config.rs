use anyhow::{bail, Context, Result};
use reqwest::Url;

/// Application configuration loaded from environment variables.
/// Startup aborts if the store endpoint or key are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub supabase_url: Url,
    pub supabase_key: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let supabase_url = parse_store_url(&require_env("SUPABASE_URL")?)?;
        let supabase_key = require_env("SUPABASE_KEY")?;
        if supabase_key.trim().is_empty() {
            bail!("Environment variable 'SUPABASE_KEY' must not be empty");
        }

        Ok(Config {
            supabase_url,
            supabase_key,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_store_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())
        .with_context(|| format!("SUPABASE_URL '{raw}' is not a valid URL"))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => bail!("SUPABASE_URL must use http or https, got '{other}'"),
    }
}
