//! Configuration module
//!
//! The configuration is read once at process start and handed to the HTTP
//! layer as an immutable value. Nothing mutates it afterwards.

use std::env;
use std::fmt::Display;
use std::str::FromStr;

// Common constants
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const MAX_UPLOAD_SIZE_MB: usize = 16;
const DEFAULT_ALLOWED_EXTENSIONS: &str = "png,jpg,jpeg,gif";
const DEFAULT_JPEG_QUALITY: u8 = 95;
const HTTP_CONCURRENCY_LIMIT: usize = 1_000;

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub server_port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,
    /// Upper bound for a whole request body, in bytes.
    pub max_upload_size_bytes: usize,
    /// Lowercase extensions without the leading dot.
    pub allowed_extensions: Vec<String>,
    pub jpeg_quality: u8,
    pub http_concurrency_limit: usize,
    /// Emit logs as JSON lines instead of the compact console format.
    pub log_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            server_port: DEFAULT_PORT,
            environment: "development".to_string(),
            cors_origins: vec!["*".to_string()],
            max_upload_size_bytes: MAX_UPLOAD_SIZE_MB * 1024 * 1024,
            allowed_extensions: split_list(DEFAULT_ALLOWED_EXTENSIONS),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            http_concurrency_limit: HTTP_CONCURRENCY_LIMIT,
            log_json: false,
        }
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().trim_start_matches('.').to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Parse an optional setting, falling back to `default` only when it is unset.
fn parse_setting<T>(name: &str, raw: Option<String>, default: T) -> Result<T, anyhow::Error>
where
    T: FromStr,
    T::Err: Display,
{
    match raw {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{} has an invalid value '{}': {}", name, raw, e)),
        None => Ok(default),
    }
}

fn megabytes_to_bytes(megabytes: usize) -> Result<usize, anyhow::Error> {
    megabytes
        .checked_mul(1024 * 1024)
        .ok_or_else(|| anyhow::anyhow!("MAX_UPLOAD_SIZE_MB is too large: {}", megabytes))
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let defaults = Config::default();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or(defaults.environment);

        let host = env::var("HOST").unwrap_or(defaults.host);

        let server_port = parse_setting("PORT", env::var("PORT").ok(), defaults.server_port)?;

        let max_upload_size_mb = parse_setting(
            "MAX_UPLOAD_SIZE_MB",
            env::var("MAX_UPLOAD_SIZE_MB").ok(),
            MAX_UPLOAD_SIZE_MB,
        )?;
        let max_upload_size_bytes = megabytes_to_bytes(max_upload_size_mb)?;

        let allowed_extensions = env::var("ALLOWED_EXTENSIONS")
            .map(|raw| split_list(&raw))
            .unwrap_or(defaults.allowed_extensions);

        let jpeg_quality = parse_setting(
            "JPEG_QUALITY",
            env::var("JPEG_QUALITY").ok(),
            DEFAULT_JPEG_QUALITY,
        )?;

        let cors_origins = env::var("CORS_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or(defaults.cors_origins);

        let http_concurrency_limit = parse_setting(
            "HTTP_CONCURRENCY_LIMIT",
            env::var("HTTP_CONCURRENCY_LIMIT").ok(),
            HTTP_CONCURRENCY_LIMIT,
        )?
        .max(1);

        let log_json = env::var("LOG_FORMAT")
            .map(|f| f.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        Ok(Self {
            host,
            server_port,
            environment,
            cors_origins,
            max_upload_size_bytes,
            allowed_extensions,
            jpeg_quality,
            http_concurrency_limit,
            log_json,
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.max_upload_size_bytes == 0 {
            return Err(anyhow::anyhow!(
                "MAX_UPLOAD_SIZE_MB must be greater than zero"
            ));
        }

        if self.allowed_extensions.is_empty() {
            return Err(anyhow::anyhow!(
                "ALLOWED_EXTENSIONS must list at least one extension"
            ));
        }

        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(anyhow::anyhow!(
                "JPEG_QUALITY must be between 1 and 100, got {}",
                self.jpeg_quality
            ));
        }

        if self.is_production() && self.cors_origins.iter().any(|o| o == "*") {
            tracing::warn!("CORS allows all origins in production");
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.server_port)
    }
}
