use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::export::DEFAULT_READY_TIMEOUT;

/// Which external print surface exports are handed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceConfig {
    /// HTML-to-PDF print service reachable over HTTP.
    Http { service_url: String },
    /// Local headless-browser command template with `{input}`/`{output}` placeholders.
    Command { template: String },
}

/// Application configuration loaded from environment variables.
/// Fails at startup if a variable required by the chosen surface is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub surface: SurfaceConfig,
    pub export_ready_timeout: Duration,
    pub session_idle_ttl: chrono::Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let surface = match optional_env("EXPORT_SURFACE").as_deref().unwrap_or("http") {
            "http" => SurfaceConfig::Http {
                service_url: require_env("PRINT_SERVICE_URL")?,
            },
            "command" => SurfaceConfig::Command {
                template: require_env("PRINT_COMMAND")?,
            },
            other => bail!("EXPORT_SURFACE must be 'http' or 'command', got '{other}'"),
        };

        let export_ready_timeout = match optional_env("EXPORT_READY_TIMEOUT_MS") {
            Some(ms) => Duration::from_millis(
                ms.parse::<u64>()
                    .context("EXPORT_READY_TIMEOUT_MS must be a number of milliseconds")?,
            ),
            None => DEFAULT_READY_TIMEOUT,
        };

        let idle_minutes = optional_env("SESSION_IDLE_MINUTES")
            .unwrap_or_else(|| "120".to_string())
            .parse::<i64>()
            .context("SESSION_IDLE_MINUTES must be a whole number of minutes")?;
        if idle_minutes <= 0 {
            bail!("SESSION_IDLE_MINUTES must be positive");
        }

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            surface,
            export_ready_timeout,
            session_idle_ttl: chrono::Duration::minutes(idle_minutes),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
