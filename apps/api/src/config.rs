use anyhow::{Context, Result};

use crate::mailer::MailCredentials;

pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing. Mail settings are
/// optional here and checked per request by the contact handler.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub rust_log: String,
    pub cors_origins: Vec<String>,
    pub mail: MailSettings,
}

/// Mail relay settings. Any of the three account fields may be absent; the
/// contact endpoint refuses to dispatch until all of them are set.
#[derive(Debug, Clone, Default)]
pub struct MailSettings {
    pub sender: Option<String>,
    pub secret: Option<String>,
    pub recipient: Option<String>,
    pub smtp_host: String,
    pub smtp_port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            cors_origins: parse_origins(
                &std::env::var("CORS_ORIGINS")
                    .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            ),
            mail: MailSettings::from_env()?,
        })
    }
}

impl MailSettings {
    pub fn from_env() -> Result<Self> {
        Ok(MailSettings {
            sender: optional_env("EMAIL_USER"),
            secret: optional_env("EMAIL_PASS"),
            recipient: optional_env("RECIPIENT_EMAIL"),
            smtp_host: std::env::var("SMTP_HOST")
                .unwrap_or_else(|_| DEFAULT_SMTP_HOST.to_string()),
            smtp_port: match std::env::var("SMTP_PORT") {
                Ok(raw) => raw
                    .parse::<u16>()
                    .context("SMTP_PORT must be a valid port number")?,
                Err(_) => DEFAULT_SMTP_PORT,
            },
        })
    }

    /// Returns the account credentials only when all three are present.
    pub fn credentials(&self) -> Option<MailCredentials> {
        Some(MailCredentials {
            sender: self.sender.clone()?,
            secret: self.secret.clone()?,
            recipient: self.recipient.clone()?,
        })
    }

    /// Names of the account variables that are not set, for server-side logs.
    pub fn missing(&self) -> Vec<&'static str> {
        [
            ("EMAIL_USER", &self.sender),
            ("EMAIL_PASS", &self.secret),
            ("RECIPIENT_EMAIL", &self.recipient),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_none())
        .map(|(name, _)| name)
        .collect()
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Empty values count as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|o| o.trim().trim_end_matches('/').to_string())
        .filter(|o| !o.is_empty())
        .collect()
}
