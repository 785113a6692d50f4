//! Configuration loading from environment variables.
//!
//! Values are intentionally validated early so startup fails fast with
//! actionable errors.

use crate::error::AppError;
use std::env;

pub const DEFAULT_DELEGATE_TIMEOUT_SECS: u64 = 30;
pub const MAX_DELEGATE_TIMEOUT_SECS: u64 = 300;

/// Runtime configuration for the HTTP server and the translation delegate.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host interface to bind, for example `127.0.0.1`.
    pub host: String,
    /// TCP port to bind.
    pub port: u16,
    /// Optional Gemini API key; absence disables delegation entirely.
    pub gemini_api_key: Option<String>,
    /// Gemini model identifier used for `generateContent` calls.
    pub gemini_model: String,
    /// Base URL of the generative-language API.
    pub gemini_api_base: String,
    /// Per-request timeout applied to delegate calls, in seconds.
    pub delegate_timeout_secs: u64,
}

impl AppConfig {
    /// Builds configuration from environment variables.
    ///
    /// Variables:
    /// - `HOST` (default `127.0.0.1`)
    /// - `PORT` (default `8000`)
    /// - `GEMINI_API_KEY` (optional; enables the external delegate)
    /// - `GEMINI_MODEL` (default `gemini-1.5-flash`)
    /// - `GEMINI_API_BASE` (default `https://generativelanguage.googleapis.com/v1beta`)
    /// - `GEMINI_TIMEOUT_SECS` (default `30`, min `1`, max `300`)
    pub fn from_env() -> Result<Self, AppError> {
        let host = env_str("HOST", "127.0.0.1");
        let port = env_u16("PORT", 8000)?;
        let gemini_model = env_str("GEMINI_MODEL", "gemini-1.5-flash");
        let gemini_api_base = env_str(
            "GEMINI_API_BASE",
            "https://generativelanguage.googleapis.com/v1beta",
        );
        let delegate_timeout_secs = env_u64_bounded(
            "GEMINI_TIMEOUT_SECS",
            DEFAULT_DELEGATE_TIMEOUT_SECS,
            1,
            MAX_DELEGATE_TIMEOUT_SECS,
        )?;

        Ok(Self {
            host,
            port,
            gemini_api_key: env_opt("GEMINI_API_KEY"),
            gemini_model,
            gemini_api_base,
            delegate_timeout_secs,
        })
    }
}

fn env_str(name: &str, default: &str) -> String {
    match env::var(name) {
        Ok(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                default.to_string()
            } else {
                trimmed.to_string()
            }
        }
        Err(_) => default.to_string(),
    }
}

fn env_opt(name: &str) -> Option<String> {
    match env::var(name) {
        Ok(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Err(_) => None,
    }
}

fn env_u16(name: &str, default: u16) -> Result<u16, AppError> {
    let raw = env::var(name).unwrap_or_else(|_| default.to_string());
    let parsed = raw.trim().parse::<u16>().map_err(|_| {
        AppError::internal(format!("invalid {name}={raw:?}; expected integer 1-65535"))
    })?;
    if parsed == 0 {
        return Err(AppError::internal(format!(
            "invalid {name}={raw:?}; expected > 0"
        )));
    }
    Ok(parsed)
}

fn env_u64_bounded(name: &str, default: u64, min: u64, max: u64) -> Result<u64, AppError> {
    let raw = env::var(name).unwrap_or_else(|_| default.to_string());
    parse_u64_bounded(name, &raw, min, max)
}

fn parse_u64_bounded(name: &str, raw: &str, min: u64, max: u64) -> Result<u64, AppError> {
    let trimmed = raw.trim();
    let parsed = trimmed.parse::<u64>().map_err(|_| {
        AppError::internal(format!(
            "invalid {name}={raw:?}; expected integer in range [{min}, {max}]"
        ))
    })?;
    if parsed < min || parsed > max {
        return Err(AppError::internal(format!(
            "invalid {name}={raw:?}; expected integer in range [{min}, {max}]"
        )));
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::parse_u64_bounded;

    #[test]
    fn parse_u64_bounded_accepts_in_range_values() {
        assert_eq!(
            parse_u64_bounded("GEMINI_TIMEOUT_SECS", "1", 1, 300).unwrap(),
            1
        );
        assert_eq!(
            parse_u64_bounded("GEMINI_TIMEOUT_SECS", "300", 1, 300).unwrap(),
            300
        );
    }

    #[test]
    fn parse_u64_bounded_rejects_non_numeric_value() {
        assert!(parse_u64_bounded("GEMINI_TIMEOUT_SECS", "abc", 1, 300).is_err());
    }

    #[test]
    fn parse_u64_bounded_rejects_out_of_range_values() {
        assert!(parse_u64_bounded("GEMINI_TIMEOUT_SECS", "0", 1, 300).is_err());
        assert!(parse_u64_bounded("GEMINI_TIMEOUT_SECS", "301", 1, 300).is_err());
    }
}
