//! AI client configuration parsed from environment variables.

use super::types::AiError;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_AI_REQUEST_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_AI_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Key variables, checked in order
const API_KEY_VARS: &[&str] = &["GEMINI_API_KEY", "API_KEY"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AiTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiConfig {
    pub api_key: String,
    pub base_url: String,
    pub text_model: String,
    pub image_model: String,
    pub timeouts: AiTimeouts,
}

impl AiConfig {
    /// Build typed AI config from environment variables.
    ///
    /// Required:
    /// - `GEMINI_API_KEY`, or `API_KEY` as a fallback
    ///
    /// Optional:
    /// - `DUPLEX_AI_BASE_URL`: Generative Language API root
    /// - `DUPLEX_AI_TEXT_MODEL`: default `gemini-3-flash-preview`
    /// - `DUPLEX_AI_IMAGE_MODEL`: default `gemini-2.5-flash-image`
    /// - `DUPLEX_AI_TIMEOUT_SECS`: default 60
    pub fn from_env() -> Result<Self, AiError> {
        let api_key = API_KEY_VARS
            .iter()
            .find_map(|var| std::env::var(var).ok().filter(|v| !v.trim().is_empty()))
            .ok_or_else(|| AiError::MissingApiKey {
                var: API_KEY_VARS.join(" or "),
            })?;

        let base_url = std::env::var("DUPLEX_AI_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_GEMINI_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(AiError::ConfigParse(format!(
                "DUPLEX_AI_BASE_URL must be an http(s) URL, got '{base_url}'"
            )));
        }

        let text_model =
            std::env::var("DUPLEX_AI_TEXT_MODEL").unwrap_or_else(|_| DEFAULT_TEXT_MODEL.to_string());
        let image_model =
            std::env::var("DUPLEX_AI_IMAGE_MODEL").unwrap_or_else(|_| DEFAULT_IMAGE_MODEL.to_string());
        let timeouts = AiTimeouts {
            request_secs: env_parse_u64("DUPLEX_AI_TIMEOUT_SECS", DEFAULT_AI_REQUEST_TIMEOUT_SECS),
            connect_secs: DEFAULT_AI_CONNECT_TIMEOUT_SECS,
        };

        Ok(Self {
            api_key,
            base_url,
            text_model,
            image_model,
            timeouts,
        })
    }
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
