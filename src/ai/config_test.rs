use super::*;
use std::sync::{Mutex, MutexGuard};

static ENV_LOCK: Mutex<()> = Mutex::new(());

fn env_guard() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Callers hold `env_guard()` so no other test touches the environment.
fn clear_ai_env() {
    std::env::remove_var("GEMINI_API_KEY");
    std::env::remove_var("API_KEY");
    std::env::remove_var("DUPLEX_AI_BASE_URL");
    std::env::remove_var("DUPLEX_AI_TEXT_MODEL");
    std::env::remove_var("DUPLEX_AI_IMAGE_MODEL");
    std::env::remove_var("DUPLEX_AI_TIMEOUT_SECS");
}

#[test]
fn from_env_defaults() {
    let _guard = env_guard();
    clear_ai_env();
    std::env::set_var("GEMINI_API_KEY", "secret");

    let cfg = AiConfig::from_env().unwrap();
    assert_eq!(cfg.api_key, "secret");
    assert_eq!(cfg.base_url, DEFAULT_GEMINI_BASE_URL);
    assert_eq!(cfg.text_model, DEFAULT_TEXT_MODEL);
    assert_eq!(cfg.image_model, DEFAULT_IMAGE_MODEL);
    assert_eq!(
        cfg.timeouts,
        AiTimeouts {
            request_secs: DEFAULT_AI_REQUEST_TIMEOUT_SECS,
            connect_secs: DEFAULT_AI_CONNECT_TIMEOUT_SECS
        }
    );

    clear_ai_env();
}

#[test]
fn from_env_falls_back_to_api_key_and_parses_overrides() {
    let _guard = env_guard();
    clear_ai_env();
    std::env::set_var("API_KEY", "fallback");
    std::env::set_var("DUPLEX_AI_BASE_URL", "http://localhost:8080/v1beta/");
    std::env::set_var("DUPLEX_AI_TEXT_MODEL", "gemini-test");
    std::env::set_var("DUPLEX_AI_TIMEOUT_SECS", "5");

    let cfg = AiConfig::from_env().unwrap();
    assert_eq!(cfg.api_key, "fallback");
    assert_eq!(cfg.base_url, "http://localhost:8080/v1beta");
    assert_eq!(cfg.text_model, "gemini-test");
    assert_eq!(cfg.image_model, DEFAULT_IMAGE_MODEL);
    assert_eq!(cfg.timeouts.request_secs, 5);

    clear_ai_env();
}

#[test]
fn from_env_ignores_bad_timeout() {
    let _guard = env_guard();
    clear_ai_env();
    std::env::set_var("GEMINI_API_KEY", "secret");
    std::env::set_var("DUPLEX_AI_TIMEOUT_SECS", "soon");

    let cfg = AiConfig::from_env().unwrap();
    assert_eq!(cfg.timeouts.request_secs, DEFAULT_AI_REQUEST_TIMEOUT_SECS);

    clear_ai_env();
}

#[test]
fn from_env_requires_key() {
    let _guard = env_guard();
    clear_ai_env();

    let err = AiConfig::from_env().unwrap_err();
    assert!(matches!(err, AiError::MissingApiKey { .. }));
}

#[test]
fn from_env_rejects_non_http_base_url() {
    let _guard = env_guard();
    clear_ai_env();
    std::env::set_var("GEMINI_API_KEY", "secret");
    std::env::set_var("DUPLEX_AI_BASE_URL", "ftp://nope");

    let err = AiConfig::from_env().unwrap_err();
    assert!(matches!(err, AiError::ConfigParse(_)));

    clear_ai_env();
}
