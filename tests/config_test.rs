//! Tests for TOML configuration loading.

use std::io::Write;
use std::time::Duration;

use forca::{DEFAULT_TIMEOUT, ForcaConfig, LlmProvider, Theme, default_model};

fn write_config(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_defaults_without_file() {
    let config = ForcaConfig::load(None).unwrap();
    assert_eq!(*config.llm_provider(), LlmProvider::Gemini);
    assert_eq!(config.model(), "gemini-2.5-flash");
    assert_eq!(config.loss_delay(), Duration::from_millis(500));
    assert_eq!(config.settings().theme, Theme::Dark);
    assert_eq!(*config.llm_timeout_secs(), DEFAULT_TIMEOUT.as_secs());
}

#[test]
fn test_partial_file_keeps_defaults() {
    let file = write_config(
        r#"
llm_provider = "anthropic"
theme = "light"
low_performance = true
"#,
    );
    let config = ForcaConfig::from_file(file.path()).unwrap();
    assert_eq!(*config.llm_provider(), LlmProvider::Anthropic);
    assert_eq!(config.model(), default_model(LlmProvider::Anthropic));
    assert_eq!(*config.llm_max_tokens(), 512);
    let settings = config.settings();
    assert_eq!(settings.theme, Theme::Light);
    assert!(settings.low_performance);
}

#[test]
fn test_full_file() {
    let file = write_config(
        r#"
llm_provider = "openai"
llm_model = "gpt-4o"
llm_max_tokens = 256
llm_temperature = 0.5
llm_base_url = "http://localhost:8080"
loss_delay_ms = 1200
llm_timeout_secs = 5
"#,
    );
    let config = ForcaConfig::load(Some(file.path())).unwrap();
    assert_eq!(config.model(), "gpt-4o");
    assert_eq!(*config.llm_temperature(), 0.5);
    assert_eq!(config.llm_base_url().as_deref(), Some("http://localhost:8080"));
    assert_eq!(config.loss_delay(), Duration::from_millis(1200));
    assert_eq!(*config.llm_timeout_secs(), 5);
}

#[test]
fn test_invalid_files_are_errors() {
    let file = write_config("llm_provider = \"mistral\"");
    let err = ForcaConfig::from_file(file.path()).unwrap_err();
    assert!(err.message.contains("Failed to parse config"));

    let missing = ForcaConfig::from_file("/definitely/not/here.toml").unwrap_err();
    assert!(missing.message.contains("Failed to read config file"));
}
