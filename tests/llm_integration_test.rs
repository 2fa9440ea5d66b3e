//! Integration test for LLM provider connectivity.

use forca::{Difficulty, LlmClient, LlmConfig, LlmProvider, SYSTEM_PROMPT, build_prompt, default_model, parse_generated, response_schema};
use tracing::instrument;

fn client_for(provider: LlmProvider, var: &str) -> LlmClient {
    let api_key = std::env::var(var).unwrap_or_else(|_| panic!("{} not set", var));
    let config = LlmConfig::new(
        provider,
        api_key,
        default_model(provider).to_string(),
        512,
        1.0,
    );
    LlmClient::new(config)
}

async fn assert_generates_word(client: LlmClient) {
    let response = client
        .generate_json(
            SYSTEM_PROMPT,
            &build_prompt(Some("Império Romano"), Difficulty::Medium),
            &response_schema(),
        )
        .await
        .expect("Failed to generate");

    eprintln!("Response: {}", response);
    let word = parse_generated(&response).expect("Response should be a word");
    assert!(!word.word().is_empty(), "Word should not be empty");
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
#[instrument]
async fn test_gemini_connectivity() {
    dotenvy::dotenv().ok();
    assert_generates_word(client_for(LlmProvider::Gemini, "GEMINI_API_KEY")).await;
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
#[instrument]
async fn test_openai_connectivity() {
    dotenvy::dotenv().ok();
    assert_generates_word(client_for(LlmProvider::OpenAI, "OPENAI_API_KEY")).await;
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
#[instrument]
async fn test_anthropic_connectivity() {
    dotenvy::dotenv().ok();
    assert_generates_word(client_for(LlmProvider::Anthropic, "ANTHROPIC_API_KEY")).await;
}
