use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use crate::error::{Result, AppError};
use crate::scrape::CLIENT;

const MODEL: &str = "openai/gpt-4o-mini";
const MAX_TOKENS: u32 = 1000;

// Completions are slower than page fetches; override the client-wide timeout
// for this one call.
const COMPLETION_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: &str, content: impl Into<String>) -> Self {
        ChatMessage {
            role: role.to_string(),
            content: content.into(),
        }
    }
}

#[derive(Serialize)]
struct CompletionRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<ChatMessage>,
}

pub async fn request_completion(
    completion_url: &str,
    api_key: Option<&str>,
    messages: Vec<ChatMessage>,
) -> Result<String> {
    let api_key = api_key
        .ok_or_else(|| AppError::Config("OPENROUTER_API_KEY is not set".to_string()))?;

    let body = CompletionRequest {
        model: MODEL.into(),
        max_tokens: MAX_TOKENS,
        messages,
    };

    let response = CLIENT
        .post(completion_url)
        .bearer_auth(api_key)
        .timeout(COMPLETION_TIMEOUT)
        .json(&body)
        .send()
        .await
        .map_err(|e| AppError::UpstreamNetwork(e.to_string()))?;

    let payload: Value = response
        .json()
        .await
        .map_err(|e| AppError::UpstreamNetwork(e.to_string()))?;

    extract_reply(payload)
}

/// Pulls the reply text out of a completion payload. A response without a
/// usable first choice is an upstream shape error carrying the raw payload
/// for diagnostics, never an empty reply.
pub fn extract_reply(payload: Value) -> Result<String> {
    match payload["choices"][0]["message"]["content"].as_str() {
        Some(text) => Ok(text.to_string()),
        None => Err(AppError::UpstreamShape { details: payload }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_first_choice_content() {
        let payload = json!({
            "choices": [{"message": {"content": "X"}}]
        });
        assert_eq!(extract_reply(payload).unwrap(), "X");
    }

    #[test]
    fn empty_choices_is_a_shape_error() {
        let payload = json!({"choices": []});
        match extract_reply(payload.clone()) {
            Err(AppError::UpstreamShape { details }) => assert_eq!(details, payload),
            other => panic!("expected shape error, got {:?}", other),
        }
    }

    #[test]
    fn missing_choices_is_a_shape_error() {
        let payload = json!({"error": "rate limited"});
        assert!(matches!(
            extract_reply(payload),
            Err(AppError::UpstreamShape { .. })
        ));
    }

    #[test]
    fn non_string_content_is_a_shape_error() {
        let payload = json!({"choices": [{"message": {"content": 42}}]});
        assert!(matches!(
            extract_reply(payload),
            Err(AppError::UpstreamShape { .. })
        ));
    }
}
