//! Chat-completion payload types for the OpenAI-compatible wire format.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Clone)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
    pub top_p: f64,
    pub max_tokens: u32,
    pub stream: bool,
}

#[derive(Deserialize)]
pub struct ChatResponseDelta {
    pub content: Option<String>,
}

#[derive(Deserialize)]
pub struct ChatResponseChoice {
    pub delta: ChatResponseDelta,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<ChatResponseChoice>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_request_serializes_expected_fields() {
        let request = ChatRequest {
            model: "qwen/qwen3-next-80b-a3b-instruct".to_string(),
            messages: vec![ChatMessage::user("hello")],
            temperature: 0.6,
            top_p: 0.7,
            max_tokens: 4096,
            stream: true,
        };

        let value = serde_json::to_value(&request).expect("request should serialize");
        assert_eq!(value["model"], "qwen/qwen3-next-80b-a3b-instruct");
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["content"], "hello");
        assert_eq!(value["temperature"], 0.6);
        assert_eq!(value["top_p"], 0.7);
        assert_eq!(value["max_tokens"], 4096);
        assert_eq!(value["stream"], true);
    }

    #[test]
    fn chat_response_parses_delta_content() {
        let payload = r#"{"choices":[{"delta":{"content":"Hi"},"finish_reason":null}]}"#;
        let response: ChatResponse =
            serde_json::from_str(payload).expect("payload should parse");
        assert_eq!(
            response.choices[0].delta.content.as_deref(),
            Some("Hi")
        );
        assert!(response.choices[0].finish_reason.is_none());
    }
}
