//! Background streaming of chat-completion responses.
//!
//! The request runs on a spawned tokio task that parses the SSE body line by
//! line and publishes [`StreamMessage`]s over an unbounded channel. The
//! caller drains the channel and prints chunks as they arrive; at most one
//! stream is in flight per session.

use futures_util::StreamExt;
use memchr::memchr;
use tokio::sync::mpsc;

use crate::api::{ChatMessage, ChatRequest, ChatResponse};
use crate::utils::url::construct_api_url;

#[derive(Clone, Debug)]
pub enum StreamMessage {
    Chunk(String),
    Error(String),
    End,
}

pub struct StreamParams {
    pub client: reqwest::Client,
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub prompt: String,
    pub temperature: f64,
    pub top_p: f64,
    pub max_tokens: u32,
}

fn extract_data_payload(line: &str) -> Option<&str> {
    line.strip_prefix("data:").map(str::trim_start)
}

/// Returns true when the payload signalled the end of the stream.
fn handle_data_payload(payload: &str, tx: &mpsc::UnboundedSender<StreamMessage>) -> bool {
    if payload == "[DONE]" {
        let _ = tx.send(StreamMessage::End);
        return true;
    }

    match serde_json::from_str::<ChatResponse>(payload) {
        Ok(response) => {
            if let Some(choice) = response.choices.first() {
                if let Some(content) = &choice.delta.content {
                    if !content.is_empty() {
                        let _ = tx.send(StreamMessage::Chunk(content.clone()));
                    }
                }
            }
            false
        }
        Err(_) => {
            if payload.trim().is_empty() {
                return false;
            }

            let _ = tx.send(StreamMessage::Error(summarize_api_error(payload)));
            let _ = tx.send(StreamMessage::End);
            true
        }
    }
}

fn process_sse_line(line: &str, tx: &mpsc::UnboundedSender<StreamMessage>) -> bool {
    extract_data_payload(line)
        .map(|payload| handle_data_payload(payload, tx))
        .unwrap_or(false)
}

fn extract_error_summary(value: &serde_json::Value) -> Option<String> {
    value
        .pointer("/error/message")
        .and_then(|v| v.as_str())
        .map(str::to_owned)
        .or_else(|| {
            value.get("error").and_then(|v| match v {
                serde_json::Value::String(s) => Some(s.to_string()),
                serde_json::Value::Object(map) => map
                    .get("message")
                    .and_then(|message| message.as_str().map(str::to_owned)),
                _ => None,
            })
        })
        .or_else(|| {
            value
                .get("message")
                .and_then(|v| v.as_str().map(str::to_owned))
        })
}

/// Collapse a raw error body to a single line fit for the terminal.
fn summarize_api_error(error_text: &str) -> String {
    let trimmed = error_text.trim();
    if trimmed.is_empty() {
        return "empty error response from server".to_string();
    }

    if let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) {
        if let Some(summary) = extract_error_summary(&value) {
            let summary = summary.split_whitespace().collect::<Vec<_>>().join(" ");
            if !summary.is_empty() {
                return summary;
            }
        }
    }

    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[derive(Clone)]
pub struct ChatStreamService {
    tx: mpsc::UnboundedSender<StreamMessage>,
}

impl ChatStreamService {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<StreamMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn spawn_stream(&self, params: StreamParams) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let StreamParams {
                client,
                base_url,
                api_key,
                model,
                prompt,
                temperature,
                top_p,
                max_tokens,
            } = params;

            let request = ChatRequest {
                model,
                messages: vec![ChatMessage::user(prompt)],
                temperature,
                top_p,
                max_tokens,
                stream: true,
            };

            let chat_url = construct_api_url(&base_url, "chat/completions");
            let response = match client
                .post(chat_url)
                .header("Authorization", format!("Bearer {api_key}"))
                .header("Content-Type", "application/json")
                .json(&request)
                .send()
                .await
            {
                Ok(response) => response,
                Err(e) => {
                    let _ = tx.send(StreamMessage::Error(e.to_string()));
                    let _ = tx.send(StreamMessage::End);
                    return;
                }
            };

            if !response.status().is_success() {
                let status = response.status();
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "<no body>".to_string());
                let _ = tx.send(StreamMessage::Error(format!(
                    "{status}: {}",
                    summarize_api_error(&body)
                )));
                let _ = tx.send(StreamMessage::End);
                return;
            }

            let mut stream = response.bytes_stream();
            let mut buffer: Vec<u8> = Vec::new();

            while let Some(chunk) = stream.next().await {
                let chunk_bytes = match chunk {
                    Ok(bytes) => bytes,
                    Err(e) => {
                        let _ = tx.send(StreamMessage::Error(e.to_string()));
                        let _ = tx.send(StreamMessage::End);
                        return;
                    }
                };
                buffer.extend_from_slice(&chunk_bytes);

                while let Some(newline_pos) = memchr(b'\n', &buffer) {
                    let line = match std::str::from_utf8(&buffer[..newline_pos]) {
                        Ok(s) => s.trim().to_string(),
                        Err(_) => {
                            buffer.drain(..=newline_pos);
                            continue;
                        }
                    };
                    buffer.drain(..=newline_pos);

                    if process_sse_line(&line, &tx) {
                        return;
                    }
                }
            }

            let _ = tx.send(StreamMessage::End);
        });
    }

    #[cfg(test)]
    pub fn send_for_test(&self, message: StreamMessage) {
        let _ = self.tx.send(message);
    }
}
