//! Response generation against the NVIDIA integrate endpoint.

use std::error::Error;
use std::io::{self, Write};

use tokio::sync::mpsc;

use crate::auth;
use crate::core::chat_stream::{ChatStreamService, StreamMessage, StreamParams};
use crate::utils::horizontal_rule;

pub const API_BASE_URL: &str = "https://integrate.api.nvidia.com/v1";
const BASE_URL_ENV_VAR: &str = "NVIDIA_BASE_URL";

/// Sampling parameters passed through to the completion request unchanged.
/// Ranges are not validated here; the endpoint rejects what it dislikes.
#[derive(Clone, Copy, Debug)]
pub struct SamplingParams {
    pub temperature: f64,
    pub top_p: f64,
    pub max_tokens: u32,
}

/// Generate one streamed response and print it to stdout.
///
/// Never fails: credential resolution and every stage of the request are
/// contained and reported as a single `Error generating response:` line,
/// so a failed generation never tears down the interactive session.
pub async fn generate_response(prompt: &str, model: &str, params: &SamplingParams) {
    match auth::resolve_api_key() {
        Ok(api_key) => generate_with_key(prompt, model, params, api_key).await,
        Err(e) => println!("Error generating response: {e}"),
    }
}

/// Generate with an already-resolved credential.
///
/// One-shot mode resolves the key before calling, so a missing credential
/// aborts the process there instead of being contained here.
pub async fn generate_with_key(
    prompt: &str,
    model: &str,
    params: &SamplingParams,
    api_key: String,
) {
    if let Err(e) = stream_response(prompt, model, params, api_key).await {
        println!("Error generating response: {e}");
    }
}

async fn stream_response(
    prompt: &str,
    model: &str,
    params: &SamplingParams,
    api_key: String,
) -> Result<(), Box<dyn Error>> {
    let base_url =
        std::env::var(BASE_URL_ENV_VAR).unwrap_or_else(|_| API_BASE_URL.to_string());

    let (service, mut rx) = ChatStreamService::new();
    service.spawn_stream(StreamParams {
        client: reqwest::Client::new(),
        base_url,
        api_key,
        model: model.to_string(),
        prompt: prompt.to_string(),
        temperature: params.temperature,
        top_p: params.top_p,
        max_tokens: params.max_tokens,
    });

    render_stream(prompt, &mut rx, &mut io::stdout()).await
}

/// Drain the stream onto `out`, flushing after every chunk.
///
/// The header and opening rule wait for the first non-error message, so a
/// request that fails outright emits nothing but its error line.
async fn render_stream<W: Write>(
    prompt: &str,
    rx: &mut mpsc::UnboundedReceiver<StreamMessage>,
    out: &mut W,
) -> Result<(), Box<dyn Error>> {
    let mut header_written = false;

    while let Some(message) = rx.recv().await {
        match message {
            StreamMessage::Chunk(content) => {
                if !header_written {
                    write_header(prompt, out)?;
                    header_written = true;
                }
                write!(out, "{content}")?;
                out.flush()?;
            }
            StreamMessage::Error(message) => return Err(message.into()),
            StreamMessage::End => break,
        }
    }

    if !header_written {
        write_header(prompt, out)?;
    }
    writeln!(out, "\n{}", horizontal_rule())?;
    Ok(())
}

fn write_header<W: Write>(prompt: &str, out: &mut W) -> io::Result<()> {
    writeln!(out, "\nResponse to: \"{prompt}\"\n")?;
    writeln!(out, "{}", horizontal_rule())
}
