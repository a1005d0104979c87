//! Command-line interface parsing and dispatch.

use std::error::Error;

use clap::Parser;

use crate::auth;
use crate::core::generate::{generate_with_key, SamplingParams};
use crate::core::session::{run_session, Session};
use crate::models::{ModelCatalog, DEFAULT_MODEL};

#[derive(Parser)]
#[command(name = "nimchat")]
#[command(about = "Generate text from NVIDIA-hosted models on the command line")]
#[command(
    long_about = "Nimchat sends prompts to NVIDIA's integrate API and streams the \
response to your terminal.\n\n\
Environment Variables:\n\
  NVIDIA_API_KEY    Your NVIDIA API key (prompted for interactively if unset)\n\n\
Run without --prompt for an interactive session: type a prompt and press \
Enter, '/model' to switch models, 'exit' to quit."
)]
pub struct Args {
    /// The model to use
    #[arg(long, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Temperature for sampling (0.0-1.0)
    #[arg(long, default_value_t = 0.6)]
    pub temperature: f64,

    /// Top-p sampling parameter (0.0-1.0)
    #[arg(long = "top_p", default_value_t = 0.7)]
    pub top_p: f64,

    /// Maximum number of tokens to generate
    #[arg(long = "max_tokens", default_value_t = 4096)]
    pub max_tokens: u32,

    /// Prompt to send to the model (if not provided, starts an interactive session)
    #[arg(long)]
    pub prompt: Option<String>,
}

impl Args {
    pub fn sampling_params(&self) -> SamplingParams {
        SamplingParams {
            temperature: self.temperature,
            top_p: self.top_p,
            max_tokens: self.max_tokens,
        }
    }
}

pub async fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let params = args.sampling_params();

    match args.prompt {
        // One-shot mode: a single generation, no model switching. The
        // credential is resolved before any request goes out, so a missing
        // key in a scripted invocation exits non-zero here; the resolved
        // key is handed down to avoid prompting twice on a terminal.
        Some(prompt) => {
            let api_key = auth::resolve_api_key()?;
            generate_with_key(&prompt, &args.model, &params, api_key).await;
            Ok(())
        }
        None => {
            run_session(Session {
                // The configured default is taken as-is, even when it is not
                // a catalog member; only the picker constrains choices.
                model: args.model,
                params,
                catalog: ModelCatalog::default(),
            })
            .await
        }
    }
}

#[cfg(test)]
mod tests;
