//! API credential resolution.
//!
//! The key comes from the `NVIDIA_API_KEY` environment variable. When it is
//! missing and stdin is a terminal, the user is prompted for it once; in a
//! scripted context (piped input, CI) resolution fails immediately instead
//! of blocking on a prompt that nobody will answer.

use std::error::Error;
use std::io::{self, BufRead, IsTerminal, Write};

pub const API_KEY_ENV_VAR: &str = "NVIDIA_API_KEY";

/// Read the API key from the environment, treating an empty value as unset.
pub fn api_key_from_env() -> Option<String> {
    std::env::var(API_KEY_ENV_VAR)
        .ok()
        .filter(|key| !key.trim().is_empty())
}

/// Resolve the API key, falling back to an interactive prompt on a terminal.
pub fn resolve_api_key() -> Result<String, Box<dyn Error>> {
    if let Some(key) = api_key_from_env() {
        return Ok(key);
    }

    if io::stdin().is_terminal() {
        println!("Warning: {API_KEY_ENV_VAR} environment variable not found.");
        print!("Please enter your NVIDIA API key: ");
        io::stdout().flush()?;

        let mut key = String::new();
        io::stdin().lock().read_line(&mut key)?;
        let key = key.trim();
        if key.is_empty() {
            return Err("API key cannot be empty".into());
        }
        Ok(key.to_string())
    } else {
        Err(format!("{API_KEY_ENV_VAR} environment variable is required").into())
    }
}
