//! Nimchat is a command-line chat client for NVIDIA-hosted inference models.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`cli`] parses command-line arguments and dispatches between one-shot
//!   generation and the interactive session.
//! - [`core`] owns response generation and the session loop: a background
//!   task streams chat-completion deltas over a channel while the display
//!   side prints them as they arrive.
//! - [`models`] holds the immutable model catalog and the interactive
//!   selection prompt.
//! - [`api`] defines the chat-completion payloads shared by request
//!   construction and stream parsing.
//! - [`auth`] resolves the API credential from the environment or an
//!   interactive prompt.
//!
//! The binary entrypoint (`src/main.rs`) loads a local `.env` file and
//! routes through [`cli::run`].

pub mod api;
pub mod auth;
pub mod cli;
pub mod core;
pub mod models;
pub mod utils;
