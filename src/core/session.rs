//! The interactive prompt loop.
//!
//! Each input line is classified into a [`SessionCommand`] and routed: exit
//! words end the session, `/model` opens the picker, blank lines are
//! rejected, and anything else is sent to the generator. The active model is
//! the only state carried between iterations.

use std::error::Error;
use std::io::{self, Write};

use crate::core::generate::{generate_response, SamplingParams};
use crate::models::{select_model, ModelCatalog};

/// What a single line of user input asks the session to do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionCommand {
    Exit,
    SwitchModel,
    Blank,
    Prompt(String),
}

impl SessionCommand {
    /// Classify one input line, already stripped of its line ending.
    pub fn parse(line: &str) -> Self {
        let lowered = line.to_lowercase();
        if lowered == "exit" || lowered == "quit" {
            SessionCommand::Exit
        } else if lowered == "/model" {
            SessionCommand::SwitchModel
        } else if line.trim().is_empty() {
            SessionCommand::Blank
        } else {
            SessionCommand::Prompt(line.to_string())
        }
    }
}

pub struct Session {
    pub model: String,
    pub params: SamplingParams,
    pub catalog: ModelCatalog,
}

/// Run the read-eval-print loop until the user exits or input ends.
pub async fn run_session(mut session: Session) -> Result<(), Box<dyn Error>> {
    println!("Current model: {}", session.model);
    println!("Enter your prompt (type 'exit' to quit, '/model' to switch models):");

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            // End of input behaves like an explicit exit.
            println!("Exiting program...");
            break;
        }
        let line = line.trim_end_matches(['\r', '\n']);

        match SessionCommand::parse(line) {
            SessionCommand::Exit => {
                println!("Exiting program...");
                break;
            }
            SessionCommand::SwitchModel => {
                let selection =
                    select_model(&session.catalog, stdin.lock(), &mut io::stdout(), None)?;
                match selection {
                    Some(model) => session.model = model,
                    None => println!("Keeping current model: {}", session.model),
                }
            }
            SessionCommand::Blank => {
                println!("Prompt cannot be empty. Please try again.");
            }
            SessionCommand::Prompt(prompt) => {
                // Generation failures are contained and printed; the loop
                // always comes back for the next prompt.
                generate_response(&prompt, &session.model, &session.params).await;
                println!("\nEnter another prompt or type 'exit' to quit:");
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_words_parse_case_insensitively() {
        assert_eq!(SessionCommand::parse("exit"), SessionCommand::Exit);
        assert_eq!(SessionCommand::parse("QUIT"), SessionCommand::Exit);
        assert_eq!(SessionCommand::parse("Exit"), SessionCommand::Exit);
    }

    #[test]
    fn model_command_parses_case_insensitively() {
        assert_eq!(SessionCommand::parse("/model"), SessionCommand::SwitchModel);
        assert_eq!(SessionCommand::parse("/MODEL"), SessionCommand::SwitchModel);
    }

    #[test]
    fn blank_lines_never_become_prompts() {
        assert_eq!(SessionCommand::parse(""), SessionCommand::Blank);
        assert_eq!(SessionCommand::parse("   "), SessionCommand::Blank);
        assert_eq!(SessionCommand::parse("\t"), SessionCommand::Blank);
    }

    #[test]
    fn other_text_is_a_prompt_kept_verbatim() {
        assert_eq!(
            SessionCommand::parse("tell me a story"),
            SessionCommand::Prompt("tell me a story".to_string())
        );
        // Leading whitespace does not hide an exit word.
        assert_eq!(
            SessionCommand::parse(" exit"),
            SessionCommand::Prompt(" exit".to_string())
        );
    }
}
