//! The model catalog and the interactive model picker.
//!
//! The catalog is a fixed list decided at startup and injected wherever it
//! is needed, so tests can substitute their own entries. Every id the picker
//! offers comes from this list.

use std::io::{self, BufRead, Write};

use crate::utils::horizontal_rule;

pub const DEFAULT_MODEL: &str = "qwen/qwen3-next-80b-a3b-instruct";

/// Immutable set of model ids available for selection.
#[derive(Clone, Debug)]
pub struct ModelCatalog {
    ids: Vec<String>,
}

impl ModelCatalog {
    pub fn new(ids: Vec<String>) -> Self {
        Self { ids }
    }

    /// Catalog ids in ascending lexicographic order, as shown to the user.
    pub fn sorted_ids(&self) -> Vec<String> {
        let mut ids = self.ids.clone();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl Default for ModelCatalog {
    fn default() -> Self {
        Self::new(vec![
            "deepseek-ai/deepseek-v3.1-terminus".to_string(),
            "qwen/qwen3-next-80b-a3b-instruct".to_string(),
        ])
    }
}

/// Print the numbered model list and return the ids in display order.
pub fn display_models<W: Write>(
    catalog: &ModelCatalog,
    output: &mut W,
) -> io::Result<Vec<String>> {
    let sorted = catalog.sorted_ids();

    writeln!(output, "\nAvailable models:")?;
    writeln!(output, "{}", horizontal_rule())?;
    for (idx, model) in sorted.iter().enumerate() {
        writeln!(output, "{}. {}", idx + 1, model)?;
    }
    writeln!(output, "{}", horizontal_rule())?;

    Ok(sorted)
}

/// Run the numbered selection prompt over the given input and output.
///
/// Returns `None` when the user cancels, input reaches end-of-file, or the
/// attempt cap is exhausted. `max_attempts` exists for tests; the
/// interactive session passes `None` and the prompt blocks until the user
/// answers.
pub fn select_model<R: BufRead, W: Write>(
    catalog: &ModelCatalog,
    mut input: R,
    output: &mut W,
    max_attempts: Option<usize>,
) -> io::Result<Option<String>> {
    let sorted = display_models(catalog, output)?;
    let mut attempts = 0usize;

    loop {
        if let Some(cap) = max_attempts {
            if attempts >= cap {
                return Ok(None);
            }
        }
        attempts += 1;

        write!(
            output,
            "\nEnter model number (or 'cancel' to keep current model): "
        )?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let choice = line.trim();

        if choice.eq_ignore_ascii_case("cancel") {
            return Ok(None);
        }

        match choice.parse::<usize>() {
            Ok(n) if (1..=sorted.len()).contains(&n) => {
                let selected = sorted[n - 1].clone();
                writeln!(output, "\nSwitched to model: {selected}")?;
                return Ok(Some(selected));
            }
            Ok(_) => {
                writeln!(
                    output,
                    "Please enter a number between 1 and {}",
                    sorted.len()
                )?;
            }
            Err(_) => {
                writeln!(output, "Invalid input. Please enter a number or 'cancel'")?;
            }
        }
    }
}
