//! Empty shell build step check.

use super::{CheckOutcome, Checker};
use crate::{config::Config, document::JobDocument};

pub struct EmptyShellChecker;

impl Checker for EmptyShellChecker {
    fn check(&self, document: &JobDocument, _config: &Config) -> CheckOutcome {
        let empty: Vec<String> = document
            .shell_commands()
            .iter()
            .enumerate()
            .filter(|(_, command)| command.trim().is_empty())
            .map(|(index, _)| (index + 1).to_string())
            .collect();

        if empty.is_empty() {
            CheckOutcome::pass()
        } else {
            CheckOutcome::fail(format!("Empty shell build step(s): #{}", empty.join(", #")))
        }
    }
}
