//! Guard for destructive actions (reset, delete).

use std::io::{self, BufRead, Write};

pub trait Confirm {
    /// Ask the operator; `true` means go ahead
    fn confirm(&mut self, question: &str) -> bool;
}

/// Answers yes without asking (`--yes`)
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, _question: &str) -> bool {
        true
    }
}

/// Asks on stderr and reads a y/N answer from stdin
pub struct Prompt;

impl Confirm for Prompt {
    fn confirm(&mut self, question: &str) -> bool {
        let mut stderr = io::stderr();
        if write!(stderr, "{} [y/N] ", question).and_then(|_| stderr.flush()).is_err() {
            return false;
        }
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        is_yes(&answer)
    }
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, question: &str) -> bool {
        self(question)
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
