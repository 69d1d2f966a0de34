//! Terminal implementation of the bridge's operator prompts.

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::Path;

use colored::Colorize;

use wrb_bridge::Operator;
use wrb_reaper::{open_in_default_app, ReaperError};

/// Preset answer from `--yes`/`--no`, or ask on the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Ask,
    Yes,
    No,
}

impl Answer {
    pub fn from_flags(yes: bool, no: bool) -> Self {
        match (yes, no) {
            (true, _) => Answer::Yes,
            (_, true) => Answer::No,
            _ => Answer::Ask,
        }
    }
}

pub struct TerminalOperator {
    answer: Answer,
}

impl TerminalOperator {
    pub fn new(answer: Answer) -> Self {
        Self { answer }
    }
}

impl Operator for TerminalOperator {
    fn confirm(&self, title: &str, question: &str) -> bool {
        match self.answer {
            Answer::Yes => true,
            Answer::No => false,
            Answer::Ask => ask(title, question),
        }
    }

    fn open_for_edit(&self, path: &Path) -> Result<(), ReaperError> {
        println!("Opening {} for editing", path.display());
        open_in_default_app(path)
    }
}

fn ask(title: &str, question: &str) -> bool {
    let stdin = io::stdin();
    if !stdin.is_terminal() {
        tracing::info!("no terminal attached, answering no: {question}");
        return false;
    }
    print!("{} {question} [y/N] ", format!("{title}:").bold());
    let _ = io::stdout().flush();

    let mut line = String::new();
    match stdin.lock().read_line(&mut line) {
        Ok(_) => is_yes(&line),
        Err(_) => false,
    }
}

fn is_yes(line: &str) -> bool {
    matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
