//! Line-oriented terminal front end.

use std::io::Write;

use ddi_checker_core::labels;
use ddi_checker_core::{
    ConnectivityState, Drug, ResultsPanel, StatusIndicator, SuggestionList, View,
};
use thiserror::Error;
use tracing::warn;

use crate::session::UiEvent;

pub const USAGE: &str = "commands: type <text> | pick <n> | remove <name> | clear | check | health | help | quit";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CliError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Missing argument for {0}")]
    MissingArgument(&'static str),

    #[error("Invalid suggestion number: {0}")]
    BadIndex(String),
}

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Event(UiEvent),
    Help,
    Quit,
}

impl Command {
    /// Parse one line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, CliError> {
        let line = line.trim_end_matches(['\r', '\n']);
        let trimmed = line.trim_start();
        if trimmed.trim().is_empty() {
            return Ok(None);
        }
        let (word, rest) = match trimmed.split_once(' ') {
            Some((word, rest)) => (word, rest),
            None => (trimmed, ""),
        };

        let command = match word {
            // The rest of the line is the raw input box contents
            "type" => Command::Event(UiEvent::Input(rest.to_string())),
            "pick" => {
                let raw = rest.trim();
                if raw.is_empty() {
                    return Err(CliError::MissingArgument("pick"));
                }
                // Suggestions are numbered from 1 on screen
                match raw.parse::<usize>() {
                    Ok(n) if n >= 1 => Command::Event(UiEvent::Pick(n - 1)),
                    _ => return Err(CliError::BadIndex(raw.to_string())),
                }
            }
            "remove" => {
                let name = rest.trim();
                if name.is_empty() {
                    return Err(CliError::MissingArgument("remove"));
                }
                Command::Event(UiEvent::Remove(name.to_string()))
            }
            "clear" => Command::Event(UiEvent::Clear),
            "check" => Command::Event(UiEvent::Check),
            "health" => Command::Event(UiEvent::Probe),
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(CliError::UnknownCommand(other.to_string())),
        };
        Ok(Some(command))
    }
}

/// [`View`] that prints each update as text.
pub struct TerminalView<W: Write> {
    out: W,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{text}").and_then(|_| self.out.flush()) {
            warn!(error = %e, "Failed to write to terminal");
        }
    }
}

impl<W: Write> View for TerminalView<W> {
    fn render_selection(&mut self, drugs: &[Drug]) {
        let line = if drugs.is_empty() {
            "selected: (none)".to_string()
        } else {
            let tags: Vec<String> = drugs.iter().map(|d| format!("[{} ×]", d.name)).collect();
            format!("selected: {}", tags.join(" "))
        };
        self.emit(&line);
    }

    fn set_check_enabled(&mut self, enabled: bool) {
        self.emit(if enabled { "check: enabled" } else { "check: disabled" });
    }

    fn render_suggestions(&mut self, list: &SuggestionList) {
        let mut text = String::from("suggestions:");
        let entries = list.entries();
        if entries.is_empty() {
            text.push_str(" (none)");
        }
        for (i, entry) in entries.iter().enumerate() {
            if entry.selectable {
                text.push_str(&format!("\n  {}. {}", i + 1, entry.label));
            } else {
                text.push_str(&format!("\n  - {}", entry.label));
            }
        }
        self.emit(&text);
    }

    fn clear_input(&mut self) {
        self.emit("input: (cleared)");
    }

    fn set_loading(&mut self, visible: bool) {
        if visible {
            self.emit("checking...");
        }
    }

    fn render_results(&mut self, results: &ResultsPanel) {
        match results {
            ResultsPanel::Empty => {}
            ResultsPanel::Cards(cards) => {
                for card in cards {
                    let text = format!(
                        "[{}] {}\n    {} {}\n    {} {}",
                        card.css_class,
                        card.title(),
                        labels::DESCRIPTION_HEADING,
                        card.description_th,
                        labels::ENGLISH_HEADING,
                        card.description,
                    );
                    self.emit(&text);
                }
            }
            other => {
                if let Some((label, class)) = other.placeholder() {
                    self.emit(&format!("[{class}] {label}"));
                }
            }
        }
    }

    fn render_status(&mut self, status: &StatusIndicator) {
        let dot = match status.state {
            ConnectivityState::Connected => "●",
            ConnectivityState::Error => "✕",
            ConnectivityState::Unknown => "○",
        };
        self.emit(&format!("status: {dot} {}", status.text));
    }
}
