//! Terminal implementations of the user-facing collaborator traits.

use std::path::PathBuf;

use apdesk_core::document::{ReplacementPicker, UploadedDocument};
use apdesk_core::error::{DeskError, Result};
use apdesk_core::notification::{Confirmer, Notification, NotificationLevel, Notifier};
use apdesk_infrastructure::PresetPicker;
use async_trait::async_trait;
use colored::Colorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

fn label(level: NotificationLevel) -> &'static str {
    match level {
        NotificationLevel::Success => "ok",
        NotificationLevel::Info => "info",
        NotificationLevel::Error => "error",
        NotificationLevel::Alert => "alert",
    }
}

/// Prints notifications as single colored lines.
///
/// Alerts block until the user presses Enter when `interactive` is set.
pub struct TerminalNotifier {
    interactive: bool,
}

impl TerminalNotifier {
    pub fn new(interactive: bool) -> Self {
        Self { interactive }
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: Notification) {
        let line = format!("[{}] {}", label(notification.level), notification.message);
        match notification.level {
            NotificationLevel::Success => println!("{}", line.green()),
            NotificationLevel::Info => println!("{}", line.bright_blue()),
            NotificationLevel::Error => eprintln!("{}", line.red()),
            NotificationLevel::Alert => {
                eprintln!("{}", line.red().bold());
                if self.interactive {
                    acknowledge();
                }
            }
        }
    }
}

fn acknowledge() {
    if let Ok(mut rl) = DefaultEditor::new() {
        let _ = rl.readline(&format!("{}", "Press Enter to continue".bright_black()));
    }
}

/// Yes/no prompt on the terminal. `assume_yes` skips the question.
pub struct PromptConfirmer {
    assume_yes: bool,
}

impl PromptConfirmer {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

impl Confirmer for PromptConfirmer {
    fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                tracing::warn!("Cannot prompt for confirmation: {}", e);
                return false;
            }
        };
        match rl.readline(&format!("{} [y/N] ", prompt.yellow())) {
            Ok(answer) => is_yes(&answer),
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => false,
            Err(e) => {
                tracing::warn!("Confirmation prompt failed: {}", e);
                false
            }
        }
    }
}

/// Asks for the path of an edited PDF; an empty answer declines.
pub struct InteractivePicker;

fn read_path(prompt: String) -> Result<Option<PathBuf>> {
    let mut rl = DefaultEditor::new()
        .map_err(|e| DeskError::internal(format!("Cannot open prompt: {}", e)))?;
    match rl.readline(&prompt) {
        Ok(line) if line.trim().is_empty() => Ok(None),
        Ok(line) => Ok(Some(PathBuf::from(line.trim()))),
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
        Err(e) => Err(DeskError::internal(format!("Prompt failed: {}", e))),
    }
}

#[async_trait]
impl ReplacementPicker for InteractivePicker {
    async fn pick(&self, accept: &str) -> Result<Option<UploadedDocument>> {
        let prompt = format!(
            "{} ",
            format!("Upload an edited {} instead? Path (empty to skip):", accept).bright_magenta()
        );
        let path = tokio::task::spawn_blocking(move || read_path(prompt))
            .await
            .map_err(|e| DeskError::internal(format!("Failed to join task: {}", e)))??;
        PresetPicker::new(path).pick(accept).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_yes() {
        assert!(is_yes("y"));
        assert!(is_yes(" YES \n"));
        assert!(!is_yes(""));
        assert!(!is_yes("no"));
    }

    #[test]
    fn test_assume_yes_skips_prompt() {
        assert!(PromptConfirmer::new(true).confirm("Delete?"));
    }

    #[test]
    fn test_labels() {
        assert_eq!(label(NotificationLevel::Alert), "alert");
        assert_eq!(label(NotificationLevel::Success), "ok");
    }
}
