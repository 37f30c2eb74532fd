//! Input handler for REPL using rustyline
//!
//! Line editing with optional persistent history.

use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;

/// Default prompt
pub const PROMPT: &str = ">ragchat: ";

/// Input handler managing the readline interface and command history
pub struct InputHandler {
    editor: DefaultEditor,
    history_path: Option<PathBuf>,
    prompt: String,
}

impl InputHandler {
    /// Create new input handler
    pub fn new() -> Result<Self> {
        Ok(InputHandler {
            editor: DefaultEditor::new()?,
            history_path: None,
            prompt: PROMPT.to_string(),
        })
    }

    /// Create input handler with persistent history
    pub fn with_history(history_file: PathBuf) -> Result<Self> {
        let mut editor = DefaultEditor::new()?;

        if history_file.exists() {
            let _ = editor.load_history(&history_file);
        }

        Ok(InputHandler {
            editor,
            history_path: Some(history_file),
            prompt: PROMPT.to_string(),
        })
    }

    /// Read a line of input from user
    ///
    /// Returns:
    /// - Ok(Some(input)) for normal input (empty string for a blank line)
    /// - Ok(None) for EOF (Ctrl-D) or interrupt (Ctrl-C)
    /// - Err on other readline errors
    pub fn read_line(&mut self) -> Result<Option<String>> {
        match self.editor.readline(&self.prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if !trimmed.is_empty() {
                    let _ = self.editor.add_history_entry(trimmed);
                }
                Ok(Some(trimmed.to_string()))
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(err) => Err(anyhow::anyhow!("Readline error: {}", err)),
        }
    }

    /// Save history to disk
    pub fn save_history(&mut self) -> Result<()> {
        if let Some(ref path) = self.history_path {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            self.editor.save_history(path)?;
        }
        Ok(())
    }

    pub fn history_path(&self) -> Option<&PathBuf> {
        self.history_path.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_input_handler_with_history() {
        let temp_dir = TempDir::new().unwrap();
        let history_path = temp_dir.path().join("history");

        let handler = InputHandler::with_history(history_path.clone());
        assert!(handler.is_ok());
        assert_eq!(handler.unwrap().history_path(), Some(&history_path));
    }

    #[test]
    fn test_save_history_creates_parent() {
        let temp_dir = TempDir::new().unwrap();
        let history_path = temp_dir.path().join("nested").join("history");

        let mut handler = InputHandler::with_history(history_path.clone()).unwrap();
        handler.save_history().unwrap();
        assert!(history_path.parent().unwrap().exists());
    }
}
