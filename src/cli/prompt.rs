//! Interactive confirmation for destructive commands

use dialoguer::theme::ColorfulTheme;
use dialoguer::Confirm as ConfirmPrompt;

use crate::error::{GastosError, GastosResult};
use crate::services::Confirm;

/// Asks on the terminal, defaulting to "no"
pub struct DialoguerConfirm {
    theme: ColorfulTheme,
}

impl DialoguerConfirm {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for DialoguerConfirm {
    fn default() -> Self {
        Self::new()
    }
}

impl Confirm for DialoguerConfirm {
    fn confirm(&self, prompt: &str) -> GastosResult<bool> {
        ConfirmPrompt::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(|e| GastosError::Io(format!("Confirmation prompt failed: {}", e)))
    }
}
