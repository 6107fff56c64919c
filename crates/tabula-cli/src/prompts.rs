//! Interactive prompts over form controls

use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};
use tabula_core::store::Confirmer;
use tabula_core::error::ResultExt;
use tabula_core::{Control, TabulaResult, Widget};

/// Asks on the terminal before destructive actions
pub struct TerminalConfirmer;

impl Confirmer for TerminalConfirmer {
    fn confirm(&self, prompt: &str) -> bool {
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .default(false)
            .interact()
            .unwrap_or(false)
    }
}

/// Confirmer for `--yes`
pub struct AssumeYes;

impl Confirmer for AssumeYes {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

/// Ask for a value for one control
pub fn prompt_control(control: &Control) -> TabulaResult<String> {
    let theme = ColorfulTheme::default();
    match &control.widget {
        Widget::TextInput { value } => prompt_text(&control.label, value),
        Widget::Selector { options, selected } => {
            let default = selected
                .as_ref()
                .and_then(|s| options.iter().position(|o| o == s))
                .unwrap_or(0);
            let index = Select::with_theme(&theme)
                .with_prompt(&control.label)
                .items(options)
                .default(default)
                .interact()
                .context("prompt failed")?;
            Ok(options[index].clone())
        }
    }
}

/// Ask for free text, starting from the current value
pub fn prompt_text(label: &str, current: &str) -> TabulaResult<String> {
    Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt(label)
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()
        .context("prompt failed")
}

/// Ask a yes/no question
pub fn confirm(prompt: &str) -> TabulaResult<bool> {
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(true)
        .interact()
        .context("prompt failed")
}
