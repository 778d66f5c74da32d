//! Dialoguer-based implementations of prompt interfaces
//!
//! This module provides concrete implementations of the prompt interfaces
//! using the dialoguer library for terminal user interaction. Selections and
//! confirmations are cancellable with Esc or `q`; free text input is not.

use super::interface::{
    ConfirmationConfig, MultipleChoiceConfig, SecretConfig, SingleChoiceConfig, StepInfo,
    TextPromptConfig,
};
use super::PromptResult;
use crate::error::Result;
use dialoguer::{Confirm, Input, MultiSelect, Password, Select};

/// Dialoguer-based implementation of all prompt interfaces
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DialoguerPrompter {
    fn default() -> Self {
        Self::new()
    }
}

/// Prefixes the prompt with the step counter when the prompt is part of a flow.
fn with_step(prompt: &str, step: Option<StepInfo>) -> String {
    match step {
        Some(step) => format!("{step} {prompt}"),
        None => prompt.to_string(),
    }
}

impl super::interface::TextPrompter for DialoguerPrompter {
    fn prompt_text(&self, config: &TextPromptConfig) -> Result<PromptResult<String>> {
        let prompt = with_step(&config.prompt, config.step);
        let answer = if let Some(secret_config) = &config.secret {
            self.prompt_password(&prompt, secret_config)?
        } else {
            self.prompt_regular_text(&prompt, config.default.as_deref())?
        };
        Ok(PromptResult::Value(answer))
    }
}

impl super::interface::SingleChoicePrompter for DialoguerPrompter {
    fn prompt_single_choice(
        &self,
        config: &SingleChoiceConfig,
    ) -> Result<PromptResult<usize>> {
        let mut select = Select::new()
            .with_prompt(with_step(&config.prompt, config.step))
            .items(&config.choices);

        if let Some(default_index) = config.default_index {
            select = select.default(default_index);
        }

        Ok(select.interact_opt()?.into())
    }
}

impl super::interface::MultipleChoicePrompter for DialoguerPrompter {
    fn prompt_multiple_choice(
        &self,
        config: &MultipleChoiceConfig,
    ) -> Result<PromptResult<Vec<usize>>> {
        let indices = MultiSelect::new()
            .with_prompt(with_step(&config.prompt, config.step))
            .items(&config.choices)
            .defaults(&config.defaults)
            .interact_opt()?;

        Ok(indices.into())
    }
}

impl super::interface::ConfirmationPrompter for DialoguerPrompter {
    fn prompt_confirmation(&self, config: &ConfirmationConfig) -> Result<PromptResult<bool>> {
        let result = Confirm::new()
            .with_prompt(with_step(&config.prompt, config.step))
            .default(config.default)
            .interact_opt()?;

        Ok(result.into())
    }
}

impl DialoguerPrompter {
    /// Handle password input with optional confirmation
    fn prompt_password(&self, prompt: &str, secret_config: &SecretConfig) -> Result<String> {
        let mut password = Password::new().with_prompt(prompt);

        if secret_config.confirm {
            let error_message = if secret_config.mismatch_error.is_empty() {
                crate::constants::validation::PASSWORDS_MISMATCH.to_string()
            } else {
                secret_config.mismatch_error.clone()
            };

            password =
                password.with_confirmation(format!("{prompt} (confirm)"), error_message);
        }

        Ok(password.interact()?)
    }

    /// Handle regular text input
    fn prompt_regular_text(&self, prompt: &str, default: Option<&str>) -> Result<String> {
        let mut input = Input::<String>::new().with_prompt(prompt);
        if let Some(default) = default {
            input = input.default(default.to_string());
        }
        Ok(input.interact_text()?)
    }
}
