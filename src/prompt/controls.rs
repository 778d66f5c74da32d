//! Concrete interactions backing a [`Prompter`](super::Prompter)
//!
//! Each control turns one of the provider interfaces into an [`Interaction`]:
//! it builds the provider configuration, applies the progress step and the
//! recent item, and maps the provider's raw answer (an index, a string) back to
//! the value the caller asked for.

use super::interface::*;
use super::{Interaction, PromptResult};
use crate::constants::validation::MAX_ATTEMPTS;
use crate::error::{Error, Result};
use std::rc::Rc;

/// Validates a text answer, returning the message to show when it is rejected.
pub type TextValidator = Box<dyn Fn(&str) -> std::result::Result<(), String>>;

/// Free text input.
pub struct InputPrompter {
    provider: Rc<dyn PromptProvider>,
    config: TextPromptConfig,
    validator: Option<TextValidator>,
    recent: Option<String>,
}

impl InputPrompter {
    pub fn new(provider: Rc<dyn PromptProvider>, prompt: &str) -> Self {
        Self {
            provider,
            config: TextPromptConfig {
                prompt: prompt.to_string(),
                default: None,
                secret: None,
                step: None,
            },
            validator: None,
            recent: None,
        }
    }

    pub fn with_default(mut self, default: &str) -> Self {
        self.config.default = Some(default.to_string());
        self
    }

    /// Hides the input. Secret prompts never pre-fill the recent answer.
    pub fn secret(mut self, confirm: bool) -> Self {
        self.config.secret = Some(SecretConfig { confirm, mismatch_error: String::new() });
        self
    }

    pub fn with_validator(
        mut self,
        validator: impl Fn(&str) -> std::result::Result<(), String> + 'static,
    ) -> Self {
        self.validator = Some(Box::new(validator));
        self
    }

    fn current_config(&self) -> TextPromptConfig {
        let mut config = self.config.clone();
        if config.secret.is_none() {
            if let Some(recent) = &self.recent {
                config.default = Some(recent.clone());
            }
        }
        config
    }
}

impl Interaction for InputPrompter {
    type Output = String;

    fn prompt_user(&mut self) -> Result<PromptResult<String>> {
        let config = self.current_config();
        let mut attempts = 0;
        loop {
            let answer = match self.provider.prompt_text(&config)? {
                PromptResult::Value(answer) => answer,
                PromptResult::Cancelled => return Ok(PromptResult::Cancelled),
            };

            let Some(validator) = &self.validator else {
                self.recent = Some(answer.clone());
                return Ok(PromptResult::Value(answer));
            };

            match validator(&answer) {
                Ok(()) => {
                    self.recent = Some(answer.clone());
                    return Ok(PromptResult::Value(answer));
                }
                Err(message) => {
                    attempts += 1;
                    log::warn!("Rejected answer for '{}': {}", config.prompt, message);
                    if attempts >= MAX_ATTEMPTS {
                        return Err(Error::ValidationError(message));
                    }
                    eprintln!("{message}");
                }
            }
        }
    }

    fn set_steps(&mut self, current: usize, total: usize) {
        self.config.step = Some(StepInfo::new(current, total));
    }

    fn recent_item(&self) -> Option<&String> {
        self.recent.as_ref()
    }

    fn set_recent_item(&mut self, item: String) {
        self.recent = Some(item);
    }
}

/// One entry of a pick list: what the user sees and what the prompt yields.
#[derive(Debug, Clone, PartialEq)]
pub struct PickItem<T> {
    pub label: String,
    pub data: T,
}

impl<T> PickItem<T> {
    pub fn new(label: impl Into<String>, data: T) -> Self {
        Self { label: label.into(), data }
    }
}

fn labels<T>(items: &[PickItem<T>]) -> Vec<String> {
    items.iter().map(|item| item.label.clone()).collect()
}

fn item_at<T: Clone>(items: &[PickItem<T>], index: usize, prompt: &str) -> Result<T> {
    items.get(index).map(|item| item.data.clone()).ok_or_else(|| {
        Error::ValidationError(format!("selection {index} is out of range for '{prompt}'"))
    })
}

/// Single selection from a list of items.
pub struct PickPrompter<T> {
    provider: Rc<dyn PromptProvider>,
    prompt: String,
    items: Vec<PickItem<T>>,
    default_index: Option<usize>,
    step: Option<StepInfo>,
    recent: Option<T>,
}

impl<T: Clone + PartialEq + 'static> PickPrompter<T> {
    pub fn new(provider: Rc<dyn PromptProvider>, prompt: &str, items: Vec<PickItem<T>>) -> Self {
        Self {
            provider,
            prompt: prompt.to_string(),
            items,
            default_index: None,
            step: None,
            recent: None,
        }
    }

    pub fn with_default_index(mut self, index: usize) -> Self {
        self.default_index = Some(index);
        self
    }

    /// The recent item wins over the configured default.
    fn selected_index(&self) -> Option<usize> {
        self.recent
            .as_ref()
            .and_then(|recent| self.items.iter().position(|item| &item.data == recent))
            .or(self.default_index)
    }
}

impl<T: Clone + PartialEq + 'static> Interaction for PickPrompter<T> {
    type Output = T;

    fn prompt_user(&mut self) -> Result<PromptResult<T>> {
        if self.items.is_empty() {
            return Err(Error::ValidationError(format!("no items to pick for '{}'", self.prompt)));
        }

        let config = SingleChoiceConfig {
            prompt: self.prompt.clone(),
            choices: labels(&self.items),
            default_index: self.selected_index(),
            step: self.step,
        };

        match self.provider.prompt_single_choice(&config)? {
            PromptResult::Value(index) => {
                let data = item_at(&self.items, index, &self.prompt)?;
                self.recent = Some(data.clone());
                Ok(PromptResult::Value(data))
            }
            PromptResult::Cancelled => Ok(PromptResult::Cancelled),
        }
    }

    fn set_steps(&mut self, current: usize, total: usize) {
        self.step = Some(StepInfo::new(current, total));
    }

    fn recent_item(&self) -> Option<&T> {
        self.recent.as_ref()
    }

    fn set_recent_item(&mut self, item: T) {
        self.recent = Some(item);
    }
}

/// Multiple selection from a list of items.
pub struct MultiPickPrompter<T> {
    provider: Rc<dyn PromptProvider>,
    prompt: String,
    items: Vec<PickItem<T>>,
    step: Option<StepInfo>,
    recent: Option<Vec<T>>,
}

impl<T: Clone + PartialEq + 'static> MultiPickPrompter<T> {
    pub fn new(provider: Rc<dyn PromptProvider>, prompt: &str, items: Vec<PickItem<T>>) -> Self {
        Self { provider, prompt: prompt.to_string(), items, step: None, recent: None }
    }
}

impl<T: Clone + PartialEq + 'static> Interaction for MultiPickPrompter<T> {
    type Output = Vec<T>;

    fn prompt_user(&mut self) -> Result<PromptResult<Vec<T>>> {
        let defaults = self
            .items
            .iter()
            .map(|item| self.recent.as_ref().is_some_and(|recent| recent.contains(&item.data)))
            .collect();

        let config = MultipleChoiceConfig {
            prompt: self.prompt.clone(),
            choices: labels(&self.items),
            defaults,
            step: self.step,
        };

        match self.provider.prompt_multiple_choice(&config)? {
            PromptResult::Value(indices) => {
                let selected = indices
                    .into_iter()
                    .map(|index| item_at(&self.items, index, &self.prompt))
                    .collect::<Result<Vec<T>>>()?;
                self.recent = Some(selected.clone());
                Ok(PromptResult::Value(selected))
            }
            PromptResult::Cancelled => Ok(PromptResult::Cancelled),
        }
    }

    fn set_steps(&mut self, current: usize, total: usize) {
        self.step = Some(StepInfo::new(current, total));
    }

    fn recent_item(&self) -> Option<&Vec<T>> {
        self.recent.as_ref()
    }

    fn set_recent_item(&mut self, item: Vec<T>) {
        self.recent = Some(item);
    }
}

/// Yes/no confirmation.
pub struct ConfirmPrompter {
    provider: Rc<dyn PromptProvider>,
    config: ConfirmationConfig,
    recent: Option<bool>,
}

impl ConfirmPrompter {
    pub fn new(provider: Rc<dyn PromptProvider>, prompt: &str, default: bool) -> Self {
        Self {
            provider,
            config: ConfirmationConfig { prompt: prompt.to_string(), default, step: None },
            recent: None,
        }
    }
}

impl Interaction for ConfirmPrompter {
    type Output = bool;

    fn prompt_user(&mut self) -> Result<PromptResult<bool>> {
        let mut config = self.config.clone();
        if let Some(recent) = self.recent {
            config.default = recent;
        }
        let result = self.provider.prompt_confirmation(&config)?;
        if let PromptResult::Value(answer) = result {
            self.recent = Some(answer);
        }
        Ok(result)
    }

    fn set_steps(&mut self, current: usize, total: usize) {
        self.config.step = Some(StepInfo::new(current, total));
    }

    fn recent_item(&self) -> Option<&bool> {
        self.recent.as_ref()
    }

    fn set_recent_item(&mut self, item: bool) {
        self.recent = Some(item);
    }
}

/// Answers with a precomputed outcome without asking anybody.
///
/// Used for steps whose answer is already known (flags, non-interactive runs)
/// so they still flow through the same transform/after chain.
pub struct StaticPrompter<T> {
    outcome: Option<PromptResult<T>>,
}

impl<T: 'static> StaticPrompter<T> {
    pub fn new(outcome: PromptResult<T>) -> Self {
        Self { outcome: Some(outcome) }
    }

    pub fn value(value: T) -> Self {
        Self::new(PromptResult::Value(value))
    }
}

impl<T: 'static> Interaction for StaticPrompter<T> {
    type Output = T;

    fn prompt_user(&mut self) -> Result<PromptResult<T>> {
        Ok(self.outcome.take().unwrap_or(PromptResult::Cancelled))
    }
}
