//! Alternative prompt provider answering from a script
//!
//! Answers are queued per prompt text and consumed in order, so a flow that
//! asks the same question twice (after stepping back, for example) can get a
//! different answer each time. Unscripted prompts fall back to the defaults of
//! their configuration, then to the provider-wide defaults.

use super::interface::*;
use super::PromptResult;
use crate::error::{Error, Result};
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

#[derive(Debug, Clone, PartialEq)]
enum Scripted {
    Text(String),
    Choice(usize),
    Choices(Vec<usize>),
    Confirmation(bool),
    Cancel,
}

/// Automatic prompt provider that gives predefined responses
/// Useful for automation, testing, or CI/CD environments
#[derive(Debug)]
pub struct AutomaticPrompter {
    responses: RefCell<HashMap<String, VecDeque<Scripted>>>,
    asked: RefCell<Vec<String>>,
    default_text: String,
    default_choice: usize,
    default_confirmation: bool,
}

impl AutomaticPrompter {
    pub fn new() -> Self {
        Self {
            responses: RefCell::new(HashMap::new()),
            asked: RefCell::new(Vec::new()),
            default_text: "auto".to_string(),
            default_choice: 0,
            default_confirmation: true,
        }
    }

    fn push(self, prompt: &str, response: Scripted) -> Self {
        self.responses
            .borrow_mut()
            .entry(prompt.to_string())
            .or_default()
            .push_back(response);
        self
    }

    /// Add a predefined text response for a specific prompt
    pub fn with_text_response(self, prompt: &str, response: &str) -> Self {
        self.push(prompt, Scripted::Text(response.to_string()))
    }

    /// Add a predefined choice response for a specific prompt
    pub fn with_choice_response(self, prompt: &str, choice_index: usize) -> Self {
        self.push(prompt, Scripted::Choice(choice_index))
    }

    /// Add a predefined multiple choice response for a specific prompt
    pub fn with_multiple_choice_response(
        self,
        prompt: &str,
        choice_indices: Vec<usize>,
    ) -> Self {
        self.push(prompt, Scripted::Choices(choice_indices))
    }

    /// Add a predefined confirmation response for a specific prompt
    pub fn with_confirmation_response(self, prompt: &str, response: bool) -> Self {
        self.push(prompt, Scripted::Confirmation(response))
    }

    /// Make the next ask of `prompt` cancel, whatever its kind
    pub fn with_cancellation(self, prompt: &str) -> Self {
        self.push(prompt, Scripted::Cancel)
    }

    /// Set default values for when no specific response is configured
    pub fn with_defaults(
        mut self,
        default_text: &str,
        default_choice: usize,
        default_confirmation: bool,
    ) -> Self {
        self.default_text = default_text.to_string();
        self.default_choice = default_choice;
        self.default_confirmation = default_confirmation;
        self
    }

    /// Prompts asked so far, in order
    pub fn asked(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }

    fn next(&self, prompt: &str) -> Option<Scripted> {
        self.asked.borrow_mut().push(prompt.to_string());
        self.responses.borrow_mut().get_mut(prompt).and_then(VecDeque::pop_front)
    }
}

impl Default for AutomaticPrompter {
    fn default() -> Self {
        Self::new()
    }
}

fn mismatch(prompt: &str, expected: &str, found: &Scripted) -> Error {
    Error::ValidationError(format!(
        "scripted answer for '{prompt}' should be {expected}, found {found:?}"
    ))
}

impl TextPrompter for AutomaticPrompter {
    fn prompt_text(&self, config: &TextPromptConfig) -> Result<PromptResult<String>> {
        let response = match self.next(&config.prompt) {
            Some(Scripted::Text(text)) => text,
            Some(Scripted::Cancel) => return Ok(PromptResult::Cancelled),
            Some(other) => return Err(mismatch(&config.prompt, "text", &other)),
            None => config.default.clone().unwrap_or_else(|| self.default_text.clone()),
        };

        log::info!("Auto-answering text prompt '{}'", config.prompt);
        Ok(PromptResult::Value(response))
    }
}

impl SingleChoicePrompter for AutomaticPrompter {
    fn prompt_single_choice(
        &self,
        config: &SingleChoiceConfig,
    ) -> Result<PromptResult<usize>> {
        let response = match self.next(&config.prompt) {
            Some(Scripted::Choice(index)) => index,
            Some(Scripted::Cancel) => return Ok(PromptResult::Cancelled),
            Some(other) => return Err(mismatch(&config.prompt, "a choice", &other)),
            None => config.default_index.unwrap_or(self.default_choice),
        };

        if response >= config.choices.len() {
            return Err(Error::ValidationError(format!(
                "choice {response} is out of range for '{}'",
                config.prompt
            )));
        }

        log::info!(
            "Auto-answering choice prompt '{}' with option {}: '{}'",
            config.prompt,
            response,
            config.choices[response]
        );
        Ok(PromptResult::Value(response))
    }
}

impl MultipleChoicePrompter for AutomaticPrompter {
    fn prompt_multiple_choice(
        &self,
        config: &MultipleChoiceConfig,
    ) -> Result<PromptResult<Vec<usize>>> {
        let response = match self.next(&config.prompt) {
            Some(Scripted::Choices(indices)) => indices,
            Some(Scripted::Cancel) => return Ok(PromptResult::Cancelled),
            Some(other) => return Err(mismatch(&config.prompt, "choices", &other)),
            // Default to selecting items that are marked as default
            None => config
                .defaults
                .iter()
                .enumerate()
                .filter_map(|(i, &selected)| if selected { Some(i) } else { None })
                .collect(),
        };

        log::info!(
            "Auto-answering multiple choice prompt '{}' with options: {:?}",
            config.prompt,
            response
        );
        Ok(PromptResult::Value(response))
    }
}

impl ConfirmationPrompter for AutomaticPrompter {
    fn prompt_confirmation(&self, config: &ConfirmationConfig) -> Result<PromptResult<bool>> {
        let response = match self.next(&config.prompt) {
            Some(Scripted::Confirmation(answer)) => answer,
            Some(Scripted::Cancel) => return Ok(PromptResult::Cancelled),
            Some(other) => return Err(mismatch(&config.prompt, "a confirmation", &other)),
            None => self.default_confirmation,
        };

        log::info!("Auto-answering confirmation '{}' with: {}", config.prompt, response);
        Ok(PromptResult::Value(response))
    }
}
