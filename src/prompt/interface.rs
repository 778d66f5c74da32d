//! Pure interfaces for prompting without external dependencies
//!
//! These traits describe what a UI must offer to back the prompt controls. They
//! are independent of any terminal library, and every one of them can report a
//! cancellation instead of an answer.

use super::PromptResult;
use crate::error::Result;
use std::fmt;

/// Position of a prompt inside an enclosing flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepInfo {
    pub current: usize,
    pub total: usize,
}

impl StepInfo {
    pub fn new(current: usize, total: usize) -> Self {
        Self { current, total: total.max(current) }
    }
}

impl fmt::Display for StepInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}/{}]", self.current, self.total)
    }
}

/// Configuration for text input prompts
#[derive(Debug, Clone)]
pub struct TextPromptConfig {
    pub prompt: String,
    pub default: Option<String>,
    pub secret: Option<SecretConfig>,
    pub step: Option<StepInfo>,
}

/// Configuration for password/secret input
#[derive(Debug, Clone)]
pub struct SecretConfig {
    pub confirm: bool,
    pub mismatch_error: String,
}

/// Configuration for single choice selection
#[derive(Debug, Clone)]
pub struct SingleChoiceConfig {
    pub prompt: String,
    pub choices: Vec<String>,
    pub default_index: Option<usize>,
    pub step: Option<StepInfo>,
}

/// Configuration for multiple choice selection
#[derive(Debug, Clone)]
pub struct MultipleChoiceConfig {
    pub prompt: String,
    pub choices: Vec<String>,
    pub defaults: Vec<bool>,
    pub step: Option<StepInfo>,
}

/// Configuration for boolean confirmation
#[derive(Debug, Clone)]
pub struct ConfirmationConfig {
    pub prompt: String,
    pub default: bool,
    pub step: Option<StepInfo>,
}

/// Abstract interface for text input prompts
pub trait TextPrompter {
    fn prompt_text(&self, config: &TextPromptConfig) -> Result<PromptResult<String>>;
}

/// Abstract interface for single choice selection
pub trait SingleChoicePrompter {
    fn prompt_single_choice(&self, config: &SingleChoiceConfig)
        -> Result<PromptResult<usize>>;
}

/// Abstract interface for multiple choice selection
pub trait MultipleChoicePrompter {
    fn prompt_multiple_choice(
        &self,
        config: &MultipleChoiceConfig,
    ) -> Result<PromptResult<Vec<usize>>>;
}

/// Abstract interface for boolean confirmation
pub trait ConfirmationPrompter {
    fn prompt_confirmation(&self, config: &ConfirmationConfig) -> Result<PromptResult<bool>>;
}

/// Combined interface that provides all prompt types
pub trait PromptProvider:
    TextPrompter + SingleChoicePrompter + MultipleChoicePrompter + ConfirmationPrompter
{
}

// Blanket implementation for any type that implements all prompt interfaces
impl<T> PromptProvider for T where
    T: TextPrompter + SingleChoicePrompter + MultipleChoicePrompter + ConfirmationPrompter
{
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_info_never_reports_total_below_current() {
        let step = StepInfo::new(4, 3);
        assert_eq!(step.total, 4);
        assert_eq!(step.to_string(), "[4/4]");
        assert_eq!(StepInfo::new(1, 3).to_string(), "[1/3]");
    }
}
