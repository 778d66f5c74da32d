//! Multi-step flows built from [`Prompter`]s
//!
//! A [`Wizard`] asks its steps in order and stores each answer under the
//! step's field name. Cancelling a prompt steps back to the previous answered
//! step; cancelling the first one aborts the flow. Answers are cached per
//! field so a step asked again after going back can offer the previous answer.

use crate::{
    error::Result,
    prompt::{PromptResult, Prompter},
};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::rc::Rc;

/// Extra wizard steps implied by a response (may be negative).
pub type StepEstimator<T> = Rc<dyn Fn(&T) -> isize>;

/// Builds the prompter of a step, or `None` to skip the step.
pub type StepProvider = Box<dyn Fn(&StepContext) -> Option<Prompter<Value>>>;

/// What a step provider can see when building its prompter.
pub struct StepContext<'a> {
    pub answers: &'a Map<String, Value>,
    /// Answer given to this step before the user navigated back, if any.
    pub recent: Option<&'a Value>,
}

pub struct WizardStep {
    field: String,
    provider: StepProvider,
    estimator: Option<StepEstimator<Value>>,
}

impl WizardStep {
    pub fn new(
        field: &str,
        provider: impl Fn(&StepContext) -> Option<Prompter<Value>> + 'static,
    ) -> Self {
        Self { field: field.to_string(), provider: Box::new(provider), estimator: None }
    }

    pub fn with_estimator(mut self, estimator: impl Fn(&Value) -> isize + 'static) -> Self {
        self.estimator = Some(Rc::new(estimator));
        self
    }

    pub fn field(&self) -> &str {
        &self.field
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WizardOutcome {
    Completed(Map<String, Value>),
    Cancelled,
}

/// An answered step, kept so the flow can walk back.
struct Answered {
    index: usize,
    estimate: isize,
}

#[derive(Default)]
pub struct Wizard {
    steps: Vec<WizardStep>,
}

impl Wizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(mut self, step: WizardStep) -> Self {
        self.steps.push(step);
        self
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Declared steps not skipped so far, plus the estimates of the answered ones.
    fn total_steps(&self, history: &[Answered], skipped: usize, current: usize) -> usize {
        let estimated: isize = history.iter().map(|answered| answered.estimate).sum();
        let total = (self.steps.len() - skipped) as isize + estimated;
        (total.max(0) as usize).max(current)
    }

    pub fn run(&self) -> Result<WizardOutcome> {
        let mut answers = Map::new();
        let mut cache: HashMap<String, Value> = HashMap::new();
        let mut history: Vec<Answered> = Vec::new();
        let mut skipped: Vec<usize> = Vec::new();
        let mut index = 0;

        while index < self.steps.len() {
            let step = &self.steps[index];
            let context = StepContext { answers: &answers, recent: cache.get(&step.field) };

            let Some(mut prompter) = (step.provider)(&context) else {
                log::debug!("Skipping wizard step '{}'", step.field);
                skipped.push(index);
                index += 1;
                continue;
            };

            let current = history.len() + 1;
            prompter.set_steps(current, self.total_steps(&history, skipped.len(), current));
            if let Some(estimator) = &step.estimator {
                prompter.set_step_estimator(estimator.clone());
            }

            match prompter.prompt()? {
                PromptResult::Value(value) => {
                    log::debug!("Wizard step '{}' answered", step.field);
                    answers.insert(step.field.clone(), value.clone());
                    cache.insert(step.field.clone(), value);
                    history.push(Answered {
                        index,
                        estimate: prompter.step_estimate().unwrap_or(0),
                    });
                    index += 1;
                }
                PromptResult::Cancelled => match history.pop() {
                    Some(previous) => {
                        let field = &self.steps[previous.index].field;
                        log::debug!("Stepping back to wizard step '{field}'");
                        answers.remove(field);
                        // later steps are decided again from the remaining answers
                        skipped.retain(|&skipped_index| skipped_index < previous.index);
                        index = previous.index;
                    }
                    None => {
                        log::info!("Wizard cancelled");
                        return Ok(WizardOutcome::Cancelled);
                    }
                },
            }
        }

        Ok(WizardOutcome::Completed(answers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::prompt::{Interaction, StaticPrompter};
    use serde_json::json;
    use std::cell::RefCell;

    /// Hands out scripted outcomes and records the step info each prompt saw.
    #[derive(Clone, Default)]
    struct Script {
        outcomes: Rc<RefCell<Vec<PromptResult<Value>>>>,
        seen_steps: Rc<RefCell<Vec<(usize, usize)>>>,
        seen_recent: Rc<RefCell<Vec<Option<Value>>>>,
    }

    struct ScriptedStep {
        script: Script,
    }

    impl Interaction for ScriptedStep {
        type Output = Value;

        fn prompt_user(&mut self) -> Result<PromptResult<Value>> {
            let mut outcomes = self.script.outcomes.borrow_mut();
            if outcomes.is_empty() {
                return Err(Error::ValidationError("script exhausted".into()));
            }
            Ok(outcomes.remove(0))
        }

        fn set_steps(&mut self, current: usize, total: usize) {
            self.script.seen_steps.borrow_mut().push((current, total));
        }
    }

    impl Script {
        fn new(outcomes: Vec<PromptResult<Value>>) -> Self {
            Self { outcomes: Rc::new(RefCell::new(outcomes)), ..Default::default() }
        }

        fn step(&self, field: &str) -> WizardStep {
            let script = self.clone();
            WizardStep::new(field, move |context| {
                script.seen_recent.borrow_mut().push(context.recent.cloned());
                Some(ScriptedStep { script: script.clone() }.into_prompter())
            })
        }
    }

    fn value(v: Value) -> PromptResult<Value> {
        PromptResult::Value(v)
    }

    #[test]
    fn stores_answers_under_field_names() {
        let script = Script::new(vec![value(json!("dev")), value(json!(3))]);
        let wizard = Wizard::new().step(script.step("profile")).step(script.step("count"));

        let outcome = wizard.run().unwrap();
        let expected = json!({"profile": "dev", "count": 3});
        assert_eq!(outcome, WizardOutcome::Completed(expected.as_object().unwrap().clone()));
        assert_eq!(*script.seen_steps.borrow(), vec![(1, 2), (2, 2)]);
    }

    #[test]
    fn cancel_on_first_step_aborts() {
        let script = Script::new(vec![PromptResult::Cancelled]);
        let wizard = Wizard::new().step(script.step("a")).step(script.step("b"));
        assert_eq!(wizard.run().unwrap(), WizardOutcome::Cancelled);
    }

    #[test]
    fn cancel_steps_back_and_offers_previous_answer() {
        let script = Script::new(vec![
            value(json!("first")),
            PromptResult::Cancelled,
            value(json!("second")),
            value(json!("b")),
        ]);
        let wizard = Wizard::new().step(script.step("a")).step(script.step("b"));

        let outcome = wizard.run().unwrap();
        let WizardOutcome::Completed(answers) = outcome else { panic!("expected completion") };
        assert_eq!(answers["a"], json!("second"));
        assert_eq!(answers["b"], json!("b"));
        assert_eq!(
            *script.seen_recent.borrow(),
            vec![None, None, Some(json!("first")), None]
        );
    }

    #[test]
    fn skipped_steps_are_not_counted_as_answered() {
        let script = Script::new(vec![value(json!(true))]);
        let wizard = Wizard::new()
            .step(WizardStep::new("skipped", |_| None))
            .step(script.step("asked"));
        let WizardOutcome::Completed(answers) = wizard.run().unwrap() else {
            panic!("expected completion")
        };
        assert!(!answers.contains_key("skipped"));
        assert_eq!(*script.seen_steps.borrow(), vec![(1, 1)]);
    }

    #[test]
    fn skipped_steps_leave_the_total_once_reached() {
        let script = Script::new(vec![value(json!(false)), value(json!("x"))]);
        let wizard = Wizard::new()
            .step(script.step("enabled"))
            .step(WizardStep::new("details", |context| {
                if context.answers["enabled"] == json!(true) {
                    Some(StaticPrompter::value(json!("d")).into_prompter())
                } else {
                    None
                }
            }))
            .step(script.step("last"));

        wizard.run().unwrap();
        assert_eq!(*script.seen_steps.borrow(), vec![(1, 3), (2, 2)]);
    }

    #[test]
    fn stepping_back_reconsiders_skipped_steps() {
        let script = Script::new(vec![
            value(json!(false)),
            PromptResult::Cancelled,
            value(json!(true)),
            value(json!("x")),
        ]);
        let wizard = Wizard::new()
            .step(script.step("enabled"))
            .step(WizardStep::new("details", |context| {
                if context.answers["enabled"] == json!(true) {
                    Some(StaticPrompter::value(json!("d")).into_prompter())
                } else {
                    None
                }
            }))
            .step(script.step("last"));

        let WizardOutcome::Completed(answers) = wizard.run().unwrap() else {
            panic!("expected completion")
        };
        assert_eq!(answers["details"], json!("d"));
        assert_eq!(
            *script.seen_steps.borrow(),
            vec![(1, 3), (2, 2), (1, 3), (3, 3)]
        );
    }

    #[test]
    fn providers_see_earlier_answers() {
        let wizard = Wizard::new()
            .step(WizardStep::new("name", |_| {
                Some(StaticPrompter::value(json!("svc")).into_prompter())
            }))
            .step(WizardStep::new("greeting", |context| {
                let name = context.answers["name"].as_str().unwrap_or_default().to_string();
                Some(
                    StaticPrompter::value(name)
                        .into_prompter()
                        .transform(|name| json!(format!("hello {name}"))),
                )
            }));
        let WizardOutcome::Completed(answers) = wizard.run().unwrap() else {
            panic!("expected completion")
        };
        assert_eq!(answers["greeting"], json!("hello svc"));
    }

    #[test]
    fn estimates_grow_the_total() {
        let script = Script::new(vec![value(json!(2)), value(json!("x")), value(json!("y"))]);
        let wizard = Wizard::new()
            .step(script.step("extra").with_estimator(|v| v.as_i64().unwrap_or(0) as isize))
            .step(script.step("b"))
            .step(script.step("c"));
        wizard.run().unwrap();
        assert_eq!(*script.seen_steps.borrow(), vec![(1, 3), (2, 5), (3, 5)]);
    }

    #[test]
    fn prompter_errors_abort_the_flow() {
        let script = Script::new(vec![]);
        let wizard = Wizard::new().step(script.step("a"));
        assert!(wizard.run().is_err());
    }
}
