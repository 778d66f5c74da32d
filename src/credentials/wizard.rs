//! Wizard collecting a [`CredentialsProfile`]

use super::CredentialsProfile;
use crate::{
    constants::prompts::{ACCESS_KEY, PROFILE_NAME, SECRET_KEY},
    error::{Error, Result},
    prompt::{InputPrompter, Interaction, PromptProvider, Prompter},
    validation::{validate_access_key, validate_profile_name, validate_secret_key},
    wizard::{StepContext, Wizard, WizardStep},
};
use serde_json::{Map, Value};
use std::rc::Rc;

pub const PROFILE_NAME_FIELD: &str = "profile_name";
pub const ACCESS_KEY_FIELD: &str = "access_key";
pub const SECRET_KEY_FIELD: &str = "secret_key";

/// Turns a text input into a wizard-ready prompter, pre-seeded with the
/// answer given before the user navigated back.
fn text_step(input: InputPrompter, context: &StepContext) -> Prompter<Value> {
    let mut prompter = input.into_prompter();
    if let Some(Value::String(recent)) = context.recent {
        prompter.set_recent_item(recent.clone());
    }
    prompter.transform(Value::String)
}

/// Profile name, access key, then secret key.
pub fn credentials_wizard(provider: Rc<dyn PromptProvider>, default_profile: &str) -> Wizard {
    let default_profile = default_profile.to_string();
    let name_provider = provider.clone();
    let access_provider = provider.clone();
    let secret_provider = provider;

    Wizard::new()
        .step(WizardStep::new(PROFILE_NAME_FIELD, move |context| {
            let input = InputPrompter::new(name_provider.clone(), PROFILE_NAME)
                .with_default(&default_profile)
                .with_validator(validate_profile_name);
            Some(text_step(input, context).after(|name| {
                log::info!("Setting up credentials for profile {name}");
            }))
        }))
        .step(WizardStep::new(ACCESS_KEY_FIELD, move |context| {
            let input = InputPrompter::new(access_provider.clone(), ACCESS_KEY)
                .with_validator(validate_access_key);
            Some(text_step(input, context))
        }))
        .step(WizardStep::new(SECRET_KEY_FIELD, move |context| {
            let input = InputPrompter::new(secret_provider.clone(), SECRET_KEY)
                .secret(false)
                .with_validator(validate_secret_key);
            Some(text_step(input, context))
        }))
}

fn required_string(answers: &Map<String, Value>, field: &str) -> Result<String> {
    answers
        .get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| Error::ValidationError(format!("missing answer for '{field}'")))
}

/// Builds the profile out of a completed wizard.
pub fn profile_from_answers(answers: &Map<String, Value>) -> Result<CredentialsProfile> {
    Ok(CredentialsProfile {
        profile_name: required_string(answers, PROFILE_NAME_FIELD)?,
        access_key: required_string(answers, ACCESS_KEY_FIELD)?,
        secret_key: required_string(answers, SECRET_KEY_FIELD)?,
    })
}
