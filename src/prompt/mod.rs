//! Composable single-question prompts
//!
//! A [`Prompter`] wraps one interaction with the user (free text, a pick list,
//! a confirmation) and lets the caller shape its outcome before anybody sees it:
//!
//! - [`Prompter::transform`] maps the response, possibly to a new type. Links are
//!   applied in registration order.
//! - [`Prompter::after`] registers side effects. They run once the whole chain has
//!   been folded and never change the returned value.
//! - [`Prompter::set_steps`] / [`Prompter::set_step_estimator`] connect the prompt
//!   to the progress display of an enclosing [`crate::wizard::Wizard`].
//!
//! A prompter answers at most once. Its interaction is reached through the
//! [`Interaction`] trait, so the same chain works with the terminal
//! ([`dialoguer::DialoguerPrompter`]) and with scripted answers
//! ([`automatic_impl::AutomaticPrompter`]).

use crate::{
    error::{Error, Result},
    wizard::StepEstimator,
};
use std::any::{type_name, Any};
use std::fmt;
use std::marker::PhantomData;

pub mod automatic_impl;
pub mod controls;
pub mod dialoguer;
pub mod interface;

pub use controls::*;
pub use interface::*;

/// Outcome of a single interaction.
///
/// Cancellation is an outcome of its own, so an explicit falsy answer (`0`,
/// `false`, `""`) is never confused with the user backing out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptResult<T> {
    Value(T),
    Cancelled,
}

impl<T> PromptResult<T> {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, PromptResult::Cancelled)
    }

    /// Returns the realized value, or `None` when cancelled.
    pub fn value(self) -> Option<T> {
        match self {
            PromptResult::Value(value) => Some(value),
            PromptResult::Cancelled => None,
        }
    }

    pub fn as_value(&self) -> Option<&T> {
        match self {
            PromptResult::Value(value) => Some(value),
            PromptResult::Cancelled => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> PromptResult<U> {
        match self {
            PromptResult::Value(value) => PromptResult::Value(f(value)),
            PromptResult::Cancelled => PromptResult::Cancelled,
        }
    }
}

impl<T> From<Option<T>> for PromptResult<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(PromptResult::Cancelled, PromptResult::Value)
    }
}

/// The raw interaction behind a [`Prompter`].
///
/// Implementors perform the actual question. Progress and recent-item hooks are
/// optional, controls that cannot display them keep the defaults.
pub trait Interaction: 'static {
    type Output: 'static;

    fn prompt_user(&mut self) -> Result<PromptResult<Self::Output>>;

    fn set_steps(&mut self, _current: usize, _total: usize) {}

    fn recent_item(&self) -> Option<&Self::Output> {
        None
    }

    fn set_recent_item(&mut self, _item: Self::Output) {}

    fn into_prompter(self) -> Prompter<Self::Output>
    where
        Self: Sized,
    {
        Prompter::new(self)
    }
}

type Erased = Box<dyn Any>;
type Deferred = Box<dyn FnOnce()>;

/// Object-safe view of an [`Interaction`] with its output type erased.
trait ErasedInteraction {
    fn prompt_user(&mut self) -> Result<PromptResult<Erased>>;
    fn set_steps(&mut self, current: usize, total: usize);
    fn recent_item(&self) -> Option<&(dyn Any + 'static)>;
    fn set_recent_item(&mut self, item: Erased) -> bool;
}

impl<I: Interaction> ErasedInteraction for I {
    fn prompt_user(&mut self) -> Result<PromptResult<Erased>> {
        Ok(Interaction::prompt_user(self)?.map(|value| Box::new(value) as Erased))
    }

    fn set_steps(&mut self, current: usize, total: usize) {
        Interaction::set_steps(self, current, total)
    }

    fn recent_item(&self) -> Option<&(dyn Any + 'static)> {
        Interaction::recent_item(self).map(|item| item as &(dyn Any + 'static))
    }

    fn set_recent_item(&mut self, item: Erased) -> bool {
        match item.downcast::<I::Output>() {
            Ok(item) => {
                Interaction::set_recent_item(self, *item);
                true
            }
            Err(_) => false,
        }
    }
}

enum Link {
    Transform(Box<dyn FnOnce(Erased) -> Result<Erased>>),
    After(Box<dyn FnOnce(&(dyn Any + 'static)) -> Result<Deferred>>),
    Estimate(Box<dyn FnOnce(&(dyn Any + 'static)) -> Result<isize>>),
}

/// Lifecycle of a [`Prompter`]. Every state but `Unstarted` is terminal for
/// `prompt()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrompterState {
    Unstarted,
    Running,
    Completed,
    Cancelled,
    Failed,
}

/// A single question in a multi-step flow.
///
/// `T` is the type the chain currently produces. `transform` consumes the
/// prompter and hands back the same core retyped, so the one-shot guarantee
/// travels with the chain.
pub struct Prompter<T> {
    interaction: Box<dyn ErasedInteraction>,
    links: Vec<Link>,
    state: PrompterState,
    step_estimate: Option<isize>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> fmt::Debug for Prompter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Prompter")
            .field("output", &type_name::<T>())
            .field("links", &self.links.len())
            .field("state", &self.state)
            .field("step_estimate", &self.step_estimate)
            .finish()
    }
}

impl<T: 'static> Prompter<T> {
    pub fn new<I: Interaction<Output = T>>(interaction: I) -> Self {
        Self {
            interaction: Box::new(interaction),
            links: Vec::new(),
            state: PrompterState::Unstarted,
            step_estimate: None,
            _marker: PhantomData,
        }
    }

    pub fn state(&self) -> PrompterState {
        self.state
    }

    /// Runs the interaction and folds the response through the chain.
    ///
    /// Fails with [`Error::AlreadyInvoked`] on every call after the first one,
    /// whatever the first call produced. A cancelled or failed interaction skips
    /// every transformation and callback.
    pub fn prompt(&mut self) -> Result<PromptResult<T>> {
        if self.state != PrompterState::Unstarted {
            return Err(Error::AlreadyInvoked);
        }
        self.state = PrompterState::Running;

        let response = match self.interaction.prompt_user() {
            Ok(response) => response,
            Err(err) => {
                self.state = PrompterState::Failed;
                return Err(err);
            }
        };

        let raw = match response {
            PromptResult::Value(raw) => raw,
            PromptResult::Cancelled => {
                log::debug!("Prompt for '{}' was cancelled", type_name::<T>());
                self.state = PrompterState::Cancelled;
                self.links.clear();
                return Ok(PromptResult::Cancelled);
            }
        };

        match self.resolve(raw) {
            Ok(value) => {
                self.state = PrompterState::Completed;
                Ok(PromptResult::Value(value))
            }
            Err(err) => {
                self.state = PrompterState::Failed;
                Err(err)
            }
        }
    }

    fn resolve(&mut self, raw: Erased) -> Result<T> {
        let links = std::mem::take(&mut self.links);
        log::trace!("Folding response through {} prompter links", links.len());

        let mut value = raw;
        let mut deferred = Vec::new();
        for link in links {
            match link {
                Link::Transform(transform) => value = transform(value)?,
                Link::After(callback) => deferred.push(callback(&*value)?),
                Link::Estimate(estimator) => {
                    self.step_estimate = Some(estimator(&*value)?)
                }
            }
        }

        let value = downcast::<T>(value)?;
        for callback in deferred {
            callback();
        }
        Ok(value)
    }

    /// Appends a mapping to the chain and retypes the prompter.
    pub fn transform<U: 'static>(mut self, f: impl FnOnce(T) -> U + 'static) -> Prompter<U> {
        self.links.push(Link::Transform(Box::new(move |value: Erased| {
            let value = downcast::<T>(value)?;
            Ok(Box::new(f(value)) as Erased)
        })));
        self.retype()
    }

    /// Appends a side effect. Callbacks run after every transformation, in the
    /// order they were registered, with the value the chain held at this point.
    pub fn after(mut self, f: impl FnOnce(&T) + 'static) -> Self
    where
        T: Clone,
    {
        self.links.push(Link::After(Box::new(move |value: &(dyn Any + 'static)| {
            let snapshot = downcast_ref::<T>(value)?.clone();
            Ok(Box::new(move || f(&snapshot)) as Deferred)
        })));
        self
    }

    /// Tells the interaction where it sits in the enclosing flow.
    pub fn set_steps(&mut self, current: usize, total: usize) {
        self.interaction.set_steps(current, total)
    }

    /// Registers the estimator evaluated with the realized response. Replaces
    /// any estimator registered before.
    pub fn set_step_estimator(&mut self, estimator: StepEstimator<T>) {
        self.links.retain(|link| !matches!(link, Link::Estimate(_)));
        self.links.push(Link::Estimate(Box::new(move |value: &(dyn Any + 'static)| {
            Ok(estimator(downcast_ref::<T>(value)?))
        })));
    }

    /// Extra steps implied by the response, once the prompt completed.
    pub fn step_estimate(&self) -> Option<isize> {
        self.step_estimate
    }

    /// Last response of the underlying control, in the control's item type.
    pub fn recent_item<R: 'static>(&self) -> Option<&R> {
        self.interaction.recent_item()?.downcast_ref::<R>()
    }

    /// Pre-seeds the underlying control. Returns `false` when `R` is not the
    /// control's item type.
    pub fn set_recent_item<R: 'static>(&mut self, item: R) -> bool {
        let accepted = self.interaction.set_recent_item(Box::new(item));
        if !accepted {
            log::warn!("Ignoring recent item of type '{}'", type_name::<R>());
        }
        accepted
    }

    fn retype<U>(self) -> Prompter<U> {
        Prompter {
            interaction: self.interaction,
            links: self.links,
            state: self.state,
            step_estimate: self.step_estimate,
            _marker: PhantomData,
        }
    }
}

fn downcast<T: 'static>(value: Erased) -> Result<T> {
    value
        .downcast::<T>()
        .map(|value| *value)
        .map_err(|_| Error::PromptTypeMismatch { expected: type_name::<T>() })
}

fn downcast_ref<'a, T: 'static>(value: &'a (dyn Any + 'static)) -> Result<&'a T> {
    value
        .downcast_ref::<T>()
        .ok_or(Error::PromptTypeMismatch { expected: type_name::<T>() })
}
