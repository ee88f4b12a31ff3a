//! Typed instruction parameters that are either fixed at load time or computed
//! per actor when a script line runs.

use std::fmt;
use std::sync::Arc;

use crate::error::QuestError;
use crate::types::ActorContext;

/// A rule computing a value from the (possibly absent) actor of the current run.
pub type ContextRule<T> =
    Arc<dyn Fn(Option<&ActorContext>) -> Result<T, QuestError> + Send + Sync>;

/// A resolvable parameter.
///
/// `Static` values never look at the context. `Contextual` rules receive the
/// context exactly as given, `None` included; each rule decides whether `None`
/// is acceptable.
pub enum Argument<T> {
    Static(T),
    Contextual(ContextRule<T>),
}

impl<T> Argument<T> {
    pub fn contextual<F>(rule: F) -> Self
    where
        F: Fn(Option<&ActorContext>) -> Result<T, QuestError> + Send + Sync + 'static,
    {
        Self::Contextual(Arc::new(rule))
    }

    /// A contextual rule that only makes sense for a concrete actor. Resolving it
    /// without one fails with [`QuestError::MissingContext`] naming `argument`.
    pub fn for_actor<F>(argument: impl Into<String>, rule: F) -> Self
    where
        F: Fn(&ActorContext) -> Result<T, QuestError> + Send + Sync + 'static,
    {
        let argument = argument.into();
        Self::contextual(move |context| match context {
            Some(actor) => rule(actor),
            None => Err(QuestError::missing_context(argument.clone())),
        })
    }

    pub fn is_static(&self) -> bool {
        matches!(self, Self::Static(_))
    }
}

impl<T: Clone> Argument<T> {
    pub fn resolve(&self, context: Option<&ActorContext>) -> Result<T, QuestError> {
        match self {
            Self::Static(value) => Ok(value.clone()),
            Self::Contextual(rule) => rule(context),
        }
    }
}

impl<T: Clone> Clone for Argument<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Static(value) => Self::Static(value.clone()),
            Self::Contextual(rule) => Self::Contextual(Arc::clone(rule)),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Argument<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(value) => f.debug_tuple("Static").field(value).finish(),
            Self::Contextual(_) => f.write_str("Contextual(..)"),
        }
    }
}

/// An optional argument. When the flag was not declared, resolution yields the
/// default supplied by the owning feature and never touches the context.
#[derive(Debug, Clone)]
pub struct FlagArgument<T> {
    declared: Option<Argument<T>>,
    default: T,
}

impl<T: Clone> FlagArgument<T> {
    pub fn new(declared: Option<Argument<T>>, default: T) -> Self {
        Self { declared, default }
    }

    pub fn declared(argument: Argument<T>, default: T) -> Self {
        Self::new(Some(argument), default)
    }

    pub fn absent(default: T) -> Self {
        Self::new(None, default)
    }

    pub fn is_declared(&self) -> bool {
        self.declared.is_some()
    }

    pub fn default_value(&self) -> &T {
        &self.default
    }

    pub fn resolve(&self, context: Option<&ActorContext>) -> Result<T, QuestError> {
        match &self.declared {
            Some(argument) => argument.resolve(context),
            None => Ok(self.default.clone()),
        }
    }
}
