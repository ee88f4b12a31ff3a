use crate::error::QuestError;
use crate::types::{ActorContext, PredicateId};

/// Evaluates named conditions. Implementations own their concurrency discipline.
pub trait ConditionBackend: Send + Sync {
    fn evaluate(
        &self,
        context: Option<&ActorContext>,
        id: &PredicateId,
    ) -> Result<bool, QuestError>;

    /// Whether `id` names a condition this backend can evaluate. Consulted once,
    /// while loading instructions.
    fn knows(&self, _id: &PredicateId) -> bool {
        true
    }
}

/// Supplies the text behind `%name%` references in instruction values.
pub trait VariableResolver: Send + Sync {
    fn resolve(&self, context: Option<&ActorContext>, name: &str) -> Result<String, QuestError>;

    fn knows(&self, _name: &str) -> bool {
        true
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoVariables;

impl VariableResolver for NoVariables {
    fn resolve(&self, _context: Option<&ActorContext>, name: &str) -> Result<String, QuestError> {
        Err(QuestError::resolved_value(
            format!("%{}%", name),
            "no variables are registered",
        ))
    }

    fn knows(&self, _name: &str) -> bool {
        false
    }
}
