use std::collections::BTreeMap;

use qs_core::{ActorContext, ConditionBackend, PredicateId, QuestError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionEntry {
    /// Used without an actor, and for actors without an override.
    #[serde(default)]
    pub default: Option<bool>,
    #[serde(default)]
    pub actors: BTreeMap<String, bool>,
}

/// Fixed condition outcomes keyed by condition id (`[package>]name`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConditionTable {
    entries: BTreeMap<String, ConditionEntry>,
}

impl ConditionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default(mut self, condition: &str, value: bool) -> Self {
        self.entries.entry(condition.to_string()).or_default().default = Some(value);
        self
    }

    pub fn with_actor(mut self, condition: &str, actor: &str, value: bool) -> Self {
        self.entries
            .entry(condition.to_string())
            .or_default()
            .actors
            .insert(actor.to_string(), value);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ConditionBackend for ConditionTable {
    fn evaluate(
        &self,
        context: Option<&ActorContext>,
        id: &PredicateId,
    ) -> Result<bool, QuestError> {
        let key = id.to_string();
        let Some(entry) = self.entries.get(&key) else {
            return Err(QuestError::predicate_evaluation(key, "unknown condition"));
        };

        let overridden = context.and_then(|actor| entry.actors.get(&actor.id).copied());
        match (overridden, entry.default, context) {
            (Some(value), _, _) | (None, Some(value), _) => Ok(value),
            (None, None, Some(actor)) => Err(QuestError::predicate_evaluation(
                key,
                format!("no outcome for actor \"{}\"", actor),
            )),
            (None, None, None) => Err(QuestError::predicate_evaluation(key, "requires an actor")),
        }
    }

    fn knows(&self, id: &PredicateId) -> bool {
        self.entries.contains_key(&id.to_string())
    }
}
