use std::collections::BTreeMap;

use qs_core::{ActorContext, QuestError, VariableResolver};
use serde::{Deserialize, Serialize};

/// Variable values for `%name%` references. A name that appears in any actor
/// map is actor-scoped and cannot be resolved without an actor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableTable {
    #[serde(default)]
    pub global: BTreeMap<String, String>,
    #[serde(default)]
    pub actors: BTreeMap<String, BTreeMap<String, String>>,
}

impl VariableTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_global(mut self, name: &str, value: &str) -> Self {
        self.global.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_actor(mut self, actor: &str, name: &str, value: &str) -> Self {
        self.actors
            .entry(actor.to_string())
            .or_default()
            .insert(name.to_string(), value.to_string());
        self
    }

    fn is_actor_scoped(&self, name: &str) -> bool {
        self.actors.values().any(|values| values.contains_key(name))
    }
}

impl VariableResolver for VariableTable {
    fn resolve(&self, context: Option<&ActorContext>, name: &str) -> Result<String, QuestError> {
        let reference = format!("%{}%", name);
        if self.is_actor_scoped(name) {
            let Some(actor) = context else {
                return Err(QuestError::missing_context(reference));
            };
            if let Some(value) = self
                .actors
                .get(&actor.id)
                .and_then(|values| values.get(name))
            {
                return Ok(value.clone());
            }
        }

        self.global.get(name).cloned().ok_or_else(|| {
            QuestError::resolved_value(
                reference,
                match context {
                    Some(actor) => format!("no value for actor \"{}\"", actor),
                    None => "no global value".to_string(),
                },
            )
        })
    }

    fn knows(&self, name: &str) -> bool {
        self.global.contains_key(name) || self.is_actor_scoped(name)
    }
}

#[cfg(test)]
mod variables_tests {
    use super::*;

    #[test]
    fn global_variables_resolve_with_or_without_actor() {
        let table = VariableTable::new().with_global("mode", "true");
        assert!(table.knows("mode"));
        assert_eq!(table.resolve(None, "mode"), Ok("true".to_string()));
        assert_eq!(
            table.resolve(Some(&ActorContext::new("P1")), "mode"),
            Ok("true".to_string())
        );
    }

    #[test]
    fn actor_scoped_variables_need_an_actor() {
        let table = VariableTable::new()
            .with_actor("P1", "want", "false")
            .with_global("want", "true");
        assert_eq!(
            table.resolve(Some(&ActorContext::new("P1")), "want"),
            Ok("false".to_string())
        );
        assert_eq!(
            table.resolve(Some(&ActorContext::new("P2")), "want"),
            Ok("true".to_string())
        );
        assert_eq!(
            table.resolve(None, "want"),
            Err(QuestError::missing_context("%want%"))
        );
    }

    #[test]
    fn missing_values_are_resolved_value_errors() {
        let table = VariableTable::new().with_actor("P1", "want", "false");
        let error = table
            .resolve(Some(&ActorContext::new("P2")), "want")
            .expect_err("no value for P2");
        assert_eq!(error.code(), "RESOLVED_VALUE");
        assert!(!table.knows("other"));
    }
}
