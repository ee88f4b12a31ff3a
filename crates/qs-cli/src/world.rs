use qs_runtime::{ConditionTable, VariableTable};
use serde::{Deserialize, Serialize};

/// Fixed condition outcomes and variable values a suite runs against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct World {
    #[serde(default)]
    pub(crate) conditions: ConditionTable,
    #[serde(default)]
    pub(crate) variables: VariableTable,
}
