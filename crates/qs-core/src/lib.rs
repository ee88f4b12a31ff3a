pub mod argument;
pub mod backend;
pub mod error;
pub mod template;
pub mod types;

pub use argument::{Argument, ContextRule, FlagArgument};
pub use backend::{ConditionBackend, NoVariables, VariableResolver};
pub use error::QuestError;
pub use template::MessageTemplate;
pub use types::*;
