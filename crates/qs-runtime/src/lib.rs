mod action;
mod assertion;
mod conditions;
mod log_sink;
mod variables;

pub use action::{ActorAction, ActorlessAction, NullableAction};
pub use assertion::AssertionTest;
pub use conditions::{ConditionEntry, ConditionTable};
pub use log_sink::{LogLevel, LogSink, MemoryLogSink, TracingLogSink, TEST_LOG_TARGET};
pub use variables::VariableTable;
