pub mod defaults;
mod reader;

pub use condition_test::{compile_condition_test, ConditionTestDecl, TEST_INSTRUCTION_KIND};
pub use reader::{parse_bool, InstructionReader};
