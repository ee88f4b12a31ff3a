mod instruction;
mod suite;

pub use instruction::{FlagToken, Instruction};
pub use suite::parse_suite;
