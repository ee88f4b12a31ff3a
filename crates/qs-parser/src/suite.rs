use std::collections::BTreeSet;

use qs_core::{is_valid_name, InstructionId, QuestError};

use crate::Instruction;

/// Parses a suite source: one `name: instruction` per line, `#` comments and
/// blank lines skipped.
pub fn parse_suite(package: Option<&str>, source: &str) -> Result<Vec<Instruction>, QuestError> {
    let origin = package.unwrap_or("<suite>");
    let mut seen = BTreeSet::new();
    let mut instructions = Vec::new();

    for (index, line) in source.lines().enumerate() {
        let line_no = index + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let Some((name, body)) = trimmed.split_once(':') else {
            return Err(QuestError::instruction_format(
                format!("{}:{}", origin, line_no),
                "Expected \"<name>: <instruction>\".",
            ));
        };
        let name = name.trim();
        if !is_valid_name(name) {
            return Err(QuestError::instruction_format(
                format!("{}:{}", origin, line_no),
                format!("Invalid instruction name \"{}\".", name),
            ));
        }

        let id = InstructionId::new(package.map(str::to_string), name);
        if !seen.insert(name.to_string()) {
            return Err(QuestError::instruction_format(
                id.to_string(),
                format!("Instruction name is declared twice (line {}).", line_no),
            ));
        }
        instructions.push(Instruction::parse(id, body)?);
    }

    Ok(instructions)
}
