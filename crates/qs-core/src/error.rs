use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuestError {
    #[error("Instruction \"{instruction}\" is malformed: {message}")]
    InstructionFormat { instruction: String, message: String },
    #[error("Argument \"{argument}\" requires an actor context, but none was given.")]
    MissingContext { argument: String },
    #[error("Condition \"{predicate}\" could not be evaluated: {message}")]
    PredicateEvaluation { predicate: String, message: String },
    #[error("Argument \"{argument}\" resolved to an unusable value: {message}")]
    ResolvedValue { argument: String, message: String },
}

impl QuestError {
    pub fn instruction_format(instruction: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InstructionFormat {
            instruction: instruction.into(),
            message: message.into(),
        }
    }

    pub fn missing_context(argument: impl Into<String>) -> Self {
        Self::MissingContext {
            argument: argument.into(),
        }
    }

    pub fn predicate_evaluation(predicate: impl Into<String>, message: impl Into<String>) -> Self {
        Self::PredicateEvaluation {
            predicate: predicate.into(),
            message: message.into(),
        }
    }

    pub fn resolved_value(argument: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ResolvedValue {
            argument: argument.into(),
            message: message.into(),
        }
    }

    /// Stable machine-readable code, independent of the message wording.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InstructionFormat { .. } => "INSTRUCTION_FORMAT",
            Self::MissingContext { .. } => "MISSING_CONTEXT",
            Self::PredicateEvaluation { .. } => "PREDICATE_EVALUATION",
            Self::ResolvedValue { .. } => "RESOLVED_VALUE",
        }
    }
}

#[cfg(test)]
mod error_tests {
    use super::*;

    #[test]
    fn codes_are_stable_per_variant() {
        assert_eq!(
            QuestError::instruction_format("t1", "bad").code(),
            "INSTRUCTION_FORMAT"
        );
        assert_eq!(QuestError::missing_context("expected").code(), "MISSING_CONTEXT");
        assert_eq!(
            QuestError::predicate_evaluation("hasGold", "boom").code(),
            "PREDICATE_EVALUATION"
        );
        assert_eq!(QuestError::resolved_value("fail", "bad").code(), "RESOLVED_VALUE");
    }

    #[test]
    fn display_names_the_offending_item() {
        let error = QuestError::missing_context("expected");
        assert_eq!(
            error.to_string(),
            "Argument \"expected\" requires an actor context, but none was given."
        );
    }
}
