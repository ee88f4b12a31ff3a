use std::sync::Arc;

use qs_core::{is_valid_name, Argument, FlagArgument, QuestError, VariableResolver};
use qs_parser::{FlagToken, Instruction};

pub fn parse_bool(raw: &str) -> Result<bool, String> {
    match raw.trim() {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(format!("Expected \"true\" or \"false\", got \"{}\".", other)),
    }
}

/// Turns the raw fields of an [`Instruction`] into typed arguments.
///
/// A value written as `%name%` becomes a contextual argument looked up through
/// the [`VariableResolver`] on every resolution; anything else is converted
/// once, here.
pub struct InstructionReader<'a> {
    instruction: &'a Instruction,
    variables: Arc<dyn VariableResolver>,
}

impl<'a> InstructionReader<'a> {
    pub fn new(instruction: &'a Instruction, variables: Arc<dyn VariableResolver>) -> Self {
        Self {
            instruction,
            variables,
        }
    }

    pub fn positional<T, C>(
        &self,
        index: usize,
        field: &str,
        convert: C,
    ) -> Result<Argument<T>, QuestError>
    where
        T: 'static,
        C: Fn(&str) -> Result<T, String> + Send + Sync + 'static,
    {
        let Some(raw) = self.instruction.positional(index) else {
            return Err(self.format_error(format!("Missing required {}.", field)));
        };
        self.value(field, raw, convert)
    }

    pub fn named_or<T, C>(
        &self,
        key: &str,
        default: T,
        convert: C,
    ) -> Result<Argument<T>, QuestError>
    where
        T: 'static,
        C: Fn(&str) -> Result<T, String> + Send + Sync + 'static,
    {
        match self.instruction.named(key) {
            Some(raw) => self.value(key, raw, convert),
            None => Ok(Argument::Static(default)),
        }
    }

    /// `unvalued` applies to a bare flag; `absent` is stored as the flag's
    /// default for when it is not written at all.
    pub fn flag<T, C>(
        &self,
        key: &str,
        unvalued: T,
        absent: T,
        convert: C,
    ) -> Result<FlagArgument<T>, QuestError>
    where
        T: Clone + 'static,
        C: Fn(&str) -> Result<T, String> + Send + Sync + 'static,
    {
        let declared = match self.instruction.flag(key) {
            FlagToken::Absent => None,
            FlagToken::Bare => Some(Argument::Static(unvalued)),
            FlagToken::Valued(raw) => Some(self.value(key, raw, convert)?),
        };
        Ok(FlagArgument::new(declared, absent))
    }

    /// Rejects positional tokens past the first `arguments` that are not one
    /// of the bare `flags`.
    pub fn reject_unknown_tokens(
        &self,
        arguments: usize,
        flags: &[&str],
    ) -> Result<(), QuestError> {
        match self
            .instruction
            .positional
            .iter()
            .skip(arguments)
            .find(|token| !flags.contains(&token.as_str()))
        {
            Some(token) => Err(self.format_error(format!("Unexpected token \"{}\".", token))),
            None => Ok(()),
        }
    }

    /// Logs named fields the caller did not ask for; they are ignored.
    pub fn warn_unknown_fields(&self, known: &[&str]) {
        for key in self.instruction.named.keys() {
            if !known.contains(&key.as_str()) {
                tracing::warn!(
                    instruction = %self.instruction.id,
                    field = %key,
                    "ignoring unknown instruction field"
                );
            }
        }
    }

    fn value<T, C>(&self, field: &str, raw: &str, convert: C) -> Result<Argument<T>, QuestError>
    where
        T: 'static,
        C: Fn(&str) -> Result<T, String> + Send + Sync + 'static,
    {
        let Some(name) = variable_name(raw) else {
            return convert(raw)
                .map(Argument::Static)
                .map_err(|message| self.format_error(format!("Field \"{}\": {}", field, message)));
        };

        if !self.variables.knows(name) {
            return Err(self.format_error(format!(
                "Field \"{}\" references unknown variable \"{}\".",
                field, name
            )));
        }

        let variables = Arc::clone(&self.variables);
        let name = name.to_string();
        let argument = format!("{}.{}", self.instruction.id, field);
        Ok(Argument::contextual(move |context| {
            let text = variables.resolve(context, &name)?;
            convert(&text).map_err(|message| QuestError::resolved_value(argument.clone(), message))
        }))
    }

    fn format_error(&self, message: String) -> QuestError {
        QuestError::instruction_format(self.instruction.id.to_string(), message)
    }
}

fn variable_name(raw: &str) -> Option<&str> {
    let inner = raw.strip_prefix('%')?.strip_suffix('%')?;
    is_valid_name(inner).then_some(inner)
}
