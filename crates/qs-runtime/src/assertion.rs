use std::sync::Arc;

use qs_compiler::ConditionTestDecl;
use qs_core::{ActorContext, ConditionBackend, InstructionId, QuestError};

use crate::action::NullableAction;
use crate::log_sink::LogSink;

/// A compiled `test` line: evaluates one condition and logs whether it matched
/// the expected value.
///
/// Holds no mutable state, so one instance may be executed for many actors at
/// once.
pub struct AssertionTest {
    decl: ConditionTestDecl,
    conditions: Arc<dyn ConditionBackend>,
    log: Arc<dyn LogSink>,
}

impl AssertionTest {
    pub fn new(
        decl: ConditionTestDecl,
        conditions: Arc<dyn ConditionBackend>,
        log: Arc<dyn LogSink>,
    ) -> Self {
        Self {
            decl,
            conditions,
            log,
        }
    }

    pub fn id(&self) -> &InstructionId {
        &self.decl.id
    }

    pub fn decl(&self) -> &ConditionTestDecl {
        &self.decl
    }

    /// Runs the test and logs exactly one line, unless an argument or the
    /// condition backend fails first, in which case nothing is logged and the
    /// error is returned.
    pub fn execute(&self, context: Option<&ActorContext>) -> Result<(), QuestError> {
        // Independence is read with the caller's context, before anything else.
        let independent = self.decl.independent.resolve(context)?;
        if !independent && context.is_none() {
            tracing::debug!(test = %self.decl.id, "skipping test without actor");
            self.log.error(&self.decl.skip_message.format(&[&self.decl.id]));
            return Ok(());
        }

        let effective = if independent { None } else { context };
        let condition = self.decl.condition.resolve(effective)?;
        let expected = self.decl.expected.resolve(effective)?;
        tracing::debug!(
            test = %self.decl.id,
            condition = %condition,
            actor = ?effective.map(|actor| actor.id.as_str()),
            expected,
            "evaluating test condition"
        );
        let actual = self.conditions.evaluate(effective, &condition)?;

        if actual == expected {
            let template = self.decl.success_message.resolve(effective)?;
            self.log.info(&template.format(&[&self.decl.id, &condition]));
        } else {
            let template = self.decl.failure_message.resolve(effective)?;
            self.log
                .error(&template.format(&[&self.decl.id, &condition, &expected, &actual]));
        }
        Ok(())
    }
}

impl NullableAction for AssertionTest {
    fn execute(&self, context: Option<&ActorContext>) -> Result<(), QuestError> {
        AssertionTest::execute(self, context)
    }
}

impl std::fmt::Debug for AssertionTest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssertionTest")
            .field("decl", &self.decl)
            .finish_non_exhaustive()
    }
}
