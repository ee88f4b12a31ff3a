use std::collections::BTreeMap;
use std::sync::Arc;

use qs_compiler::compile_condition_test;
use qs_core::{
    ActorContext, ConditionBackend, InstructionId, NoVariables, QuestError, VariableResolver,
};
use qs_parser::{parse_suite, Instruction};
use qs_runtime::{AssertionTest, LogSink};

/// Builds executable tests from instruction text. Everything that can be
/// checked without an actor is checked here, once.
#[derive(Clone)]
pub struct AssertionTestBuilder {
    conditions: Arc<dyn ConditionBackend>,
    log: Arc<dyn LogSink>,
    variables: Arc<dyn VariableResolver>,
}

impl AssertionTestBuilder {
    pub fn new(conditions: Arc<dyn ConditionBackend>, log: Arc<dyn LogSink>) -> Self {
        Self {
            conditions,
            log,
            variables: Arc::new(NoVariables),
        }
    }

    pub fn with_variables(mut self, variables: Arc<dyn VariableResolver>) -> Self {
        self.variables = variables;
        self
    }

    pub fn build(&self, instruction: &Instruction) -> Result<AssertionTest, QuestError> {
        let decl = compile_condition_test(
            instruction,
            self.conditions.as_ref(),
            Arc::clone(&self.variables),
        )?;
        tracing::debug!(test = %decl.id, source = %instruction.source, "compiled test");
        Ok(AssertionTest::new(
            decl,
            Arc::clone(&self.conditions),
            Arc::clone(&self.log),
        ))
    }

    pub fn build_from_text(
        &self,
        id: InstructionId,
        source: &str,
    ) -> Result<AssertionTest, QuestError> {
        self.build(&Instruction::parse(id, source)?)
    }

    /// Loads every line of a suite source. Fails on the first malformed line.
    pub fn load_suite(
        &self,
        package: Option<&str>,
        source: &str,
    ) -> Result<Vec<AssertionTest>, QuestError> {
        parse_suite(package, source)?
            .iter()
            .map(|instruction| self.build(instruction))
            .collect()
    }
}

#[derive(Clone)]
pub struct CreateSuiteOptions {
    /// Suite sources keyed by package name.
    pub sources: BTreeMap<String, String>,
    pub conditions: Arc<dyn ConditionBackend>,
    pub variables: Option<Arc<dyn VariableResolver>>,
    pub log: Arc<dyn LogSink>,
}

/// Loads all packages in key order.
pub fn create_suite_from_sources(
    options: CreateSuiteOptions,
) -> Result<Vec<AssertionTest>, QuestError> {
    let mut builder = AssertionTestBuilder::new(options.conditions, options.log);
    if let Some(variables) = options.variables {
        builder = builder.with_variables(variables);
    }

    let mut tests = Vec::new();
    for (package, source) in &options.sources {
        tests.extend(builder.load_suite(Some(package.as_str()), source)?);
    }
    Ok(tests)
}

/// Runs tests in order; the first error stops the run and is returned.
pub fn run_suite(
    tests: &[AssertionTest],
    context: Option<&ActorContext>,
) -> Result<(), QuestError> {
    for test in tests {
        test.execute(context)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use qs_runtime::{ConditionTable, LogLevel, MemoryLogSink, VariableTable};

    fn builder(log: &Arc<MemoryLogSink>) -> AssertionTestBuilder {
        let conditions = ConditionTable::new()
            .with_default("hasGold", false)
            .with_actor("hasGold", "P1", true);
        AssertionTestBuilder::new(Arc::new(conditions), log.clone())
    }

    fn p1() -> ActorContext {
        ActorContext::new("P1")
    }

    #[test]
    fn build_from_text_runs_the_documented_scenarios() {
        let log = Arc::new(MemoryLogSink::new());
        let builder = builder(&log);
        let id = || InstructionId::new(None, "t1");

        builder
            .build_from_text(id(), "test hasGold expected:true")
            .expect("build")
            .execute(Some(&p1()))
            .expect("run");
        builder
            .build_from_text(id(), "test hasGold expected:false")
            .expect("build")
            .execute(Some(&p1()))
            .expect("run");
        builder
            .build_from_text(id(), "test hasGold")
            .expect("build")
            .execute(None)
            .expect("run");
        builder
            .build_from_text(id(), "test hasGold independent:true")
            .expect("build")
            .execute(None)
            .expect("run");

        assert_eq!(
            log.records(),
            vec![
                (
                    LogLevel::Info,
                    "Test 't1' on condition 'hasGold' succeeded.".to_string()
                ),
                (
                    LogLevel::Error,
                    "Test 't1' on condition 'hasGold' failed. Expected 'false', but was 'true'"
                        .to_string()
                ),
                (
                    LogLevel::Error,
                    "Test 't1' skipped due to profile missing.".to_string()
                ),
                (
                    LogLevel::Error,
                    "Test 't1' on condition 'hasGold' failed. Expected 'true', but was 'false'"
                        .to_string()
                ),
            ]
        );
    }

    #[test]
    fn omitted_expected_behaves_like_explicit_true() {
        let log = Arc::new(MemoryLogSink::new());
        let builder = builder(&log);
        let implicit = builder
            .build_from_text(InstructionId::new(None, "t1"), "test hasGold")
            .expect("build");
        let explicit = builder
            .build_from_text(InstructionId::new(None, "t1"), "test hasGold expected:true")
            .expect("build");

        for actor in ["P1", "P2"] {
            let actor = ActorContext::new(actor);
            implicit.execute(Some(&actor)).expect("run");
            let first = log.take();
            explicit.execute(Some(&actor)).expect("run");
            assert_eq!(first, log.take());
        }
    }

    #[test]
    fn load_suite_builds_every_line_with_package_ids() {
        let log = Arc::new(MemoryLogSink::new());
        let tests = builder(&log)
            .load_suite(
                Some("smoke"),
                "# gold\nrich: test hasGold\npoor: test hasGold expected:false independent\n",
            )
            .expect("suite should load");

        assert_eq!(tests.len(), 2);
        run_suite(&tests, Some(&p1())).expect("suite should run");
        assert_eq!(
            log.records(),
            vec![
                (
                    LogLevel::Info,
                    "Test 'smoke>rich' on condition 'hasGold' succeeded.".to_string()
                ),
                (
                    LogLevel::Info,
                    "Test 'smoke>poor' on condition 'hasGold' succeeded.".to_string()
                ),
            ]
        );
    }

    #[test]
    fn load_suite_fails_on_unknown_condition() {
        let log = Arc::new(MemoryLogSink::new());
        let error = builder(&log)
            .load_suite(None, "t1: test hasGold\nt2: test hasSilver")
            .err()
            .expect("unknown condition");
        assert_eq!(
            error,
            QuestError::instruction_format("t2", "Unknown condition \"hasSilver\".")
        );
    }

    #[test]
    fn run_suite_stops_at_the_first_error() {
        let log = Arc::new(MemoryLogSink::new());
        let conditions = ConditionTable::new().with_actor("hasGold", "P1", true);
        let tests = AssertionTestBuilder::new(Arc::new(conditions), log.clone())
            .load_suite(None, "a: test hasGold independent\nb: test hasGold independent")
            .expect("suite should load");

        let error = run_suite(&tests, None).expect_err("needs an actor");
        assert_eq!(error.code(), "PREDICATE_EVALUATION");
        assert!(log.records().is_empty());
    }

    #[test]
    fn create_suite_from_sources_wires_variables() {
        let log = Arc::new(MemoryLogSink::new());
        let options = CreateSuiteOptions {
            sources: BTreeMap::from([
                ("b".to_string(), "t: test hasGold expected:%want%".to_string()),
                ("a".to_string(), "t: test hasGold".to_string()),
            ]),
            conditions: Arc::new(ConditionTable::new().with_actor("hasGold", "P1", true)),
            variables: Some(Arc::new(VariableTable::new().with_actor("P1", "want", "false"))),
            log: log.clone(),
        };

        let tests = create_suite_from_sources(options).expect("suite should load");
        let ids: Vec<String> = tests.iter().map(|test| test.id().to_string()).collect();
        assert_eq!(ids, vec!["a>t".to_string(), "b>t".to_string()]);

        run_suite(&tests, Some(&p1())).expect("suite should run");
        assert_eq!(log.records()[0].0, LogLevel::Info);
        assert_eq!(log.records()[1].0, LogLevel::Error);
    }

    #[test]
    fn misspelled_flag_fails_to_build_instead_of_skipping() {
        let log = Arc::new(MemoryLogSink::new());
        let error = builder(&log)
            .build_from_text(InstructionId::new(None, "t1"), "test hasGold indepedent")
            .err()
            .expect("typo should not build");
        assert_eq!(
            error,
            QuestError::instruction_format("t1", "Unexpected token \"indepedent\".")
        );
        assert!(log.records().is_empty());
    }

    #[test]
    fn variables_are_rejected_without_a_resolver() {
        let log = Arc::new(MemoryLogSink::new());
        let error = builder(&log)
            .build_from_text(InstructionId::new(None, "t1"), "test hasGold expected:%want%")
            .err()
            .expect("no resolver");
        assert_eq!(error.code(), "INSTRUCTION_FORMAT");
    }
}
