use std::ffi::OsString;
use std::sync::Arc;

use clap::Parser;
use qs_api::{create_suite_from_sources, CreateSuiteOptions};
use qs_core::ActorContext;
use qs_runtime::TracingLogSink;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod cli_args;
mod error;
mod report;
mod source_loader;
mod world;

pub use error::CliError;

pub(crate) use cli_args::{Cli, Mode, RunArgs};
pub(crate) use error::emit_error;
pub(crate) use report::TallyLogSink;
pub(crate) use source_loader::{load_world, read_suites_from_dir, resolve_scripts_dir};

pub const LOG_FILTER_ENV: &str = "QS_LOG";

pub fn run_cli_from_args<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(error) => {
            let _ = error.print();
            return error.exit_code();
        }
    };
    match run(cli) {
        Ok(code) => code,
        Err(error) => emit_error(&error),
    }
}

fn run(cli: Cli) -> Result<i32, CliError> {
    match cli.command {
        Mode::Run(args) => run_suites(args),
    }
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    // A second initialisation (several runs in one process) keeps the first.
    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .try_init();
}

fn run_suites(args: RunArgs) -> Result<i32, CliError> {
    init_logging(args.verbose);

    let scripts_root = resolve_scripts_dir(&args.scripts_dir)?;
    let sources = read_suites_from_dir(&scripts_root)?;
    let world = load_world(args.world.as_deref())?;
    let tally = Arc::new(TallyLogSink::new(TracingLogSink));

    let tests = create_suite_from_sources(CreateSuiteOptions {
        sources,
        conditions: Arc::new(world.conditions),
        variables: Some(Arc::new(world.variables)),
        log: tally.clone(),
    })?;
    tracing::debug!(tests = tests.len(), root = %scripts_root.display(), "loaded suites");

    let contexts: Vec<Option<ActorContext>> = if args.actors.is_empty() {
        vec![None]
    } else {
        args.actors
            .iter()
            .map(|actor| Some(ActorContext::new(actor.as_str())))
            .collect()
    };

    let mut run_errors = 0usize;
    for context in &contexts {
        for test in &tests {
            if let Err(error) = test.execute(context.as_ref()) {
                run_errors += 1;
                tracing::error!(test = %test.id(), code = error.code(), "{}", error);
                println!("RUN_ERROR:{}:{}", test.id(), error.code());
            }
        }
    }

    let failed = tally.error_count() + run_errors;
    println!("TESTS:{}", tests.len() * contexts.len());
    println!("PASSED:{}", tally.info_count());
    println!("FAILED:{}", failed);
    if failed == 0 {
        println!("RESULT:OK");
        Ok(0)
    } else {
        println!("RESULT:FAILED");
        Ok(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;
    use std::path::{Path, PathBuf};
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_dir(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time should move forward")
            .as_nanos();
        std::env::temp_dir().join(format!("qs-cli-{}-{}", name, nanos))
    }

    fn write_file(path: &Path, content: &str) {
        let parent = path.parent().expect("path should have parent");
        fs::create_dir_all(parent).expect("parent dir should be created");
        fs::write(path, content).expect("file should be written");
    }

    fn fixture(name: &str, suite: &str) -> (PathBuf, PathBuf) {
        let root = temp_dir(name);
        let scripts = root.join("scripts");
        write_file(&scripts.join("main.quest"), suite);
        let world = root.join("world.json");
        write_file(
            &world,
            r#"{"conditions":{"hasGold":{"default":false,"actors":{"P1":true}}}}"#,
        );
        (scripts, world)
    }

    fn run_with(args: &[&str]) -> i32 {
        let mut all = vec!["qs-cli", "run"];
        all.extend_from_slice(args);
        run_cli_from_args(all)
    }

    #[test]
    fn passing_suite_exits_zero() {
        let (scripts, world) = fixture(
            "pass",
            "t1: test hasGold\nt2: test hasGold independent expected:false\n",
        );
        let scripts = scripts.to_string_lossy().into_owned();
        let world = world.to_string_lossy().into_owned();

        let code = run_with(&[
            "--scripts-dir",
            scripts.as_str(),
            "--world",
            world.as_str(),
            "--actor",
            "P1",
        ]);
        assert_eq!(code, 0);
    }

    #[test]
    fn skipped_or_failed_tests_exit_one() {
        let (scripts, world) = fixture("fail", "t1: test hasGold\n");
        let scripts = scripts.to_string_lossy().into_owned();
        let world = world.to_string_lossy().into_owned();

        let base = ["--scripts-dir", scripts.as_str(), "--world", world.as_str()];

        assert_eq!(run_with(&base), 1);
        let mut with_actor = base.to_vec();
        with_actor.extend(["--actor", "P2"]);
        assert_eq!(run_with(&with_actor), 1);
    }

    #[test]
    fn load_errors_exit_one() {
        let (scripts, world) = fixture("bad", "t1: test hasSilver\n");
        let scripts = scripts.to_string_lossy().into_owned();
        let world = world.to_string_lossy().into_owned();

        assert_eq!(
            run_with(&["--scripts-dir", scripts.as_str(), "--world", world.as_str()]),
            1
        );
        assert_eq!(run_with(&["--scripts-dir", "/definitely/not/here"]), 1);
    }

    #[test]
    fn usage_errors_use_clap_exit_code() {
        assert_eq!(run_cli_from_args(["qs-cli", "run"]), 2);
    }
}
