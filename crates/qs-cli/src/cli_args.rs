use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "qs-cli")]
#[command(about = "Runs questscript test suites against a fixed world")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Mode,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Mode {
    Run(RunArgs),
}

#[derive(Debug, Args)]
pub(crate) struct RunArgs {
    #[arg(long = "scripts-dir")]
    pub(crate) scripts_dir: String,
    /// JSON file with `conditions` and `variables`; empty world when omitted.
    #[arg(long = "world")]
    pub(crate) world: Option<String>,
    /// Actor to run every test for. Repeatable; without any, tests run actorless.
    #[arg(long = "actor")]
    pub(crate) actors: Vec<String>,
    #[arg(long = "verbose", short = 'v')]
    pub(crate) verbose: bool,
}
