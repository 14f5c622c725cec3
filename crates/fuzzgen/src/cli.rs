//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::Parser;
use fuzzgen_scaffold::EngineKind;

/// fuzzgen - scaffold a new fuzzing harness from a template
#[derive(Parser, Debug)]
#[command(name = "fuzzgen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Fuzzer kind: go or afl
    pub kind: String,

    /// Name of the new fuzzer project
    pub name: String,

    /// Prefix prepended to NAME as-is (include a trailing '/' for a directory)
    pub target: Option<String>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to fuzzgen.yaml config file
    #[arg(short, long, env = "FUZZGEN_CONFIG")]
    pub config: Option<Utf8PathBuf>,

    /// Template repository containing one directory per kind
    #[arg(long, env = "FUZZGEN_TEMPLATE_ROOT")]
    pub template_root: Option<Utf8PathBuf>,

    /// Template engine for .tmpl files
    #[arg(long, value_name = "ENGINE")]
    pub engine: Option<EngineKind>,

    /// Extra template variable (repeatable)
    #[arg(long = "var", value_name = "KEY=VALUE")]
    pub vars: Vec<String>,
}
