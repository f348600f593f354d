use clap::{Parser, Subcommand};

use pth_cli::commands::{check_ops, config_ops, derive_ops, EngineArgs};

#[derive(Parser)]
#[command(
    name = "pthtool",
    about = "Middle Chinese to Putonghua derivation diagnostics"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Derive the reading of one or more positions (e.g. 見開三B支平)
    Derive {
        /// Position descriptions
        #[arg(required = true)]
        positions: Vec<String>,
        #[command(flatten)]
        engine: EngineArgs,
    },

    /// Explain every stage of a derivation
    Explain {
        /// Position description
        position: String,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        engine: EngineArgs,
    },

    /// Derive every legal position and write the results as JSONL
    Sweep {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
        #[command(flatten)]
        engine: EngineArgs,
    },

    /// Run a regression corpus of expected readings
    Check {
        /// Path to the corpus TOML file
        corpus_file: String,
        /// Show passing cases too (default: only failures and skips)
        #[arg(long)]
        verbose: bool,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        engine: EngineArgs,
    },

    /// Show the available options with their choices and defaults
    Options {
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print the default options TOML
    OptionsExport,

    /// Validate an options TOML file
    OptionsValidate {
        /// Path to the options TOML file
        file: String,
    },

    /// Print the built-in rule tables
    RulesExport,

    /// Compile a rule table TOML file and check it covers every position
    RulesValidate {
        /// Path to the rule table TOML file
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Derive { positions, engine } => derive_ops::derive(&positions, &engine),
        Command::Explain {
            position,
            json,
            engine,
        } => derive_ops::explain_position(&position, json, &engine),
        Command::Sweep { output, engine } => derive_ops::sweep(output.as_deref(), &engine),
        Command::Check {
            corpus_file,
            verbose,
            json,
            engine,
        } => check_ops::check(&corpus_file, verbose, json, &engine),
        Command::Options { json } => config_ops::options_show(json),
        Command::OptionsExport => config_ops::options_export(),
        Command::OptionsValidate { file } => config_ops::options_validate(&file),
        Command::RulesExport => config_ops::rules_export(),
        Command::RulesValidate { file } => config_ops::rules_validate(&file),
    }
}
