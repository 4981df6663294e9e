//! Hoku Complete - command line front end.
//!
//! Loads a vocabulary into a prefix index and answers completion, membership
//! and listing queries against it.

use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use anyhow::Context;
use clap::{Args as ClapArgs, Parser, Subcommand};
use serde_json::json;
use tracing::info;

use hoku_complete::commands::{self, CompletionMode};
use hoku_complete::config::{ConfigLoader, HokuConfig, LogConfig, ENV_PREFIX};
use hoku_complete::error::{
    report_error, set_error_reporter, ErrorContext, HokuError, HokuResult, TracingErrorReporter,
};
use hoku_complete::loader::LoadReport;

/// Command line arguments for Hoku Complete.
#[derive(Parser, Debug)]
#[clap(name = "hoku", version, author, about)]
struct Args {
    /// Path to configuration file
    #[clap(short, long, value_parser, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[clap(long, global = true)]
    json: bool,

    /// Command to execute
    #[clap(subcommand)]
    command: Command,
}

/// Vocabulary source shared by the query commands.
#[derive(ClapArgs, Debug)]
struct Vocabulary {
    /// Term list to load (one `term<TAB>priority` per line)
    #[clap(short, long, value_parser)]
    terms: PathBuf,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Complete a prefix
    Complete {
        /// Prefix to complete
        prefix: String,

        /// Use the highest-priority completion
        #[clap(long, conflicts_with = "first")]
        weighted: bool,

        /// Use the alphabetically first completion
        #[clap(long)]
        first: bool,

        #[clap(flatten)]
        vocabulary: Vocabulary,
    },

    /// Check whether a term is stored
    Check {
        /// Term to look up
        term: String,

        #[clap(flatten)]
        vocabulary: Vocabulary,
    },

    /// List stored terms in order
    List {
        /// Only list terms starting with this prefix
        #[clap(short, long)]
        prefix: Option<String>,

        #[clap(flatten)]
        vocabulary: Vocabulary,
    },

    /// Validate the configuration file
    Validate,

    /// Generate a default configuration file
    GenConfig {
        /// Path to output configuration file
        #[clap(short, long, value_parser)]
        output: PathBuf,
    },
}

impl Command {
    /// Vocabulary file read by the command, if any.
    fn vocabulary_path(&self) -> Option<&Path> {
        match self {
            Command::Complete { vocabulary, .. }
            | Command::Check { vocabulary, .. }
            | Command::List { vocabulary, .. } => Some(&vocabulary.terms),
            Command::Validate | Command::GenConfig { .. } => None,
        }
    }
}

/// Initialize the logging system.
fn init_logging(config: &LogConfig) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_file(config.source_location)
        .with_line_number(config.source_location);

    let result = if config.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };

    result.context("Failed to set global tracing subscriber")
}

/// Prints an optional completion.
fn print_completion(
    json: bool,
    prefix: &str,
    completion: Option<String>,
    report: &LoadReport,
) -> HokuResult<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string(&json!({
                "prefix": prefix,
                "completion": completion,
                "load": report,
            }))?
        );
    } else if let Some(completion) = completion {
        println!("{completion}");
    }
    Ok(())
}

/// Executes a query command.
fn run(command: Command, config: &HokuConfig, json: bool) -> HokuResult<()> {
    match command {
        Command::Complete {
            prefix,
            weighted,
            first,
            vocabulary,
        } => {
            let (index, report) = commands::load_index(config, &vocabulary.terms)?;
            let mode = CompletionMode::resolve(weighted, first, &config.suggest);
            let completion = commands::complete(&index, &prefix, mode)?;
            print_completion(json, &prefix, completion, &report)
        }
        Command::Check { term, vocabulary } => {
            let (index, report) = commands::load_index(config, &vocabulary.terms)?;
            let found = index.contains(&term)?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string(&json!({ "term": term, "found": found, "load": report }))?
                );
            } else {
                println!("{found}");
            }
            Ok(())
        }
        Command::List { prefix, vocabulary } => {
            let (index, report) = commands::load_index(config, &vocabulary.terms)?;
            let terms = commands::list(&index, prefix.as_deref(), config.suggest.list_limit)?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string(&json!({ "terms": terms, "load": report }))?
                );
            } else {
                for term in terms {
                    println!("{term}");
                }
            }
            Ok(())
        }
        Command::Validate => {
            info!("Configuration validated successfully");
            if json {
                println!("{}", serde_json::to_string(config)?);
            }
            Ok(())
        }
        Command::GenConfig { output } => {
            info!("Generating default configuration");
            let default_config = HokuConfig::default();

            // Create parent directories if they don't exist
            if let Some(parent) = output.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let toml = toml::to_string_pretty(&default_config)
                .map_err(|e| HokuError::Custom(format!("Failed to serialize config: {e}")))?;
            std::fs::write(&output, toml)?;

            info!("Default configuration written to {:?}", output);
            Ok(())
        }
    }
}

/// Main entry point for the application.
fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Generating a config must work even when the current one is broken
    let config = match &args.command {
        Command::GenConfig { .. } => HokuConfig::default(),
        _ => match ConfigLoader::new(args.config.as_deref(), ENV_PREFIX).load() {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Configuration error: {e}");
                process::exit(2);
            }
        },
    };

    init_logging(&config.log)?;
    set_error_reporter(Arc::new(TracingErrorReporter));

    let component = match &args.command {
        Command::Complete { .. } => "complete",
        Command::Check { .. } => "check",
        Command::List { .. } => "list",
        Command::Validate => "validate",
        Command::GenConfig { .. } => "gen-config",
    };

    let details = args
        .command
        .vocabulary_path()
        .map(|path| format!("vocabulary: {}", path.display()));

    if let Err(error) = run(args.command, &config, args.json) {
        let mut context = ErrorContext::new(error, component);
        if let Some(details) = details {
            context = context.with_details(details);
        }
        report_error(&context);
        eprintln!("{context}");
        process::exit(1);
    }

    Ok(())
}
