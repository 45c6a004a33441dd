//! The VerbNet Command-Line Interface.
//!
//! This module is the main entry point for all CLI commands and orchestrates
//! the core library functions.

use clap::Parser;
use std::process;
use tracing_subscriber::EnvFilter;

use crate::cli::args::{Command, VerbNetArgs};
use crate::cli::output::Printer;
use crate::errors::{print_error, VerbNetError};
use crate::{Corpus, CorpusConfig};

pub mod args;
pub mod output;

/// The main entry point for the CLI.
pub fn run() {
    init_tracing();
    let args = VerbNetArgs::parse();

    if let Err(e) = execute(&args) {
        print_error(e);
        process::exit(1);
    }
}

/// Installs the log subscriber; `RUST_LOG` overrides the `warn` default.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Loads the corpus named by `args` and runs the requested subcommand.
pub fn execute(args: &VerbNetArgs) -> Result<(), VerbNetError> {
    let config = match &args.config {
        Some(path) => CorpusConfig::from_yaml_file(path)?,
        None => CorpusConfig::default(),
    };
    let corpus = Corpus::load(args.command.corpus(), &config)?;
    let mut printer = Printer::new(output::stdout(), args.json);

    let written = match &args.command {
        Command::Stats { .. } => printer.stats(&corpus.stats()),
        Command::Classes { .. } => printer.class_ids(corpus.class_ids()),
        Command::Class { class_id, .. } => printer.class(corpus.class(class_id)?),
        Command::Frames {
            member, pattern, ..
        } => {
            let found: Vec<_> = corpus.find_frames(pattern, member).into_iter().collect();
            printer.matches(&found)
        }
        Command::Member { member, .. } => {
            printer.class_ids(corpus.classes_for_member(member).into_iter())
        }
    };
    written.map_err(|e| VerbNetError::io(std::path::Path::new("<stdout>"), e))
}
