//! Defines the command-line arguments and subcommands for the VerbNet CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "verbnet",
    version,
    about = "Load a VerbNet corpus and query its classes and frames."
)]
pub struct VerbNetArgs {
    /// YAML corpus configuration.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print results as JSON.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Summarize a corpus: classes, members, frames and index size.
    Stats {
        /// Directory (or single file) holding the class documents.
        corpus: PathBuf,
    },
    /// List class ids in discovery order.
    Classes {
        /// Directory (or single file) holding the class documents.
        corpus: PathBuf,
    },
    /// Show the members, roles and frames of one class.
    Class {
        /// Directory (or single file) holding the class documents.
        corpus: PathBuf,
        /// Class id, e.g. `wish-62`.
        class_id: String,
    },
    /// Look up the frames a member takes with a syntactic pattern.
    Frames {
        /// Directory (or single file) holding the class documents.
        corpus: PathBuf,
        /// The verb, e.g. `wish`.
        member: String,
        /// Pattern tokens, e.g. `NP V NP`; joined with single spaces.
        #[arg(required = true, num_args = 1..)]
        pattern: Vec<String>,
    },
    /// List the classes a member belongs to.
    Member {
        /// Directory (or single file) holding the class documents.
        corpus: PathBuf,
        /// The verb, e.g. `wish`.
        member: String,
    },
}

impl Command {
    pub fn corpus(&self) -> &PathBuf {
        match self {
            Command::Stats { corpus }
            | Command::Classes { corpus }
            | Command::Class { corpus, .. }
            | Command::Frames { corpus, .. }
            | Command::Member { corpus, .. } => corpus,
        }
    }
}
