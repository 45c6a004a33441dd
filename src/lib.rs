//! VerbNet corpus extraction and frame indexing.
//!
//! Pipeline: [`syntax::read_document`] -> [`syntax::normalize`] ->
//! [`extract::extract_classes`] -> [`index::FrameIndex`], assembled into a
//! read-only [`Corpus`].

pub use crate::config::CorpusConfig;
pub use crate::corpus::{Corpus, CorpusStats};
pub use crate::errors::{ErrorCategory, IntegrityError, VerbNetError};
pub use crate::index::{FrameIndex, FrameKey, FrameMatch, IntoPattern};
pub use crate::model::{Frame, MemberInfo, SelRestriction, VerbClass};

pub mod cli;
pub mod config;
pub mod corpus;
pub mod errors;
pub mod extract;
pub mod index;
pub mod model;
pub mod syntax;
