//! VerbNet Error Handling
//!
//! Every failure the crate can produce is a `VerbNetError`. Initialization
//! failures (unreadable, malformed or structurally incomplete documents) abort
//! the corpus build; query failures (`UnknownClass`) are ordinary values
//! handed back to the caller.

use miette::{Diagnostic, NamedSource, SourceSpan};
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

use crate::syntax::Symbol;

/// Shared, named document source attached to syntax diagnostics.
pub type SourceArc = Arc<NamedSource<String>>;

// ============================================================================
// SOURCE CONTEXT
// ============================================================================

/// A document name paired with its text, used to label diagnostics.
#[derive(Debug, Clone)]
pub struct DocumentSource {
    pub name: String,
    pub content: String,
}

impl DocumentSource {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    pub fn from_path(path: &Path, content: impl Into<String>) -> Self {
        Self::new(path.display().to_string(), content)
    }

    /// Convert to NamedSource for use with miette error reporting
    pub fn to_named_source(&self) -> SourceArc {
        Arc::new(NamedSource::new(self.name.clone(), self.content.clone()))
    }
}

// ============================================================================
// ERROR TYPES
// ============================================================================

/// A structurally valid document that is missing something the model needs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntegrityError {
    #[error("expected a <vnclass> element, found <{found}>")]
    UnexpectedRoot { found: Symbol },

    #[error("<{element}> without a '{attribute}' attribute{}", in_class(.class_id))]
    MissingAttribute {
        element: Symbol,
        attribute: &'static str,
        class_id: Option<String>,
    },

    #[error("class '{class_id}' declares frame pattern '{pattern}' more than once")]
    DuplicateFrame { class_id: String, pattern: String },

    #[error("class '{class_id}' is defined more than once")]
    DuplicateClass { class_id: String },
}

fn in_class(class_id: &Option<String>) -> String {
    match class_id {
        Some(id) => format!(" in class '{id}'"),
        None => String::new(),
    }
}

/// Unified error type for corpus construction and queries.
#[derive(Debug, Error, Diagnostic)]
pub enum VerbNetError {
    #[error("malformed document '{path}': {message}")]
    #[diagnostic(
        code(verbnet::document::malformed),
        help("the document is not well-formed XML; the corpus cannot be built until it is fixed")
    )]
    MalformedDocument {
        path: String,
        message: String,
        #[source_code]
        src: SourceArc,
        #[label("{message}")]
        span: SourceSpan,
    },

    #[error("document '{path}' was not processed within {limit_ms} ms")]
    #[diagnostic(code(verbnet::document::timeout))]
    DocumentTimeout { path: String, limit_ms: u64 },

    #[error("document '{path}' is {size} bytes, above the {limit} byte limit")]
    #[diagnostic(
        code(verbnet::document::too_large),
        help("raise `max_document_bytes` in the corpus configuration if the document is legitimate")
    )]
    DocumentTooLarge { path: String, size: u64, limit: u64 },

    #[error("corpus integrity error in '{path}': {source}")]
    #[diagnostic(code(verbnet::corpus::integrity))]
    CorpusIntegrity {
        path: String,
        #[source]
        source: IntegrityError,
    },

    #[error("failed to read '{path}': {source}")]
    #[diagnostic(code(verbnet::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk corpus directory: {source}")]
    #[diagnostic(code(verbnet::io::walk))]
    Walk {
        #[from]
        source: walkdir::Error,
    },

    #[error("invalid configuration '{path}': {message}")]
    #[diagnostic(code(verbnet::config))]
    Config { path: String, message: String },

    #[error("failed to start worker pool: {source}")]
    #[diagnostic(code(verbnet::config::thread_pool))]
    ThreadPool {
        #[from]
        source: rayon::ThreadPoolBuildError,
    },

    #[error("unknown class '{class_id}'")]
    #[diagnostic(code(verbnet::query::unknown_class))]
    UnknownClass { class_id: String },
}

/// Broad classification used by callers deciding whether to keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// The corpus could not be built; nothing can be queried.
    Initialization,
    /// A lookup against a built corpus found nothing to return.
    Query,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Initialization => write!(f, "initialization"),
            ErrorCategory::Query => write!(f, "query"),
        }
    }
}

impl VerbNetError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            VerbNetError::UnknownClass { .. } => ErrorCategory::Query,
            _ => ErrorCategory::Initialization,
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.category() == ErrorCategory::Initialization
    }

    pub(crate) fn malformed(
        source: &DocumentSource,
        message: impl Into<String>,
        position: usize,
    ) -> Self {
        let offset = position.min(source.content.len());
        VerbNetError::MalformedDocument {
            path: source.name.clone(),
            message: message.into(),
            src: source.to_named_source(),
            span: SourceSpan::from(offset..offset),
        }
    }

    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        VerbNetError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

/// Builds a `VerbNetError::CorpusIntegrity` for a document.
///
/// `integrity_err!(path, IntegrityError::DuplicateClass { class_id })`
#[macro_export]
macro_rules! integrity_err {
    ($path:expr, $source:expr) => {
        $crate::errors::VerbNetError::CorpusIntegrity {
            path: $path.to_string(),
            source: $source,
        }
    };
}

/// Builds a `IntegrityError::MissingAttribute`.
///
/// `missing_attr!(Symbol::MEMBER, "name", Some(class_id))`
#[macro_export]
macro_rules! missing_attr {
    ($element:expr, $attribute:expr) => {
        $crate::errors::IntegrityError::MissingAttribute {
            element: $element,
            attribute: $attribute,
            class_id: None,
        }
    };
    ($element:expr, $attribute:expr, $class_id:expr) => {
        $crate::errors::IntegrityError::MissingAttribute {
            element: $element,
            attribute: $attribute,
            class_id: Some($class_id.to_string()),
        }
    };
}

// ============================================================================
// ERROR FORMATTING UTILITIES
// ============================================================================

/// Prints a VerbNetError with full miette diagnostics
pub fn print_error(error: VerbNetError) {
    use miette::Report;
    let report = Report::new(error);
    eprintln!("{report:?}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_class_is_a_query_error() {
        let err = VerbNetError::UnknownClass {
            class_id: "nope-1".into(),
        };
        assert_eq!(err.category(), ErrorCategory::Query);
        assert!(!err.is_fatal());
        assert_eq!(err.to_string(), "unknown class 'nope-1'");
    }

    #[test]
    fn integrity_errors_name_the_class() {
        let err = integrity_err!(
            "wish-62.xml",
            missing_attr!(Symbol::MEMBER, "name", "wish-62")
        );
        assert!(err.is_fatal());
        assert_eq!(
            err.to_string(),
            "corpus integrity error in 'wish-62.xml': <member> without a 'name' attribute in class 'wish-62'"
        );
    }

    #[test]
    fn malformed_span_is_clamped_to_the_source() {
        let source = DocumentSource::new("bad.xml", "<vnclass>");
        let err = VerbNetError::malformed(&source, "unclosed element", 500);
        let VerbNetError::MalformedDocument { span, .. } = &err else {
            panic!("expected MalformedDocument");
        };
        assert_eq!(span.offset(), 9);
        assert_eq!(
            err.code().map(|c| c.to_string()),
            Some("verbnet::document::malformed".to_string())
        );
    }
}
