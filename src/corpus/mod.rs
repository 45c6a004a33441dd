//! # Corpus
//!
//! The assembled, immutable VerbNet model: every class addressable by id plus
//! the frame index. Built once by [`Corpus::load`] (or one of the in-memory
//! constructors) and only read afterwards, so a `Corpus` can be shared
//! between threads freely.
//!
//! ```rust
//! use verbnet::{Corpus, CorpusConfig};
//!
//! let corpus = Corpus::from_sources(
//!     [(
//!         "wish-62.xml",
//!         r#"<VNCLASS ID="wish-62">
//!              <MEMBERS><MEMBER name="wish" wn="wish%2:37:02" grouping="wish.02"/></MEMBERS>
//!              <FRAMES><FRAME><DESCRIPTION primary="NP V NP" descriptionNumber="8.1"/></FRAME></FRAMES>
//!            </VNCLASS>"#,
//!     )],
//!     &CorpusConfig::default(),
//! )
//! .unwrap();
//!
//! let found = corpus.find_frames("NP V NP", "wish");
//! assert_eq!(found.len(), 1);
//! assert_eq!(found[0].frame.description_number(), Some("8.1"));
//! ```

use im::Vector;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::time::Instant;

use crate::config::CorpusConfig;
use crate::errors::{DocumentSource, IntegrityError, VerbNetError};
use crate::index::{FrameIndex, FrameMatch, IntoPattern};
use crate::integrity_err;
use crate::model::{Frame, MemberInfo, SelRestriction, VerbClass};

pub mod discovery;
pub mod loader;

pub use discovery::CorpusDiscoverer;
pub use loader::{DocumentClasses, DocumentLoader};

/// Document name used for classes handed in directly.
const IN_MEMORY_DOCUMENT: &str = "<memory>";

#[derive(Debug, Clone)]
pub struct Corpus {
    classes: Vec<VerbClass>,
    positions: HashMap<String, usize>,
    index: FrameIndex,
}

/// Size summary of a built corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CorpusStats {
    pub classes: usize,
    pub members: usize,
    pub frames: usize,
    pub index_keys: usize,
    pub index_entries: usize,
}

impl Corpus {
    // =====================
    // Construction
    // =====================

    /// Discovers, parses and indexes every class document under `root`.
    pub fn load<P: AsRef<Path>>(root: P, config: &CorpusConfig) -> Result<Self, VerbNetError> {
        let started = Instant::now();
        let root = root.as_ref();

        let paths = CorpusDiscoverer::discover_documents(root, config)?;
        if paths.is_empty() {
            tracing::warn!(root = %root.display(), "no class documents found");
        }

        let documents = DocumentLoader::new(config).load_files(&paths)?;
        let corpus = Self::assemble(documents)?;

        tracing::info!(
            root = %root.display(),
            documents = paths.len(),
            classes = corpus.len(),
            index_keys = corpus.index.key_count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "corpus loaded"
        );
        Ok(corpus)
    }

    /// Builds a corpus from in-memory `(name, xml)` documents, in the given order.
    pub fn from_sources<I, N, T>(sources: I, config: &CorpusConfig) -> Result<Self, VerbNetError>
    where
        I: IntoIterator<Item = (N, T)>,
        N: Into<String>,
        T: Into<String>,
    {
        let sources: Vec<DocumentSource> = sources
            .into_iter()
            .map(|(name, text)| DocumentSource::new(name, text))
            .collect();
        let documents = DocumentLoader::new(config).load_sources(&sources)?;
        Self::assemble(documents)
    }

    /// Builds a corpus from classes that were already extracted.
    pub fn from_classes(classes: Vec<VerbClass>) -> Result<Self, VerbNetError> {
        Self::assemble(vec![DocumentClasses {
            document: IN_MEMORY_DOCUMENT.to_string(),
            classes,
        }])
    }

    /// Joins per-document results in order and builds the index. Class ids
    /// must be unique across the whole corpus.
    pub fn assemble(documents: Vec<DocumentClasses>) -> Result<Self, VerbNetError> {
        let mut classes = Vec::new();
        let mut positions = HashMap::new();

        for document in documents {
            for class in document.classes {
                if positions.contains_key(&class.id) {
                    return Err(integrity_err!(
                        document.document,
                        IntegrityError::DuplicateClass { class_id: class.id }
                    ));
                }
                positions.insert(class.id.clone(), classes.len());
                classes.push(class);
            }
        }

        let index = FrameIndex::build(&classes);
        Ok(Self {
            classes,
            positions,
            index,
        })
    }

    // =====================
    // Queries
    // =====================

    pub fn class(&self, class_id: &str) -> Result<&VerbClass, VerbNetError> {
        self.positions
            .get(class_id)
            .and_then(|&position| self.classes.get(position))
            .ok_or_else(|| VerbNetError::UnknownClass {
                class_id: class_id.to_string(),
            })
    }

    pub fn members(&self, class_id: &str) -> Result<&BTreeMap<String, MemberInfo>, VerbNetError> {
        self.class(class_id).map(|class| &class.members)
    }

    pub fn roles(
        &self,
        class_id: &str,
    ) -> Result<&BTreeMap<String, Vec<SelRestriction>>, VerbNetError> {
        self.class(class_id).map(|class| &class.themroles)
    }

    pub fn frames(&self, class_id: &str) -> Result<&BTreeMap<String, Frame>, VerbNetError> {
        self.class(class_id).map(|class| &class.frames)
    }

    /// Frames matching `pattern` for `member`, in corpus order. Never fails;
    /// an unknown pattern or member yields an empty list.
    pub fn find_frames(&self, pattern: impl IntoPattern, member: &str) -> Vector<FrameMatch> {
        self.index.find(pattern, member)
    }

    /// Ids of the classes listing `member`, in discovery order.
    pub fn classes_for_member(&self, member: &str) -> Vec<&str> {
        self.classes
            .iter()
            .filter(|class| class.has_member(member))
            .map(|class| class.id.as_str())
            .collect()
    }

    // =====================
    // Accessors
    // =====================

    /// All classes in discovery order.
    pub fn classes(&self) -> &[VerbClass] {
        &self.classes
    }

    pub fn class_ids(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(|class| class.id.as_str())
    }

    pub fn contains(&self, class_id: &str) -> bool {
        self.positions.contains_key(class_id)
    }

    pub fn index(&self) -> &FrameIndex {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn stats(&self) -> CorpusStats {
        CorpusStats {
            classes: self.classes.len(),
            members: self.classes.iter().map(|c| c.members.len()).sum(),
            frames: self.classes.iter().map(|c| c.frames.len()).sum(),
            index_keys: self.index.key_count(),
            index_entries: self.index.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_class_ids_are_rejected() {
        let err = Corpus::assemble(vec![
            DocumentClasses {
                document: "a.xml".into(),
                classes: vec![VerbClass::new("x-1")],
            },
            DocumentClasses {
                document: "b.xml".into(),
                classes: vec![VerbClass::new("x-1")],
            },
        ])
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "corpus integrity error in 'b.xml': class 'x-1' is defined more than once"
        );
    }

    #[test]
    fn unknown_class_queries_return_errors() {
        let corpus = Corpus::from_classes(vec![VerbClass::new("x-1")]).unwrap();
        assert!(corpus.class("x-1").is_ok());
        for result in [
            corpus.members("nope").map(|_| ()),
            corpus.roles("nope").map(|_| ()),
            corpus.frames("nope").map(|_| ()),
            corpus.class("nope").map(|_| ()),
        ] {
            assert!(matches!(result, Err(VerbNetError::UnknownClass { .. })));
        }
    }

    #[test]
    fn empty_corpus_is_valid() {
        let corpus = Corpus::from_classes(vec![]).unwrap();
        assert!(corpus.is_empty());
        assert!(corpus.find_frames("NP V", "run").is_empty());
        assert_eq!(corpus.stats().index_keys, 0);
    }
}
