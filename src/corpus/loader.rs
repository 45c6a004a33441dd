//! Per-document pipeline: read, normalize, extract.
//!
//! Documents are independent, so they run on a rayon pool. Results come back
//! in input order; any failure aborts the whole batch, and the failure
//! reported is the one from the earliest document in input order.

use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::config::CorpusConfig;
use crate::errors::{DocumentSource, VerbNetError};
use crate::extract::ClassExtractor;
use crate::integrity_err;
use crate::model::VerbClass;
use crate::syntax::{normalize, read_document, ReadError};

/// The classes extracted from one document, parent class first.
#[derive(Debug, Clone)]
pub struct DocumentClasses {
    pub document: String,
    pub classes: Vec<VerbClass>,
}

pub struct DocumentLoader<'c> {
    config: &'c CorpusConfig,
    extractor: ClassExtractor,
}

impl<'c> DocumentLoader<'c> {
    pub fn new(config: &'c CorpusConfig) -> Self {
        Self {
            config,
            extractor: ClassExtractor::new(config.strict_frames),
        }
    }

    pub fn load_files(&self, paths: &[PathBuf]) -> Result<Vec<DocumentClasses>, VerbNetError> {
        self.run(paths, |path| self.load_file(path))
    }

    pub fn load_sources(
        &self,
        sources: &[DocumentSource],
    ) -> Result<Vec<DocumentClasses>, VerbNetError> {
        self.run(sources, |source| {
            self.check_size(&source.name, source.content.len() as u64)?;
            self.process(source, Instant::now())
        })
    }

    fn run<T, F>(&self, items: &[T], load: F) -> Result<Vec<DocumentClasses>, VerbNetError>
    where
        T: Sync,
        F: Fn(&T) -> Result<DocumentClasses, VerbNetError> + Sync + Send,
    {
        if !self.config.parallel {
            return items.iter().map(load).collect();
        }
        // Collected in full; the error kept is the earliest in input order.
        let results: Vec<Result<DocumentClasses, VerbNetError>> = if self.config.threads == 0 {
            items.par_iter().map(load).collect()
        } else {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.config.threads)
                .build()?;
            pool.install(|| items.par_iter().map(&load).collect())
        };
        results.into_iter().collect()
    }

    fn load_file(&self, path: &Path) -> Result<DocumentClasses, VerbNetError> {
        let name = path.display().to_string();
        let size = fs::metadata(path)
            .map_err(|e| VerbNetError::io(path, e))?
            .len();
        self.check_size(&name, size)?;

        let started = Instant::now();
        let bytes = fs::read(path).map_err(|e| VerbNetError::io(path, e))?;
        let content = String::from_utf8(bytes).unwrap_or_else(|e| {
            tracing::warn!(
                document = %name,
                valid_up_to = e.utf8_error().valid_up_to(),
                "invalid UTF-8, decoding lossily"
            );
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        });
        self.process(&DocumentSource::from_path(path, content), started)
    }

    fn check_size(&self, name: &str, size: u64) -> Result<(), VerbNetError> {
        match self.config.max_document_bytes {
            Some(limit) if size > limit => Err(VerbNetError::DocumentTooLarge {
                path: name.to_string(),
                size,
                limit,
            }),
            _ => Ok(()),
        }
    }

    fn process(
        &self,
        source: &DocumentSource,
        started: Instant,
    ) -> Result<DocumentClasses, VerbNetError> {
        let deadline = self.config.document_timeout().map(|limit| started + limit);

        let raw = read_document(&source.content, deadline).map_err(|e| match e {
            ReadError::Syntax { message, position } => {
                VerbNetError::malformed(source, message, position)
            }
            ReadError::DeadlineExceeded { .. } => self.timeout(source),
        })?;
        let node = normalize(raw);
        let classes = self
            .extractor
            .extract_classes(&node)
            .map_err(|e| integrity_err!(source.name, e))?;

        if deadline.is_some_and(|d| Instant::now() >= d) {
            return Err(self.timeout(source));
        }

        tracing::debug!(
            document = %source.name,
            classes = classes.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "loaded document"
        );
        Ok(DocumentClasses {
            document: source.name.clone(),
            classes,
        })
    }

    fn timeout(&self, source: &DocumentSource) -> VerbNetError {
        VerbNetError::DocumentTimeout {
            path: source.name.clone(),
            limit_ms: self.config.document_timeout_ms.unwrap_or_default(),
        }
    }
}
