//! Corpus loading configuration.
//!
//! Every field has a default, so an empty YAML document (or no file at all)
//! yields a usable configuration.
//!
//! ```yaml
//! extensions: [xml]
//! strict_frames: false
//! parallel: true
//! threads: 0
//! document_timeout_ms: 10000
//! max_document_bytes: 16777216
//! follow_links: false
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::errors::VerbNetError;

pub const DEFAULT_DOCUMENT_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_MAX_DOCUMENT_BYTES: u64 = 16 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CorpusConfig {
    /// File extensions (without the dot) treated as class documents.
    pub extensions: Vec<String>,
    /// Reject duplicate frame patterns within a class instead of keeping the last.
    pub strict_frames: bool,
    /// Process documents on a worker pool.
    pub parallel: bool,
    /// Worker count; 0 uses the shared global pool.
    pub threads: usize,
    /// Per-document processing limit; `null` disables it.
    pub document_timeout_ms: Option<u64>,
    /// Per-document size limit; `null` disables it.
    pub max_document_bytes: Option<u64>,
    /// Follow symbolic links during discovery.
    pub follow_links: bool,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["xml".to_string()],
            strict_frames: false,
            parallel: true,
            threads: 0,
            document_timeout_ms: Some(DEFAULT_DOCUMENT_TIMEOUT_MS),
            max_document_bytes: Some(DEFAULT_MAX_DOCUMENT_BYTES),
            follow_links: false,
        }
    }
}

impl CorpusConfig {
    pub fn from_yaml_str(name: &str, yaml: &str) -> Result<Self, VerbNetError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(|e| VerbNetError::Config {
            path: name.to_string(),
            message: e.to_string(),
        })
    }

    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, VerbNetError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| VerbNetError::io(path, e))?;
        Self::from_yaml_str(&path.display().to_string(), &content)
    }

    pub fn document_timeout(&self) -> Option<Duration> {
        self.document_timeout_ms.map(Duration::from_millis)
    }

    /// True when `path` has one of the configured extensions (case-insensitive).
    pub fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_is_the_default() {
        assert_eq!(
            CorpusConfig::from_yaml_str("empty.yaml", "").unwrap(),
            CorpusConfig::default()
        );
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let config = CorpusConfig::from_yaml_str(
            "corpus.yaml",
            "strict_frames: true\ndocument_timeout_ms: null\n",
        )
        .unwrap();
        assert!(config.strict_frames);
        assert_eq!(config.document_timeout(), None);
        assert!(config.parallel);
        assert_eq!(config.extensions, vec!["xml"]);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = CorpusConfig::from_yaml_str("bad.yaml", "strict: true\n").unwrap_err();
        assert!(matches!(err, VerbNetError::Config { .. }));
    }

    #[test]
    fn extension_matching_ignores_case() {
        let config = CorpusConfig::default();
        assert!(config.accepts(Path::new("verbnet/wish-62.XML")));
        assert!(!config.accepts(Path::new("verbnet/README")));
        assert!(!config.accepts(Path::new("verbnet/vn_schema-3.xsd")));
    }
}
