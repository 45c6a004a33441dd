use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::CorpusConfig;
use crate::errors::VerbNetError;

/// Finds class documents on disk.
#[derive(Debug)]
pub struct CorpusDiscoverer;

impl CorpusDiscoverer {
    /// Recursively scans `root` for files with a configured extension.
    ///
    /// The returned list is sorted, which fixes the class discovery order and
    /// therefore the order of multi-match index results.
    pub fn discover_documents<P: AsRef<Path>>(
        root: P,
        config: &CorpusConfig,
    ) -> Result<Vec<PathBuf>, VerbNetError> {
        let mut files = Vec::new();
        for entry in WalkDir::new(root).follow_links(config.follow_links) {
            let entry = entry?;

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if !config.accepts(path) {
                continue;
            }

            files.push(path.to_path_buf());
        }
        files.sort();
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn finds_only_configured_extensions_in_sorted_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("want-32.1.xml"), "<VNCLASS ID=\"want-32.1\"/>").unwrap();
        fs::write(dir.path().join("nested/admire-31.2.xml"), "<VNCLASS ID=\"admire-31.2\"/>").unwrap();
        fs::write(dir.path().join("vn_schema-3.xsd"), "").unwrap();

        let files = CorpusDiscoverer::discover_documents(dir.path(), &CorpusConfig::default()).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().display().to_string())
            .collect();
        assert_eq!(names, vec!["nested/admire-31.2.xml", "want-32.1.xml"]);
    }

    #[test]
    fn missing_root_is_an_error() {
        let err = CorpusDiscoverer::discover_documents("/definitely/not/here", &CorpusConfig::default())
            .unwrap_err();
        assert!(matches!(err, VerbNetError::Walk { .. }));
    }
}
