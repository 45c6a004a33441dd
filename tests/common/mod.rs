//! Shared helpers for the integration suites.

#![allow(dead_code)]

use std::path::PathBuf;

use verbnet::{Corpus, CorpusConfig};

/// The checked-in sample corpus.
pub fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/verbnet")
}

pub fn fixture_corpus() -> Corpus {
    Corpus::load(fixture_dir(), &CorpusConfig::default()).expect("fixture corpus loads")
}

/// Same corpus, built on the calling thread only.
pub fn sequential_fixture_corpus() -> Corpus {
    let config = CorpusConfig {
        parallel: false,
        ..CorpusConfig::default()
    };
    Corpus::load(fixture_dir(), &config).expect("fixture corpus loads")
}
