//! Loading the sample corpus from disk and querying it.

mod common;

use std::fs;

use common::{fixture_corpus, fixture_dir, sequential_fixture_corpus};
use verbnet::{Corpus, CorpusConfig, ErrorCategory, IntegrityError, VerbNetError};

#[test]
fn wish_scenario_returns_a_single_frame() {
    let corpus = fixture_corpus();
    let found = corpus.find_frames("NP V NP", "wish");

    assert_eq!(found.len(), 1);
    assert_eq!(&*found[0].class_id, "wish-62");
    assert_eq!(found[0].frame.primary_pattern, "NP V NP");
    assert_eq!(found[0].frame.description_number(), Some("8.1"));
    assert_eq!(
        found[0].frame.description.get("primary").map(String::as_str),
        Some("NP V NP")
    );
}

#[test]
fn member_attributes_survive_without_name() {
    let corpus = fixture_corpus();
    let wish = &corpus.members("wish-62").unwrap()["wish"];

    assert_eq!(wish.attributes.len(), 2);
    assert_eq!(wish.grouping(), Some("wish.02"));
    assert_eq!(wish.wordnet_sense(), Some("wish%2:37:02"));
    assert_eq!(wish.get("name"), None);
}

#[test]
fn nested_subclasses_are_addressable() {
    let corpus = fixture_corpus();
    let ids: Vec<&str> = corpus.class_ids().collect();
    assert_eq!(ids, vec!["want-32.1", "want-32.1-1", "want-32.1-1-1", "wish-62"]);

    let deepest = corpus.class("want-32.1-1-1").unwrap();
    assert!(deepest.has_member("covet"));
    assert!(deepest.frames.contains_key("NP V NP ADJ"));

    // Subclass members are not folded into the parent.
    assert!(!corpus.class("want-32.1").unwrap().has_member("covet"));
}

#[test]
fn every_frame_is_indexed_under_every_member() {
    let corpus = fixture_corpus();
    for class in corpus.classes() {
        for (pattern, frame) in &class.frames {
            for member in class.members.keys() {
                let found = corpus.find_frames(pattern.as_str(), member);
                assert!(
                    found
                        .iter()
                        .any(|m| *m.class_id == *class.id && *m.frame == *frame),
                    "{} / {pattern} / {member} missing from the index",
                    class.id
                );
            }
        }
    }
}

#[test]
fn token_and_string_patterns_agree() {
    let corpus = fixture_corpus();
    assert_eq!(
        corpus.find_frames("NP V NP", "wish"),
        corpus.find_frames(["NP", "V", "NP"], "wish")
    );
    assert_eq!(
        corpus.find_frames("NP V S_INF", "hope"),
        corpus.find_frames(vec!["NP".to_string(), "V".into(), "S_INF".into()], "hope")
    );
}

#[test]
fn shared_keys_keep_discovery_order() {
    let corpus = fixture_corpus();
    let found = corpus.find_frames("NP V S_INF", "hope");
    let ids: Vec<&str> = found.iter().map(|m| &*m.class_id).collect();
    assert_eq!(ids, vec!["want-32.1-1", "wish-62"]);
}

#[test]
fn unknown_inputs_are_safe() {
    let corpus = fixture_corpus();
    assert!(corpus.find_frames("NP V NP", "nonexistent-verb").is_empty());
    assert!(corpus.find_frames("NP NP NP", "wish").is_empty());

    let err = corpus.class("nonexistent-class").unwrap_err();
    assert!(matches!(err, VerbNetError::UnknownClass { .. }));
    assert_eq!(err.category(), ErrorCategory::Query);
    assert!(!err.is_fatal());
}

#[test]
fn member_lookup_spans_classes() {
    let corpus = fixture_corpus();
    assert_eq!(corpus.classes_for_member("hope"), vec!["want-32.1-1", "wish-62"]);
    assert!(corpus.classes_for_member("nonexistent-verb").is_empty());
}

#[test]
fn examples_are_unescaped_and_restrictions_kept() {
    let corpus = fixture_corpus();
    let frame = &corpus.frames("wish-62").unwrap()["NP V S_INF"];
    assert_eq!(
        frame.examples,
        vec![vec!["I hope to see you & your sister.".to_string()]]
    );

    let experiencer = &corpus.roles("wish-62").unwrap()["Experiencer"];
    assert_eq!(
        experiencer[0].pretty(),
        "(selrestrs (selrestr type=animate value=+))"
    );
}

#[test]
fn stats_count_the_whole_corpus() {
    let stats = fixture_corpus().stats();
    assert_eq!(stats.classes, 4);
    assert_eq!(stats.members, 8);
    assert_eq!(stats.frames, 5);
    assert_eq!(stats.index_keys, 9);
    assert_eq!(stats.index_entries, 10);
}

#[test]
fn parallel_and_sequential_loads_match() {
    let parallel = fixture_corpus();
    let sequential = sequential_fixture_corpus();
    assert_eq!(parallel.classes(), sequential.classes());
    assert_eq!(parallel.stats(), sequential.stats());
}

#[test]
fn non_document_files_are_skipped() {
    assert!(fixture_dir().join("README").exists());
    assert!(!fixture_corpus().contains("README"));
}

// =====================
// Failure modes
// =====================

#[test]
fn malformed_document_aborts_the_load() {
    let dir = tempfile::tempdir().unwrap();
    fs::copy(fixture_dir().join("wish-62.xml"), dir.path().join("wish-62.xml")).unwrap();
    fs::write(dir.path().join("broken.xml"), "<VNCLASS ID=\"b-1\"><MEMBERS></VNCLASS>").unwrap();

    let err = Corpus::load(dir.path(), &CorpusConfig::default()).unwrap_err();
    assert!(matches!(err, VerbNetError::MalformedDocument { .. }), "{err:?}");
    assert!(err.is_fatal());
    assert_eq!(err.category(), ErrorCategory::Initialization);
}

#[test]
fn oversized_files_are_rejected_before_reading() {
    let dir = tempfile::tempdir().unwrap();
    fs::copy(fixture_dir().join("wish-62.xml"), dir.path().join("wish-62.xml")).unwrap();
    let config = CorpusConfig {
        max_document_bytes: Some(8),
        ..CorpusConfig::default()
    };

    match Corpus::load(dir.path(), &config).unwrap_err() {
        VerbNetError::DocumentTooLarge { path, size, limit } => {
            assert!(path.ends_with("wish-62.xml"), "{path}");
            assert!(size > 8);
            assert_eq!(limit, 8);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn invalid_utf8_is_decoded_lossily() {
    let dir = tempfile::tempdir().unwrap();
    let mut bytes = br#"<VNCLASS ID="bad-1"><MEMBERS><MEMBER name="run"/></MEMBERS><FRAMES><FRAME><DESCRIPTION primary="NP V"/><EXAMPLES><EXAMPLE>caf"#.to_vec();
    bytes.push(0xE9);
    bytes.extend_from_slice(b"</EXAMPLE></EXAMPLES></FRAME></FRAMES></VNCLASS>");
    fs::write(dir.path().join("bad-1.xml"), bytes).unwrap();

    let corpus = Corpus::load(dir.path(), &CorpusConfig::default()).unwrap();
    let frame = &corpus.frames("bad-1").unwrap()["NP V"];
    assert_eq!(frame.examples, vec![vec!["caf\u{FFFD}".to_string()]]);
}

#[test]
fn duplicate_class_across_documents_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let wish = fs::read_to_string(fixture_dir().join("wish-62.xml")).unwrap();
    fs::write(dir.path().join("a.xml"), &wish).unwrap();
    fs::write(dir.path().join("b.xml"), &wish).unwrap();

    match Corpus::load(dir.path(), &CorpusConfig::default()).unwrap_err() {
        VerbNetError::CorpusIntegrity { source, .. } => assert_eq!(
            source,
            IntegrityError::DuplicateClass {
                class_id: "wish-62".to_string()
            }
        ),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn empty_directory_gives_an_empty_corpus() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = Corpus::load(dir.path(), &CorpusConfig::default()).unwrap();
    assert!(corpus.is_empty());
    assert!(corpus.find_frames("NP V NP", "wish").is_empty());
}

#[test]
fn yaml_config_drives_the_load() {
    let dir = tempfile::tempdir().unwrap();
    fs::copy(fixture_dir().join("wish-62.xml"), dir.path().join("wish-62.vn")).unwrap();
    let config_path = dir.path().join("verbnet.yaml");
    fs::write(&config_path, "extensions: [vn]\nparallel: false\n").unwrap();

    let config = CorpusConfig::from_yaml_file(&config_path).unwrap();
    let corpus = Corpus::load(dir.path(), &config).unwrap();
    assert_eq!(corpus.class_ids().collect::<Vec<_>>(), vec!["wish-62"]);
}
