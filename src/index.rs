//! # Frame Index
//!
//! Reverse index from `(pattern, member)` to every frame that applies.
//!
//! Entries keep corpus order: classes in discovery order, then each class's
//! frames, then its members. Nothing else is implied by the order of a
//! result list; callers that want precedence must sort it themselves.

use im::{HashMap as ImHashMap, Vector};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

use crate::model::{Frame, VerbClass};

/// Lookup key: a space-joined pattern plus a member name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FrameKey {
    pub pattern: String,
    pub member: String,
}

impl FrameKey {
    pub fn new(pattern: impl IntoPattern, member: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into_pattern(),
            member: member.into(),
        }
    }
}

/// One lookup result: the frame and the class it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameMatch {
    pub class_id: Arc<str>,
    pub frame: Arc<Frame>,
}

/// Anything that can name a pattern: a single string, or a token sequence
/// joined with single spaces.
pub trait IntoPattern {
    fn into_pattern(self) -> String;
}

impl IntoPattern for &str {
    fn into_pattern(self) -> String {
        self.to_string()
    }
}

impl IntoPattern for String {
    fn into_pattern(self) -> String {
        self
    }
}

impl IntoPattern for &String {
    fn into_pattern(self) -> String {
        self.clone()
    }
}

impl<S: AsRef<str>> IntoPattern for &[S] {
    fn into_pattern(self) -> String {
        join_tokens(self)
    }
}

impl<S: AsRef<str>> IntoPattern for Vec<S> {
    fn into_pattern(self) -> String {
        join_tokens(&self)
    }
}

impl<S: AsRef<str>> IntoPattern for &Vec<S> {
    fn into_pattern(self) -> String {
        join_tokens(self)
    }
}

impl<S: AsRef<str>, const N: usize> IntoPattern for [S; N] {
    fn into_pattern(self) -> String {
        join_tokens(&self)
    }
}

fn join_tokens<S: AsRef<str>>(tokens: &[S]) -> String {
    tokens
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join(" ")
}

/// Immutable `(pattern, member)` index. Cloning is cheap.
#[derive(Debug, Clone, Default)]
pub struct FrameIndex {
    entries: ImHashMap<FrameKey, Vector<FrameMatch>>,
    len: usize,
}

impl FrameIndex {
    /// Folds every class/frame/member combination into the index.
    pub fn build<'a, I>(classes: I) -> Self
    where
        I: IntoIterator<Item = &'a VerbClass>,
    {
        let mut grouped: HashMap<FrameKey, Vec<FrameMatch>> = HashMap::new();
        let mut len = 0usize;

        for class in classes {
            let class_id: Arc<str> = Arc::from(class.id.as_str());
            for (pattern, frame) in &class.frames {
                let frame = Arc::new(frame.clone());
                for member in class.members.keys() {
                    let key = FrameKey {
                        pattern: pattern.clone(),
                        member: member.clone(),
                    };
                    grouped.entry(key).or_default().push(FrameMatch {
                        class_id: Arc::clone(&class_id),
                        frame: Arc::clone(&frame),
                    });
                    len += 1;
                }
            }
        }

        let entries = grouped
            .into_iter()
            .map(|(key, matches)| (key, matches.into_iter().collect::<Vector<_>>()))
            .collect();
        Self { entries, len }
    }

    /// All frames for `(pattern, member)`; empty when nothing matches.
    pub fn find(&self, pattern: impl IntoPattern, member: &str) -> Vector<FrameMatch> {
        self.entries
            .get(&FrameKey::new(pattern, member))
            .cloned()
            .unwrap_or_default()
    }

    /// Number of distinct `(pattern, member)` keys.
    pub fn key_count(&self) -> usize {
        self.entries.len()
    }

    /// Total number of `(class, frame)` entries across all keys.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MemberInfo;
    use std::collections::BTreeMap;

    fn frame(pattern: &str) -> Frame {
        Frame {
            primary_pattern: pattern.to_string(),
            description: BTreeMap::from([("primary".to_string(), pattern.to_string())]),
            examples: vec![],
            syntax: vec![],
            semantics: vec![],
        }
    }

    fn class(id: &str, members: &[&str], patterns: &[&str]) -> VerbClass {
        let mut class = VerbClass::new(id);
        for m in members {
            class.members.insert(m.to_string(), MemberInfo::default());
        }
        for p in patterns {
            class.frames.insert(p.to_string(), frame(p));
        }
        class
    }

    #[test]
    fn pattern_forms_are_equivalent() {
        assert_eq!("NP V NP".into_pattern(), "NP V NP");
        assert_eq!(["NP", "V", "NP"].into_pattern(), "NP V NP");
        assert_eq!(vec!["NP".to_string(), "V".to_string()].into_pattern(), "NP V");
        assert_eq!((&["NP", "V"][..]).into_pattern(), "NP V");
    }

    #[test]
    fn every_combination_is_indexed() {
        let classes = [class("a-1", &["x", "y"], &["NP V", "NP V NP"])];
        let index = FrameIndex::build(&classes);
        assert_eq!(index.key_count(), 4);
        assert_eq!(index.len(), 4);
        assert_eq!(index.find("NP V", "y")[0].class_id.as_ref(), "a-1");
    }

    #[test]
    fn matches_keep_class_order() {
        let classes = [
            class("b-2", &["run"], &["NP V"]),
            class("a-1", &["run"], &["NP V"]),
        ];
        let index = FrameIndex::build(&classes);
        let found = index.find("NP V", "run");
        let ids: Vec<&str> = found.iter().map(|m| m.class_id.as_ref()).collect();
        assert_eq!(ids, vec!["b-2", "a-1"]);
    }

    #[test]
    fn unknown_keys_are_empty() {
        let index = FrameIndex::build(&[class("a-1", &["x"], &["NP V"])]);
        assert!(index.find("NP V", "nonexistent-verb").is_empty());
        assert!(index.find("NP", "x").is_empty());
    }
}
