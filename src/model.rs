//! Domain model for extracted VerbNet classes.
//!
//! Everything here is built once during corpus loading and never mutated
//! afterwards.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::syntax::{CanonicalNode, Child};

/// A raw selectional restriction tree, kept as parsed.
pub type SelRestriction = Child;

/// One VerbNet class after subclass flattening.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerbClass {
    pub id: String,
    pub members: BTreeMap<String, MemberInfo>,
    pub themroles: BTreeMap<String, Vec<SelRestriction>>,
    pub frames: BTreeMap<String, Frame>,
}

impl VerbClass {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            members: BTreeMap::new(),
            themroles: BTreeMap::new(),
            frames: BTreeMap::new(),
        }
    }

    pub fn has_member(&self, name: &str) -> bool {
        self.members.contains_key(name)
    }
}

/// The attributes of a `<member>` element other than `name`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct MemberInfo {
    pub attributes: BTreeMap<String, String>,
}

impl MemberInfo {
    pub fn new(attributes: BTreeMap<String, String>) -> Self {
        Self { attributes }
    }

    pub fn grouping(&self) -> Option<&str> {
        self.get("grouping")
    }

    /// The WordNet sense key(s), stored under `wn`.
    pub fn wordnet_sense(&self) -> Option<&str> {
        self.get("wn")
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

/// A syntactic pattern with its semantics and examples.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Frame {
    /// `description.primary`, the index join key.
    pub primary_pattern: String,
    pub description: BTreeMap<String, String>,
    pub examples: Vec<Vec<String>>,
    pub syntax: Vec<Child>,
    pub semantics: Vec<Child>,
}

impl Frame {
    pub fn description_number(&self) -> Option<&str> {
        self.description.get("descriptionnumber").map(String::as_str)
    }

    /// Syntax constituents, skipping any stray text.
    pub fn syntax_nodes(&self) -> impl Iterator<Item = &CanonicalNode> {
        self.syntax.iter().filter_map(Child::as_node)
    }

    /// Semantic predicates, skipping any stray text.
    pub fn semantic_nodes(&self) -> impl Iterator<Item = &CanonicalNode> {
        self.semantics.iter().filter_map(Child::as_node)
    }
}
