//! Markup trees for VerbNet documents
//!
//! A document goes through two tree shapes. [`RawNode`] is the generic
//! `(tag, attributes, children)` structure the reader produces straight from
//! the markup bytes. [`CanonicalNode`] is the normalized form every later
//! stage works with: symbol tags, symbol-keyed attributes and string leaves.

// ============================================================================
// IMPORTS
// ============================================================================

use serde::Serialize;
use std::collections::BTreeMap;

pub mod normalize;
pub mod reader;
pub mod symbol;

pub use normalize::normalize;
pub use reader::{read_document, ReadError};
pub use symbol::Symbol;

// ============================================================================
// GENERIC TREE
// ============================================================================

/// A node as produced by the markup reader, before normalization.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawNode {
    pub tag: Vec<u8>,
    pub attributes: Vec<(Vec<u8>, Vec<u8>)>,
    pub children: Vec<RawChild>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawChild {
    Node(RawNode),
    Text(Vec<u8>),
}

// ============================================================================
// CANONICAL TREE
// ============================================================================

/// A normalized markup node.
///
/// # Examples
///
/// ```rust
/// use verbnet::syntax::{CanonicalNode, Child, Symbol};
/// let node = CanonicalNode::new("EXAMPLE").with_text("Paula wished a good day.");
/// assert_eq!(node.tag, Symbol::EXAMPLE);
/// assert_eq!(node.first_text(), Some("Paula wished a good day."));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CanonicalNode {
    pub tag: Symbol,
    pub attributes: BTreeMap<Symbol, String>,
    pub children: Vec<Child>,
}

/// A child of a [`CanonicalNode`]: either a nested node or a text leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Child {
    Node(CanonicalNode),
    Text(String),
}

// ============================================================================
// PUBLIC API IMPLEMENTATION
// ============================================================================

impl CanonicalNode {
    /// Creates an empty node; the tag is lower-cased and interned.
    pub fn new(tag: &str) -> Self {
        Self {
            tag: Symbol::intern(tag),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, key: &str, value: impl Into<String>) -> Self {
        self.attributes.insert(Symbol::intern(key), value.into());
        self
    }

    pub fn with_child(mut self, child: CanonicalNode) -> Self {
        self.children.push(Child::Node(child));
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Child::Text(text.into()));
        self
    }

    /// Looks up an attribute by its lower-cased key.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// True when the node's tag equals `tag`.
    pub fn is(&self, tag: &Symbol) -> bool {
        &self.tag == tag
    }

    /// Nested nodes, skipping text leaves.
    pub fn child_nodes(&self) -> impl Iterator<Item = &CanonicalNode> {
        self.children.iter().filter_map(Child::as_node)
    }

    /// Text leaves, in document order.
    pub fn text_segments(&self) -> impl Iterator<Item = &str> {
        self.children.iter().filter_map(Child::as_text)
    }

    pub fn first_text(&self) -> Option<&str> {
        self.text_segments().next()
    }

    /// Attributes with string keys, as the domain model stores them.
    pub fn attribute_map(&self) -> BTreeMap<String, String> {
        self.attributes
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    /// Renders the node compactly, e.g. `(np value=Agent (synrestrs))`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use verbnet::syntax::CanonicalNode;
    /// let np = CanonicalNode::new("NP")
    ///     .with_attr("value", "Agent")
    ///     .with_child(CanonicalNode::new("SYNRESTRS"));
    /// assert_eq!(np.pretty(), "(np value=Agent (synrestrs))");
    /// ```
    pub fn pretty(&self) -> String {
        let mut out = format!("({}", self.tag);
        for (key, value) in &self.attributes {
            out.push_str(&format!(" {}={}", key, value));
        }
        for child in &self.children {
            out.push(' ');
            out.push_str(&child.pretty());
        }
        out.push(')');
        out
    }
}

impl Child {
    pub fn as_node(&self) -> Option<&CanonicalNode> {
        match self {
            Child::Node(node) => Some(node),
            Child::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Child::Text(text) => Some(text),
            Child::Node(_) => None,
        }
    }

    pub fn pretty(&self) -> String {
        match self {
            Child::Node(node) => node.pretty(),
            Child::Text(text) => format!("{:?}", text),
        }
    }
}

impl From<CanonicalNode> for Child {
    fn from(node: CanonicalNode) -> Self {
        Child::Node(node)
    }
}
