//! Tree normalization: [`RawNode`] to [`CanonicalNode`].
//!
//! Total and side-effect free. Tags and attribute keys are lower-cased and
//! interned; attribute values and text keep their case. Invalid UTF-8 is
//! decoded lossily rather than rejected, since well-formedness was already
//! checked by the reader.

use super::{CanonicalNode, Child, RawChild, RawNode, Symbol};

/// Normalizes a generic node and all of its descendants.
pub fn normalize(node: RawNode) -> CanonicalNode {
    CanonicalNode {
        tag: Symbol::intern_bytes(&node.tag),
        attributes: node
            .attributes
            .into_iter()
            .map(|(key, value)| (Symbol::intern_bytes(&key), decode(value)))
            .collect(),
        children: node.children.into_iter().map(normalize_child).collect(),
    }
}

fn normalize_child(child: RawChild) -> Child {
    match child {
        RawChild::Node(node) => Child::Node(normalize(node)),
        RawChild::Text(text) => Child::Text(decode(text)),
    }
}

fn decode(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}
