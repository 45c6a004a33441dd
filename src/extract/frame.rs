//! Frame decomposition: description, examples, syntax and semantics.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use super::ClassExtractor;
use crate::errors::IntegrityError;
use crate::missing_attr;
use crate::model::Frame;
use crate::syntax::{CanonicalNode, Child, Symbol};

impl ClassExtractor {
    /// Builds a frame from the children of a `<frame>` element.
    pub fn extract_frame(&self, children: &[Child], class_id: &str) -> Result<Frame, IntegrityError> {
        let sections = self.extract_sections(children, class_id)?;
        let description = sections.description.unwrap_or_default();
        let primary_pattern = description
            .get("primary")
            .cloned()
            .ok_or_else(|| missing_attr!(Symbol::DESCRIPTION, "primary", class_id))?;

        Ok(Frame {
            primary_pattern,
            description,
            examples: sections.examples.unwrap_or_default(),
            syntax: sections.syntax.unwrap_or_default(),
            semantics: sections.semantics.unwrap_or_default(),
        })
    }

    /// Keys every `<frame>` under `node` by its primary pattern.
    pub(super) fn extract_frames(
        &self,
        node: &CanonicalNode,
        class_id: &str,
    ) -> Result<BTreeMap<String, Frame>, IntegrityError> {
        let mut frames = BTreeMap::new();
        for frame_node in node.child_nodes().filter(|n| n.is(&Symbol::FRAME)) {
            let frame = self.extract_frame(&frame_node.children, class_id)?;
            match frames.entry(frame.primary_pattern.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(frame);
                }
                Entry::Occupied(_) if self.strict_frames => {
                    return Err(IntegrityError::DuplicateFrame {
                        class_id: class_id.to_string(),
                        pattern: frame.primary_pattern,
                    });
                }
                Entry::Occupied(mut slot) => {
                    tracing::warn!(
                        class_id,
                        pattern = %frame.primary_pattern,
                        "duplicate frame pattern, keeping the later frame"
                    );
                    slot.insert(frame);
                }
            }
        }
        Ok(frames)
    }
}

/// The first text segment of each `<example>`; later segments are dropped.
pub(super) fn extract_examples(node: &CanonicalNode) -> Vec<Vec<String>> {
    node.child_nodes()
        .filter(|n| n.is(&Symbol::EXAMPLE))
        .map(|example| example.first_text().map(str::to_string).into_iter().collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_node(primary: &str, number: &str) -> CanonicalNode {
        CanonicalNode::new("FRAME").with_child(
            CanonicalNode::new("DESCRIPTION")
                .with_attr("primary", primary)
                .with_attr("descriptionNumber", number),
        )
    }

    fn frames_node() -> CanonicalNode {
        CanonicalNode::new("FRAMES")
            .with_child(frame_node("NP V", "0.1"))
            .with_child(frame_node("NP V", "0.2"))
    }

    #[test]
    fn duplicate_patterns_keep_the_later_frame() {
        let frames = ClassExtractor::default()
            .extract_frames(&frames_node(), "dup-1")
            .unwrap();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames["NP V"].description_number(), Some("0.2"));
    }

    #[test]
    fn strict_mode_rejects_duplicate_patterns() {
        let err = ClassExtractor::new(true)
            .extract_frames(&frames_node(), "dup-1")
            .unwrap_err();
        assert_eq!(
            err,
            IntegrityError::DuplicateFrame {
                class_id: "dup-1".into(),
                pattern: "NP V".into()
            }
        );
    }

    #[test]
    fn frame_without_primary_is_an_integrity_error() {
        let children = vec![Child::Node(
            CanonicalNode::new("DESCRIPTION").with_attr("descriptionNumber", "1.0"),
        )];
        let err = ClassExtractor::default()
            .extract_frame(&children, "x-1")
            .unwrap_err();
        assert_eq!(err, missing_attr!(Symbol::DESCRIPTION, "primary", "x-1"));
    }

    #[test]
    fn examples_keep_only_the_first_segment() {
        let node = CanonicalNode::new("EXAMPLES")
            .with_child(
                CanonicalNode::new("EXAMPLE")
                    .with_text("First line.")
                    .with_child(CanonicalNode::new("BR"))
                    .with_text("Second line."),
            )
            .with_child(CanonicalNode::new("EXAMPLE"));
        assert_eq!(
            extract_examples(&node),
            vec![vec!["First line.".to_string()], vec![]]
        );
    }
}
