//! # Class Extraction
//!
//! Turns a normalized `<vnclass>` document into [`VerbClass`] records.
//!
//! The extraction process follows this flow:
//! 1. Read the class id from the root's `id` attribute
//! 2. Partition the root's children into sections keyed by tag
//! 3. Build the class from its `members`, `themroles` and `frames` sections
//! 4. Recurse into `subclasses` and flatten every descendant into the result
//!
//! Unknown sections are skipped. A missing `id`, member `name`, themrole
//! `type` or frame `primary` is an [`IntegrityError`].

use std::collections::BTreeMap;

use crate::errors::IntegrityError;
use crate::missing_attr;
use crate::model::{Frame, MemberInfo, SelRestriction, VerbClass};
use crate::syntax::{CanonicalNode, Child, Symbol};

mod frame;

/// Extracts a class document with default settings.
pub fn extract_classes(node: &CanonicalNode) -> Result<Vec<VerbClass>, IntegrityError> {
    ClassExtractor::default().extract_classes(node)
}

/// One recognized child section of a class or frame element.
#[derive(Debug, Clone, PartialEq)]
pub enum Section<'a> {
    Members(BTreeMap<String, MemberInfo>),
    Themroles(BTreeMap<String, Vec<SelRestriction>>),
    Frames(BTreeMap<String, Frame>),
    Subclasses(Vec<&'a CanonicalNode>),
    Description(BTreeMap<String, String>),
    Examples(Vec<Vec<String>>),
    Syntax(Vec<Child>),
    Semantics(Vec<Child>),
    /// A tag with no meaning to the extractor.
    Ignored,
}

/// The sections found among a node's children. A tag seen twice keeps the
/// later section.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Sections<'a> {
    pub members: Option<BTreeMap<String, MemberInfo>>,
    pub themroles: Option<BTreeMap<String, Vec<SelRestriction>>>,
    pub frames: Option<BTreeMap<String, Frame>>,
    pub subclasses: Option<Vec<&'a CanonicalNode>>,
    pub description: Option<BTreeMap<String, String>>,
    pub examples: Option<Vec<Vec<String>>>,
    pub syntax: Option<Vec<Child>>,
    pub semantics: Option<Vec<Child>>,
}

impl<'a> Sections<'a> {
    fn insert(&mut self, section: Section<'a>) {
        match section {
            Section::Members(members) => self.members = Some(members),
            Section::Themroles(roles) => self.themroles = Some(roles),
            Section::Frames(frames) => self.frames = Some(frames),
            Section::Subclasses(classes) => self.subclasses = Some(classes),
            Section::Description(description) => self.description = Some(description),
            Section::Examples(examples) => self.examples = Some(examples),
            Section::Syntax(syntax) => self.syntax = Some(syntax),
            Section::Semantics(semantics) => self.semantics = Some(semantics),
            Section::Ignored => {}
        }
    }
}

/// Walks class documents. With `strict_frames`, two frames sharing a
/// `primary` pattern within one class are an error instead of last-wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassExtractor {
    strict_frames: bool,
}

impl ClassExtractor {
    pub fn new(strict_frames: bool) -> Self {
        Self { strict_frames }
    }

    // =====================
    // Public API - Classes
    // =====================

    /// Extracts the class and all of its nested subclasses, parent first,
    /// descendants in document order.
    pub fn extract_classes(&self, node: &CanonicalNode) -> Result<Vec<VerbClass>, IntegrityError> {
        let mut classes = Vec::new();
        self.extract_into(node, &mut classes)?;
        Ok(classes)
    }

    fn extract_into(
        &self,
        node: &CanonicalNode,
        classes: &mut Vec<VerbClass>,
    ) -> Result<(), IntegrityError> {
        if !node.is(&Symbol::VNCLASS) {
            return Err(IntegrityError::UnexpectedRoot {
                found: node.tag.clone(),
            });
        }
        let class_id = node
            .attr("id")
            .ok_or_else(|| missing_attr!(Symbol::VNCLASS, "id"))?;

        let sections = self.extract_sections(&node.children, class_id)?;

        let class = VerbClass {
            id: class_id.to_string(),
            members: sections.members.unwrap_or_default(),
            themroles: sections.themroles.unwrap_or_default(),
            frames: sections.frames.unwrap_or_default(),
        };
        tracing::trace!(
            class_id,
            members = class.members.len(),
            frames = class.frames.len(),
            "extracted class"
        );
        classes.push(class);

        for subclass in sections.subclasses.unwrap_or_default() {
            self.extract_into(subclass, classes)?;
        }
        Ok(())
    }

    // =====================
    // Public API - Sections
    // =====================

    /// Partitions `children` into sections by tag. Text children are skipped.
    pub fn extract_sections<'a>(
        &self,
        children: &'a [Child],
        class_id: &str,
    ) -> Result<Sections<'a>, IntegrityError> {
        let mut sections = Sections::default();
        for child in children.iter().filter_map(Child::as_node) {
            sections.insert(self.extract_section(child, class_id)?);
        }
        Ok(sections)
    }

    /// Interprets a single section element.
    pub fn extract_section<'a>(
        &self,
        node: &'a CanonicalNode,
        class_id: &str,
    ) -> Result<Section<'a>, IntegrityError> {
        let section = match node.tag.as_str() {
            "members" => Section::Members(extract_members(node, class_id)?),
            "themroles" => Section::Themroles(extract_themroles(node, class_id)?),
            "frames" => Section::Frames(self.extract_frames(node, class_id)?),
            "subclasses" => Section::Subclasses(node.child_nodes().collect()),
            "description" => Section::Description(node.attribute_map()),
            "examples" => Section::Examples(frame::extract_examples(node)),
            "syntax" => Section::Syntax(node.children.clone()),
            "semantics" => Section::Semantics(node.children.clone()),
            _ => Section::Ignored,
        };
        Ok(section)
    }
}

// =====================
// Internal - Section Bodies
// =====================

fn extract_members(
    node: &CanonicalNode,
    class_id: &str,
) -> Result<BTreeMap<String, MemberInfo>, IntegrityError> {
    let mut members = BTreeMap::new();
    for member in node.child_nodes().filter(|n| n.is(&Symbol::MEMBER)) {
        let name = member
            .attr("name")
            .ok_or_else(|| missing_attr!(Symbol::MEMBER, "name", class_id))?;
        let mut attributes = member.attribute_map();
        attributes.remove("name");
        members.insert(name.to_string(), MemberInfo::new(attributes));
    }
    Ok(members)
}

fn extract_themroles(
    node: &CanonicalNode,
    class_id: &str,
) -> Result<BTreeMap<String, Vec<SelRestriction>>, IntegrityError> {
    let mut roles = BTreeMap::new();
    for role in node.child_nodes().filter(|n| n.is(&Symbol::THEMROLE)) {
        let role_type = role
            .attr("type")
            .ok_or_else(|| missing_attr!(Symbol::THEMROLE, "type", class_id))?;
        roles.insert(role_type.to_string(), role.children.clone());
    }
    Ok(roles)
}
