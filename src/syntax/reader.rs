//! Markup reader: XML text to a generic [`RawNode`] tree.
//!
//! This is a thin layer over `quick-xml`. It keeps elements, attributes, text
//! and CDATA, and drops declarations, comments, processing instructions and
//! doctypes. Whitespace-only text between elements is trimmed away.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fmt;
use std::time::Instant;

use super::{RawChild, RawNode};

/// How many events are read between two deadline checks.
const DEADLINE_CHECK_INTERVAL: usize = 256;

/// Why a document could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadError {
    /// The text is not well-formed markup. `position` is a byte offset.
    Syntax { message: String, position: usize },
    /// The deadline passed before the document was fully read.
    DeadlineExceeded { position: usize },
}

impl ReadError {
    fn syntax(message: impl Into<String>, position: usize) -> Self {
        ReadError::Syntax {
            message: message.into(),
            position,
        }
    }
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadError::Syntax { message, position } => {
                write!(f, "{} (at byte {})", message, position)
            }
            ReadError::DeadlineExceeded { position } => {
                write!(f, "deadline exceeded at byte {}", position)
            }
        }
    }
}

impl std::error::Error for ReadError {}

/// Reads one document with a single root element.
///
/// `deadline`, when given, is checked periodically while reading.
pub fn read_document(source: &str, deadline: Option<Instant>) -> Result<RawNode, ReadError> {
    let mut reader = Reader::from_str(source);
    reader.config_mut().trim_text(true);

    let mut open: Vec<RawNode> = Vec::new();
    let mut root: Option<RawNode> = None;
    let mut events = 0usize;

    loop {
        let position = reader.buffer_position() as usize;

        events += 1;
        if events % DEADLINE_CHECK_INTERVAL == 0 && deadline.is_some_and(|d| Instant::now() >= d) {
            return Err(ReadError::DeadlineExceeded { position });
        }

        let event = reader
            .read_event()
            .map_err(|e| ReadError::syntax(e.to_string(), position))?;

        match event {
            Event::Start(start) => open.push(open_element(&start, position)?),
            Event::Empty(start) => {
                let node = open_element(&start, position)?;
                close_element(node, &mut open, &mut root, position)?;
            }
            Event::End(end) => {
                let node = open.pop().ok_or_else(|| {
                    ReadError::syntax(
                        format!(
                            "closing tag </{}> without an open element",
                            String::from_utf8_lossy(end.name().as_ref())
                        ),
                        position,
                    )
                })?;
                close_element(node, &mut open, &mut root, position)?;
            }
            Event::Text(text) => {
                let text = text
                    .unescape()
                    .map_err(|e| ReadError::syntax(e.to_string(), position))?;
                push_text(&mut open, text.as_bytes());
            }
            Event::CData(data) => {
                let data = data.into_inner();
                push_text(&mut open, &data);
            }
            Event::Eof => break,
            // declarations, comments, processing instructions, doctype
            _ => {}
        }
    }

    let position = source.len();
    if let Some(unclosed) = open.last() {
        return Err(ReadError::syntax(
            format!(
                "element <{}> is never closed",
                String::from_utf8_lossy(&unclosed.tag)
            ),
            position,
        ));
    }
    root.ok_or_else(|| ReadError::syntax("document has no root element", position))
}

fn open_element(start: &BytesStart<'_>, position: usize) -> Result<RawNode, ReadError> {
    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| ReadError::syntax(e.to_string(), position))?;
        let value = attr
            .unescape_value()
            .map_err(|e| ReadError::syntax(e.to_string(), position))?;
        attributes.push((attr.key.as_ref().to_vec(), value.as_bytes().to_vec()));
    }
    Ok(RawNode {
        tag: start.name().as_ref().to_vec(),
        attributes,
        children: Vec::new(),
    })
}

fn close_element(
    node: RawNode,
    open: &mut [RawNode],
    root: &mut Option<RawNode>,
    position: usize,
) -> Result<(), ReadError> {
    match open.last_mut() {
        Some(parent) => {
            parent.children.push(RawChild::Node(node));
            Ok(())
        }
        None if root.is_some() => Err(ReadError::syntax(
            format!(
                "second root element <{}>",
                String::from_utf8_lossy(&node.tag)
            ),
            position,
        )),
        None => {
            *root = Some(node);
            Ok(())
        }
    }
}

/// Text outside the root element carries no meaning and is dropped.
fn push_text(open: &mut [RawNode], text: &[u8]) {
    if text.is_empty() {
        return;
    }
    if let Some(parent) = open.last_mut() {
        parent.children.push(RawChild::Text(text.to_vec()));
    }
}
