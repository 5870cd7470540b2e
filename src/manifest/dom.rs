// pwml-rs: Project Wings Mod Loader - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Minimal owned XML tree on top of `quick-xml` events.
//!
//! Elements keep their start tag untouched (name, prefix, attributes and
//! `xmlns` declarations as written), everything else is kept as a raw
//! event. Prolog comments, processing instructions and the doctype are not
//! part of the tree.
//!
//! Parsing is strict: besides tag structure, every attribute list, attribute
//! value and text node is checked, so unquoted or duplicate attributes, a raw
//! `<` in a value and unknown entities are syntax errors.

use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesStart, Event};
use thiserror::Error;

/// Structural or syntax problems in an XML document.
#[derive(Debug, Error)]
pub enum DomError {
    #[error("syntax error at byte {position}: {message}")]
    Syntax { position: u64, message: String },

    #[error("document has no root element")]
    NoRoot,

    #[error("document has more than one root element")]
    MultipleRoots,

    #[error("element <{0}> is never closed")]
    Unclosed(String),

    #[error("unexpected closing tag </{0}>")]
    UnexpectedEnd(String),

    #[error("text outside the root element")]
    StrayText,

    #[error("failed to render xml: {0}")]
    Write(String),
}

/// A child of an element.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    /// Text, CDATA, comment or processing instruction, kept verbatim.
    Leaf(Event<'static>),
}

/// An element with its original start tag and its children.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    start: BytesStart<'static>,
    children: Vec<Node>,
}

impl Element {
    #[must_use]
    pub const fn new(start: BytesStart<'static>) -> Self {
        Self {
            start,
            children: Vec::new(),
        }
    }

    /// Copy of this element's tag and attributes with the given children.
    #[must_use]
    pub fn with_children(&self, children: Vec<Node>) -> Self {
        Self {
            start: self.start.clone(),
            children,
        }
    }

    /// Qualified tag name, including any prefix.
    #[must_use]
    pub fn name(&self) -> String {
        String::from_utf8_lossy(self.start.name().as_ref()).into_owned()
    }

    /// Attributes as `(qualified name, raw value)` pairs, in document order.
    ///
    /// Tags read by [`Document::parse`] are already validated.
    #[must_use]
    pub fn attributes(&self) -> Vec<(String, String)> {
        self.start
            .attributes()
            .flatten()
            .map(|attr| {
                (
                    String::from_utf8_lossy(attr.key.as_ref()).into_owned(),
                    String::from_utf8_lossy(&attr.value).into_owned(),
                )
            })
            .collect()
    }

    /// The `xmlns` and `xmlns:*` attributes of this tag.
    #[must_use]
    pub fn namespace_declarations(&self) -> Vec<(String, String)> {
        self.attributes()
            .into_iter()
            .filter(|(name, _)| name == "xmlns" || name.starts_with("xmlns:"))
            .collect()
    }

    /// Copy of this element with `declarations` added to its start tag.
    ///
    /// A name the tag already declares keeps its own value.
    #[must_use]
    pub fn with_declarations(&self, declarations: &[(String, String)]) -> Self {
        let own = self.namespace_declarations();
        let mut start = self.start.clone();
        for (name, value) in declarations {
            if own.iter().all(|(declared, _)| declared != name) {
                start.push_attribute((name.as_bytes(), value.as_bytes()));
            }
        }
        Self {
            start,
            children: self.children.clone(),
        }
    }

    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Child elements, skipping text and comments.
    pub fn child_elements(&self) -> impl Iterator<Item = &Self> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Leaf(_) => None,
        })
    }
}

/// A parsed XML document: one root element.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Element,
}

impl Document {
    #[must_use]
    pub const fn new(root: Element) -> Self {
        Self { root }
    }

    #[must_use]
    pub const fn root(&self) -> &Element {
        &self.root
    }

    /// Parses a complete document.
    ///
    /// Whitespace-only text is dropped; output indentation is regenerated
    /// on write. Any other text is kept exactly, surrounding spaces included.
    ///
    /// # Errors
    ///
    /// Returns a [`DomError`] if the text is not a well-formed document with
    /// exactly one root element.
    pub fn parse(text: &str) -> Result<Self, DomError> {
        let mut reader = Reader::from_str(text);

        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            let event = match reader.read_event() {
                Ok(event) => event,
                Err(e) => {
                    return Err(DomError::Syntax {
                        position: reader.error_position(),
                        message: e.to_string(),
                    });
                }
            };

            let position = reader.buffer_position();
            match event {
                Event::Eof => break,
                Event::Start(start) => {
                    if stack.is_empty() && root.is_some() {
                        return Err(DomError::MultipleRoots);
                    }
                    check_attributes(&start, position)?;
                    stack.push(Element::new(start.into_owned()));
                }
                Event::Empty(start) => {
                    check_attributes(&start, position)?;
                    attach(&mut stack, &mut root, Element::new(start.into_owned()))?;
                }
                Event::Text(ref text) if text.iter().all(u8::is_ascii_whitespace) => {}
                Event::End(end) => {
                    let Some(element) = stack.pop() else {
                        return Err(DomError::UnexpectedEnd(
                            String::from_utf8_lossy(end.name().as_ref()).into_owned(),
                        ));
                    };
                    attach(&mut stack, &mut root, element)?;
                }
                Event::Decl(_) | Event::DocType(_) => {}
                other => {
                    if let Event::Text(text) = &other {
                        text.unescape().map_err(|e| syntax(position, e))?;
                    }
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(Node::Leaf(other.into_owned())),
                        None if matches!(other, Event::Text(_) | Event::CData(_)) => {
                            return Err(DomError::StrayText);
                        }
                        None => {}
                    }
                }
            }
        }

        if let Some(open) = stack.last() {
            return Err(DomError::Unclosed(open.name()));
        }

        root.map(Self::new).ok_or(DomError::NoRoot)
    }

    /// Renders the document as UTF-8 with a declaration and two-space
    /// indentation, ending in a newline.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::Write`] if rendering fails.
    pub fn to_xml(&self) -> Result<String, DomError> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(|e| DomError::Write(e.to_string()))?;
        write_element(&mut writer, &self.root)?;

        let mut bytes = writer.into_inner();
        bytes.push(b'\n');
        String::from_utf8(bytes).map_err(|e| DomError::Write(e.to_string()))
    }
}

fn syntax(position: u64, err: impl std::fmt::Display) -> DomError {
    DomError::Syntax {
        position,
        message: err.to_string(),
    }
}

/// Rejects malformed attribute lists, `<` in values and unknown entities.
fn check_attributes(start: &BytesStart<'_>, position: u64) -> Result<(), DomError> {
    for attr in start.attributes() {
        let attr = attr.map_err(|e| syntax(position, e))?;
        if attr.value.contains(&b'<') {
            return Err(syntax(
                position,
                format!(
                    "'<' in value of attribute '{}'",
                    String::from_utf8_lossy(attr.key.as_ref())
                ),
            ));
        }
        attr.unescape_value().map_err(|e| syntax(position, e))?;
    }
    Ok(())
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), DomError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(Node::Element(element));
    } else if root.is_some() {
        return Err(DomError::MultipleRoots);
    } else {
        *root = Some(element);
    }
    Ok(())
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &Element) -> Result<(), DomError> {
    let write = |writer: &mut Writer<Vec<u8>>, event: Event<'_>| {
        writer
            .write_event(event)
            .map_err(|e| DomError::Write(e.to_string()))
    };

    if element.children.is_empty() {
        return write(writer, Event::Empty(element.start.clone()));
    }

    write(writer, Event::Start(element.start.clone()))?;
    for child in &element.children {
        match child {
            Node::Element(inner) => write_element(writer, inner)?,
            Node::Leaf(event) => write(writer, event.clone())?,
        }
    }
    write(writer, Event::End(element.start.to_end()))
}
