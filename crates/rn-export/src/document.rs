//! In-memory document tree and its pretty-printing serializer.
//!
//! The tree holds structure only.  Indentation is decided while writing, from
//! the depth of each node, so a built [`Document`] is never mutated to make it
//! readable:
//!
//! ```text
//! <road-network name="n">          depth 0
//!  <!--notice-->                   each child on its own line, indented
//!  <section section-id="1">        (depth + 1) * indent_width spaces
//!   <lane-edges />                 childless elements self-close
//!  </section>                      closing tag back at the parent's depth
//! </road-network>
//! ```

use std::collections::BTreeMap;
use std::io::{self, Write};

use crate::ExportConfig;

const XML_DECLARATION: &[u8] = br#"<?xml version="1.0" encoding="UTF-8"?>"#;

// ── Tree ──────────────────────────────────────────────────────────────────────

/// A child of an [`Element`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    /// Written verbatim as `<!--text-->`.
    Comment(String),
}

/// An element with attributes and ordered children.
///
/// Attributes are kept in a `BTreeMap`, so they are written in ascending key
/// order no matter the order they were set in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name:       &'static str,
    pub attributes: BTreeMap<&'static str, String>,
    pub children:   Vec<Node>,
}

impl Element {
    pub fn new(name: &'static str) -> Self {
        Self { name, attributes: BTreeMap::new(), children: Vec::new() }
    }

    /// Builder-style [`set_attr`](Self::set_attr).
    pub fn with_attr(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.set_attr(key, value);
        self
    }

    /// Set an attribute, replacing any previous value for `key`.
    pub fn set_attr(&mut self, key: &'static str, value: impl Into<String>) {
        self.attributes.insert(key, value.into());
    }

    /// Builder-style [`push`](Self::push).
    pub fn with_child(mut self, child: Element) -> Self {
        self.push(child);
        self
    }

    pub fn push(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    pub fn push_comment(&mut self, text: impl Into<String>) {
        self.children.push(Node::Comment(text.into()));
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

// ── Document ──────────────────────────────────────────────────────────────────

/// A complete document: one root element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub root: Element,
}

impl Document {
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    /// Serialize the document, pretty-printed per `config`, followed by a
    /// single trailing newline.
    pub fn write_to<W: Write + ?Sized>(&self, w: &mut W, config: &ExportConfig) -> io::Result<()> {
        if config.xml_declaration {
            w.write_all(XML_DECLARATION)?;
            w.write_all(b"\n")?;
        }
        write_element(w, &self.root, 0, config.indent_width)?;
        w.write_all(b"\n")
    }

    /// Serialize into a `String`.
    pub fn to_xml_string(&self, config: &ExportConfig) -> io::Result<String> {
        let mut buf = Vec::new();
        self.write_to(&mut buf, config)?;
        String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

// ── Serializer ────────────────────────────────────────────────────────────────

fn write_node<W: Write + ?Sized>(w: &mut W, node: &Node, depth: usize, indent: usize) -> io::Result<()> {
    match node {
        Node::Element(e) => write_element(w, e, depth, indent),
        Node::Comment(text) => write!(w, "<!--{text}-->"),
    }
}

fn write_element<W: Write + ?Sized>(w: &mut W, e: &Element, depth: usize, indent: usize) -> io::Result<()> {
    write!(w, "<{}", e.name)?;
    for (key, value) in &e.attributes {
        write!(w, " {key}=\"")?;
        write_escaped_attr(w, value)?;
        w.write_all(b"\"")?;
    }

    if e.is_leaf() {
        return w.write_all(b" />");
    }

    w.write_all(b">")?;
    for child in &e.children {
        newline_indent(w, (depth + 1) * indent)?;
        write_node(w, child, depth + 1, indent)?;
    }
    newline_indent(w, depth * indent)?;
    write!(w, "</{}>", e.name)
}

fn newline_indent<W: Write + ?Sized>(w: &mut W, spaces: usize) -> io::Result<()> {
    w.write_all(b"\n")?;
    for _ in 0..spaces {
        w.write_all(b" ")?;
    }
    Ok(())
}

fn write_escaped_attr<W: Write + ?Sized>(w: &mut W, value: &str) -> io::Result<()> {
    let mut start = 0;
    for (i, c) in value.char_indices() {
        let escaped = match c {
            '&'  => "&amp;",
            '<'  => "&lt;",
            '>'  => "&gt;",
            '"'  => "&quot;",
            '\n' => "&#10;",
            _ => continue,
        };
        w.write_all(value[start..i].as_bytes())?;
        w.write_all(escaped.as_bytes())?;
        start = i + c.len_utf8();
    }
    w.write_all(value[start..].as_bytes())
}
