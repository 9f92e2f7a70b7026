//! Minimal element tree over XML documents
//!
//! Both the deployment descriptor and tag library descriptors are consumed as
//! a plain tree of named elements with text bodies. Namespaces are dropped:
//! only local names are kept, so `<taglib>` matches regardless of the
//! declared schema namespace.
//!
//! Documents are read as raw bytes and decoded according to their XML
//! declaration (or byte order mark), so legacy `ISO-8859-1` descriptors are
//! accepted. A `<!DOCTYPE>` declaration is skipped, never fetched or
//! validated; entities it declares are kept as written.

use std::io::Read;

use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesRef, Event};
use quick_xml::Reader;

/// An element with its local name, trimmed text body and child elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub name: String,
    pub body: Option<String>,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// First child element named `name`.
    pub fn find_child(&self, name: &str) -> Option<&TreeNode> {
        self.children.iter().find(|child| child.name == name)
    }

    /// All child elements named `name`, in document order.
    pub fn find_children<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a TreeNode> + 'a {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// Body of the first child element named `name`.
    pub fn child_body(&self, name: &str) -> Option<&str> {
        self.find_child(name).and_then(|child| child.body.as_deref())
    }
}

/// Element being built while its end tag is pending.
struct OpenElement {
    name: String,
    text: String,
    children: Vec<TreeNode>,
}

impl OpenElement {
    fn new(name: String) -> Self {
        Self {
            name,
            text: String::new(),
            children: Vec::new(),
        }
    }

    fn finish(self) -> TreeNode {
        let trimmed = self.text.trim();
        TreeNode {
            name: self.name,
            body: (!trimmed.is_empty()).then(|| trimmed.to_string()),
            children: self.children,
        }
    }
}

/// Parse a document and return its root element.
///
/// Errors are reported as plain messages; callers attach the resource name.
pub fn parse_document(text: &str) -> std::result::Result<TreeNode, String> {
    parse_bytes(text.as_bytes())
}

/// Read a whole stream and parse it with [`parse_bytes`].
pub fn parse_reader(reader: &mut dyn Read) -> std::result::Result<TreeNode, String> {
    let mut content = Vec::new();
    reader
        .read_to_end(&mut content)
        .map_err(|e| e.to_string())?;
    parse_bytes(&content)
}

/// Parse raw document bytes in their declared encoding.
pub fn parse_bytes(content: &[u8]) -> std::result::Result<TreeNode, String> {
    let mut reader = Reader::from_reader(content);
    let mut open: Vec<OpenElement> = Vec::new();
    let mut root: Option<TreeNode> = None;

    loop {
        let event = reader.read_event().map_err(|e| {
            format!("XML parse error at position {}: {}", reader.error_position(), e)
        })?;
        match event {
            Event::Start(start) => {
                let name = decode(&reader, start.local_name().as_ref())?;
                open.push(OpenElement::new(name));
            }
            Event::Empty(start) => {
                let name = decode(&reader, start.local_name().as_ref())?;
                close(OpenElement::new(name).finish(), &mut open, &mut root)?;
            }
            Event::End(end) => {
                let name = decode(&reader, end.local_name().as_ref())?;
                let Some(element) = open.pop() else {
                    return Err(format!("unexpected end tag </{}>", name));
                };
                if element.name != name {
                    return Err(format!(
                        "end tag </{}> does not match <{}>",
                        name, element.name
                    ));
                }
                close(element.finish(), &mut open, &mut root)?;
            }
            Event::Text(text) => {
                if let Some(element) = open.last_mut() {
                    element.text.push_str(&decode(&reader, &text)?);
                }
            }
            Event::CData(data) => {
                if let Some(element) = open.last_mut() {
                    element.text.push_str(&decode(&reader, &data)?);
                }
            }
            Event::GeneralRef(reference) => {
                if let Some(element) = open.last_mut() {
                    element.text.push_str(&resolve_reference(&reader, &reference)?);
                }
            }
            Event::Eof => break,
            // Declaration, DOCTYPE, comments and processing instructions.
            _ => {}
        }
    }

    if let Some(element) = open.last() {
        return Err(format!(
            "unexpected end of document: <{}> is not closed",
            element.name
        ));
    }
    root.ok_or_else(|| "document has no root element".to_string())
}

/// Attach a finished element to its parent, or make it the root.
fn close(
    node: TreeNode,
    open: &mut [OpenElement],
    root: &mut Option<TreeNode>,
) -> std::result::Result<(), String> {
    match open.last_mut() {
        Some(parent) => {
            parent.children.push(node);
            Ok(())
        }
        None if root.is_none() => {
            *root = Some(node);
            Ok(())
        }
        None => Err(format!("second root element <{}>", node.name)),
    }
}

fn decode(reader: &Reader<&[u8]>, bytes: &[u8]) -> std::result::Result<String, String> {
    reader
        .decoder()
        .decode(bytes)
        .map(|text| text.into_owned())
        .map_err(|e| e.to_string())
}

/// `&#233;` and the five predefined entities resolve; anything else was
/// declared by a DTD that is never read, so it stays as written.
fn resolve_reference(
    reader: &Reader<&[u8]>,
    reference: &BytesRef<'_>,
) -> std::result::Result<String, String> {
    if let Some(ch) = reference.resolve_char_ref().map_err(|e| e.to_string())? {
        return Ok(ch.to_string());
    }
    let name = decode(reader, reference)?;
    Ok(resolve_predefined_entity(&name)
        .map(str::to_string)
        .unwrap_or_else(|| format!("&{};", name)))
}
