//! Minimal element tree over quick-xml events.
//!
//! BGG responses are small and deeply attribute-driven (`<minplayers
//! value="2"/>`), so it is simpler to build a tree once and query it than to
//! thread parser state through every response type.

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::BggError;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Element>,
    /// Concatenated text and CDATA content, trimmed.
    pub text: String,
}

impl Element {
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn children<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// The `value` attribute of the first child called `name`.
    pub fn value_of(&self, name: &str) -> Option<&str> {
        self.child(name).and_then(|c| c.attr("value"))
    }

    /// The text content of the first child called `name`, if non-empty.
    pub fn text_of(&self, name: &str) -> Option<&str> {
        self.child(name)
            .map(|c| c.text.as_str())
            .filter(|t| !t.is_empty())
    }
}

/// Parse a complete document and return its root element.
pub fn parse_document(xml: &str) -> Result<Element, BggError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    // stack[0] is a synthetic document node collecting the root
    let mut stack = vec![Element::default()];

    loop {
        match reader.read_event()? {
            Event::Start(ref e) => stack.push(element_from(e)?),
            Event::Empty(ref e) => {
                let element = element_from(e)?;
                push_child(&mut stack, element)?;
            }
            Event::Text(ref e) => {
                let text = e.unescape()?;
                append_text(&mut stack, &text);
            }
            Event::CData(e) => {
                let bytes = e.into_inner();
                append_text(&mut stack, &String::from_utf8_lossy(&bytes));
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| BggError::parse("unbalanced closing tag"))?;
                push_child(&mut stack, element)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if stack.len() != 1 {
        return Err(BggError::parse("document ended inside an element"));
    }
    stack
        .pop()
        .and_then(|doc| doc.children.into_iter().next())
        .ok_or_else(|| BggError::parse("empty document"))
}

fn element_from(e: &BytesStart<'_>) -> Result<Element, BggError> {
    let mut element = Element {
        name: String::from_utf8_lossy(e.name().as_ref()).to_string(),
        ..Default::default()
    };
    for attr in e.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let value = attr.unescape_value()?.to_string();
        element.attributes.push((key, value));
    }
    Ok(element)
}

fn push_child(stack: &mut [Element], element: Element) -> Result<(), BggError> {
    let parent = stack
        .last_mut()
        .ok_or_else(|| BggError::parse("closing tag without matching opening tag"))?;
    parent.children.push(element);
    Ok(())
}

fn append_text(stack: &mut [Element], text: &str) {
    if let Some(top) = stack.last_mut() {
        if !top.text.is_empty() {
            top.text.push(' ');
        }
        top.text.push_str(text.trim());
    }
}
