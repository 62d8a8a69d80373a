//! In-memory job documents.
//!
//! A job file is parsed once into an [`Element`] tree and handed to every
//! checker unchanged. Queries use slash-separated element paths relative to
//! the root, e.g. `builders/hudson.tasks.Shell/command`.

use std::{fs, path::Path};

use quick_xml::{Reader, events::Event};

use crate::error::DocumentError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    /// Concatenated text and CDATA content, trimmed.
    pub text: String,
    pub children: Vec<Element>,
}

impl Element {
    fn new(name: String, attributes: Vec<(String, String)>) -> Self {
        Self {
            name,
            attributes,
            text: String::new(),
            children: Vec::new(),
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// First direct child with the given name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All descendants matching a slash-separated path, in document order.
    pub fn find_all(&self, path: &str) -> Vec<&Element> {
        let mut current = vec![self];
        for step in path.split('/').filter(|s| !s.is_empty()) {
            current = current
                .into_iter()
                .flat_map(|e| e.children.iter().filter(move |c| c.name == step))
                .collect();
        }
        current
    }

    pub fn find(&self, path: &str) -> Option<&Element> {
        self.find_all(path).into_iter().next()
    }
}

/// A parsed job configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDocument {
    root: Element,
}

impl JobDocument {
    pub fn from_file(path: &Path) -> Result<Self, DocumentError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, DocumentError> {
        let mut reader = Reader::from_str(content);
        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            match reader.read_event()? {
                Event::Start(start) => {
                    if root.is_some() {
                        return Err(DocumentError::TrailingContent);
                    }
                    stack.push(start_element(&start)?);
                }
                Event::Empty(start) => {
                    if root.is_some() {
                        return Err(DocumentError::TrailingContent);
                    }
                    let element = start_element(&start)?;
                    close(element, &mut stack, &mut root);
                }
                Event::End(end) => {
                    let name = String::from_utf8_lossy(end.name().as_ref()).into_owned();
                    match stack.pop() {
                        Some(mut element) if element.name == name => {
                            element.text = element.text.trim().to_string();
                            close(element, &mut stack, &mut root);
                        }
                        _ => return Err(DocumentError::UnexpectedEnd(name)),
                    }
                }
                Event::Text(text) => {
                    let text = text.unescape()?;
                    match stack.last_mut() {
                        Some(element) => element.text.push_str(&text),
                        None if text.trim().is_empty() => {}
                        None => return Err(DocumentError::TrailingContent),
                    }
                }
                Event::CData(data) => {
                    if let Some(element) = stack.last_mut() {
                        element.text.push_str(&String::from_utf8_lossy(&data.into_inner()));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(open) = stack.pop() {
            return Err(DocumentError::Unclosed(open.name));
        }
        root.map(|root| Self { root }).ok_or(DocumentError::Empty)
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Name of the root element, e.g. `project` or `flow-definition`.
    pub fn kind(&self) -> &str {
        &self.root.name
    }

    pub fn find_all(&self, path: &str) -> Vec<&Element> {
        self.root.find_all(path)
    }

    pub fn find(&self, path: &str) -> Option<&Element> {
        self.root.find(path)
    }

    /// Command text of every shell build step, in document order.
    pub fn shell_commands(&self) -> Vec<&str> {
        self.find_all("builders/hudson.tasks.Shell")
            .into_iter()
            .map(|shell| shell.child("command").map(|c| c.text.as_str()).unwrap_or(""))
            .collect()
    }
}

fn start_element(start: &quick_xml::events::BytesStart<'_>) -> Result<Element, DocumentError> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        attributes.push((key, value));
    }
    Ok(Element::new(name, attributes))
}

fn close(element: Element, stack: &mut [Element], root: &mut Option<Element>) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => *root = Some(element),
    }
}
