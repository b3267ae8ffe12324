use std::borrow::Cow;

use super::render::{Layout, Markup};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element {
        name: String,
        attributes: Vec<(String, String)>,
        children: Vec<XmlNode>,
    },
    Text(String),
}

impl XmlNode {
    /// Element with children and no attributes.
    pub fn element(name: impl Into<String>, children: Vec<XmlNode>) -> Self {
        Self::Element {
            name: name.into(),
            attributes: Vec::new(),
            children,
        }
    }

    /// `<name>text</name>`
    pub fn text_element(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Element {
            name: name.into(),
            attributes: Vec::new(),
            children: vec![Self::Text(text.into())],
        }
    }

    pub fn with_attribute(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        match self {
            Self::Element {
                name,
                mut attributes,
                children,
            } => {
                attributes.push((key.into(), value.into()));
                Self::Element {
                    name,
                    attributes,
                    children,
                }
            }
            text @ Self::Text(_) => text,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Element { name, .. } => Some(name.as_str()),
            Self::Text(_) => None,
        }
    }

    pub fn children(&self) -> &[XmlNode] {
        match self {
            Self::Element { children, .. } => children.as_slice(),
            Self::Text(_) => &[],
        }
    }

    /// First child element called `name`.
    pub fn child(&self, name: &str) -> Option<&XmlNode> {
        self.children().iter().find(|c| c.name() == Some(name))
    }

    /// Text of a `<name>text</name>` element.
    pub fn text(&self) -> Option<&str> {
        match self.children() {
            [Self::Text(text)] => Some(text.as_str()),
            _ => None,
        }
    }

    /// Follow a chain of child element names.
    pub fn find(&self, path: &[&str]) -> Option<&XmlNode> {
        path.iter().try_fold(self, |node, name| node.child(name))
    }
}

impl Markup for XmlNode {
    fn layout(&self) -> Layout<'_, Self> {
        match self {
            Self::Text(text) => Layout::Line(escape(text, false).into_owned()),
            Self::Element {
                name,
                attributes,
                children,
            } => {
                let attrs: String = attributes
                    .iter()
                    .map(|(k, v)| format!(" {}=\"{}\"", k, escape(v, true)))
                    .collect();
                match children.as_slice() {
                    [] => Layout::Line(format!("<{}{}/>", name, attrs)),
                    [Self::Text(text)] => Layout::Line(format!(
                        "<{}{}>{}</{}>",
                        name,
                        attrs,
                        escape(text, false),
                        name
                    )),
                    _ => Layout::Block {
                        open: format!("<{}{}>", name, attrs),
                        children: children.as_slice(),
                        close: format!("</{}>", name),
                    },
                }
            }
        }
    }
}

fn escape(text: &str, attribute: bool) -> Cow<'_, str> {
    if attribute {
        quick_xml::escape::escape(text)
    } else {
        quick_xml::escape::partial_escape(text)
    }
}
