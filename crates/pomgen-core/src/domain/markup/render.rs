//! One indentation algorithm for every markup syntax.
//!
//! A node describes itself as a [`Layout`]; the renderer turns layouts into
//! lines, indenting block children by one unit per nesting level.

use super::xml::XmlNode;

pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// How a node occupies lines.
pub enum Layout<'a, N> {
    /// A single line.
    Line(String),
    /// Opening line, indented children, closing line.
    Block {
        open: String,
        children: &'a [N],
        close: String,
    },
    /// Children at the current level with no surrounding lines.
    Transparent(&'a [N]),
}

pub trait Markup: Sized {
    fn layout(&self) -> Layout<'_, Self>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupRenderer {
    indent: String,
}

impl MarkupRenderer {
    /// Indent with `width` spaces per level.
    pub fn new(width: usize) -> Self {
        Self::with_indent(" ".repeat(width))
    }

    pub fn with_indent(unit: impl Into<String>) -> Self {
        Self { indent: unit.into() }
    }

    pub fn render<N: Markup>(&self, node: &N) -> Vec<String> {
        let mut lines = Vec::new();
        self.render_into(node, 0, &mut lines);
        lines
    }

    /// XML declaration followed by the rendered document.
    pub fn xml_document(&self, root: &XmlNode) -> Vec<String> {
        let mut lines = vec![XML_DECLARATION.to_string()];
        self.render_into(root, 0, &mut lines);
        lines
    }

    fn render_into<N: Markup>(&self, node: &N, depth: usize, lines: &mut Vec<String>) {
        match node.layout() {
            Layout::Line(line) => lines.push(self.indented(depth, &line)),
            Layout::Block {
                open,
                children,
                close,
            } => {
                lines.push(self.indented(depth, &open));
                for child in children {
                    self.render_into(child, depth + 1, lines);
                }
                lines.push(self.indented(depth, &close));
            }
            Layout::Transparent(children) => {
                for child in children {
                    self.render_into(child, depth, lines);
                }
            }
        }
    }

    fn indented(&self, depth: usize, line: &str) -> String {
        if line.is_empty() {
            return String::new();
        }
        format!("{}{}", self.indent.repeat(depth), line)
    }
}

impl Default for MarkupRenderer {
    fn default() -> Self {
        Self::new(4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::markup::DslNode;

    #[test]
    fn childless_element_self_closes() {
        let node = XmlNode::element("modules", vec![]);
        assert_eq!(MarkupRenderer::default().render(&node), vec!["<modules/>"]);
    }

    #[test]
    fn single_text_child_stays_on_one_line() {
        let node = XmlNode::text_element("groupId", "com.example.widget");
        assert_eq!(
            MarkupRenderer::default().render(&node),
            vec!["<groupId>com.example.widget</groupId>"]
        );
    }

    #[test]
    fn nested_elements_indent_per_level() {
        let node = XmlNode::element(
            "parent",
            vec![
                XmlNode::text_element("groupId", "g"),
                XmlNode::element("x", vec![XmlNode::text_element("y", "1")]),
            ],
        );
        assert_eq!(
            MarkupRenderer::new(2).render(&node),
            vec![
                "<parent>",
                "  <groupId>g</groupId>",
                "  <x>",
                "    <y>1</y>",
                "  </x>",
                "</parent>",
            ]
        );
    }

    #[test]
    fn attributes_keep_declaration_order() {
        let node = XmlNode::element("project", vec![])
            .with_attribute("xmlns", "urn:a")
            .with_attribute("xmlns:xsi", "urn:b");
        assert_eq!(
            MarkupRenderer::default().render(&node),
            vec![r#"<project xmlns="urn:a" xmlns:xsi="urn:b"/>"#]
        );
    }

    #[test]
    fn xml_document_starts_with_declaration() {
        let lines = MarkupRenderer::default().xml_document(&XmlNode::element("project", vec![]));
        assert_eq!(lines[0], XML_DECLARATION);
        assert_eq!(lines[1], "<project/>");
    }

    #[test]
    fn dsl_root_is_transparent() {
        let script = DslNode::Root(vec![
            DslNode::block(
                "plugins",
                vec![
                    DslNode::KotlinPlugin {
                        name: "jvm".into(),
                        version: "2.1.0".into(),
                    },
                    DslNode::BacktickPlugin("maven-publish".into()),
                    DslNode::PluginId {
                        id: "com.gradle.plugin-publish".into(),
                        version: Some("1.3.0".into()),
                    },
                ],
            ),
            DslNode::EmptyLine,
            DslNode::statement("version = \"1.0\""),
        ]);
        assert_eq!(
            MarkupRenderer::default().render(&script),
            vec![
                "plugins {",
                "    kotlin(\"jvm\") version \"2.1.0\"",
                "    `maven-publish`",
                "    id(\"com.gradle.plugin-publish\") version \"1.3.0\"",
                "}",
                "",
                "version = \"1.0\"",
            ]
        );
    }

    #[test]
    fn empty_lines_inside_blocks_carry_no_indent() {
        let script = DslNode::block("a", vec![DslNode::EmptyLine, DslNode::set_quoted("url", "u")]);
        assert_eq!(
            MarkupRenderer::with_indent("\t").render(&script),
            vec!["a {", "", "\turl.set(\"u\")", "}"]
        );
    }
}
