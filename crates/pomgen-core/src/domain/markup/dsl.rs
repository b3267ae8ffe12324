use super::render::{Layout, Markup};

/// A node of a Kotlin-style Gradle build script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DslNode {
    /// Document root: children render at the current level, no braces.
    Root(Vec<DslNode>),
    /// `name { ... }`
    Block { name: String, children: Vec<DslNode> },
    /// A verbatim line.
    Statement(String),
    /// `name = value`
    Property { name: String, value: String },
    /// `id("x")` or `id("x") version "y"`
    PluginId { id: String, version: Option<String> },
    /// `kotlin("jvm") version "y"`
    KotlinPlugin { name: String, version: String },
    /// `` `java-gradle-plugin` ``
    BacktickPlugin(String),
    /// `implementation("g:a:v")`
    Dependency {
        configuration: String,
        notation: String,
    },
    /// `receiver.method(a, b)`
    MethodCall {
        receiver: String,
        method: String,
        args: Vec<String>,
    },
    EmptyLine,
}

impl DslNode {
    pub fn block(name: impl Into<String>, children: Vec<DslNode>) -> Self {
        Self::Block {
            name: name.into(),
            children,
        }
    }

    pub fn statement(text: impl Into<String>) -> Self {
        Self::Statement(text.into())
    }

    /// `receiver.set("value")`, the common Gradle property setter.
    pub fn set_quoted(receiver: impl Into<String>, value: &str) -> Self {
        Self::MethodCall {
            receiver: receiver.into(),
            method: "set".into(),
            args: vec![quote(value)],
        }
    }
}

/// Wrap in double quotes.
pub fn quote(value: &str) -> String {
    format!("\"{}\"", value)
}

impl Markup for DslNode {
    fn layout(&self) -> Layout<'_, Self> {
        match self {
            Self::Root(children) => Layout::Transparent(children.as_slice()),
            Self::Block { name, children } => Layout::Block {
                open: format!("{} {{", name),
                children: children.as_slice(),
                close: "}".into(),
            },
            Self::Statement(text) => Layout::Line(text.clone()),
            Self::Property { name, value } => Layout::Line(format!("{} = {}", name, value)),
            Self::PluginId { id, version: None } => Layout::Line(format!("id(\"{}\")", id)),
            Self::PluginId {
                id,
                version: Some(version),
            } => Layout::Line(format!("id(\"{}\") version \"{}\"", id, version)),
            Self::KotlinPlugin { name, version } => {
                Layout::Line(format!("kotlin(\"{}\") version \"{}\"", name, version))
            }
            Self::BacktickPlugin(name) => Layout::Line(format!("`{}`", name)),
            Self::Dependency {
                configuration,
                notation,
            } => Layout::Line(format!("{}({})", configuration, notation)),
            Self::MethodCall {
                receiver,
                method,
                args,
            } => Layout::Line(format!("{}.{}({})", receiver, method, args.join(", "))),
            Self::EmptyLine => Layout::Line(String::new()),
        }
    }
}
