//! Generic markup trees and the single renderer shared by both syntaxes.
//!
//! - [`XmlNode`]: elements with ordered attributes, and text
//! - [`DslNode`]: a Kotlin-style build script (`name { ... }` blocks)
//!
//! Builders own the trees they construct; [`MarkupRenderer`] only reads them.

pub mod dsl;
pub mod render;
pub mod xml;

pub use dsl::{DslNode, quote};
pub use render::{Layout, Markup, MarkupRenderer};
pub use xml::XmlNode;
