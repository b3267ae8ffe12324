//! JSON document stores.

mod json;

pub use json::{JsonFileStore, JsonStoreFactory};
