//! Paths into a nested JSON document.

use std::fmt;

/// One step of a [`KeyPath`]: a map key or a list index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Name(String),
    Index(usize),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Index(index) => write!(f, "{}", index),
        }
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<usize> for Key {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// Address of a value inside a nested map/list document.
///
/// Displayed dot-joined: `developer.githubName`, `prefix.0`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct KeyPath(Vec<Key>);

impl KeyPath {
    pub fn new(keys: Vec<Key>) -> Self {
        Self(keys)
    }

    /// Path made only of map keys.
    pub fn names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(|n| Key::Name(n.into())).collect())
    }

    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut keys = self.0.clone();
        keys.push(Key::Name(name.into()));
        Self(keys)
    }

    pub fn index(&self, index: usize) -> Self {
        let mut keys = self.0.clone();
        keys.push(Key::Index(index));
        Self(keys)
    }

    /// `prefix` followed by this path.
    pub fn prefixed(&self, prefix: &KeyPath) -> Self {
        Self(prefix.0.iter().chain(&self.0).cloned().collect())
    }

    pub fn keys(&self) -> &[Key] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, key) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", key)?;
        }
        Ok(())
    }
}

impl From<&str> for KeyPath {
    fn from(name: &str) -> Self {
        Self(vec![Key::from(name)])
    }
}

impl<const N: usize> From<[&str; N]> for KeyPath {
    fn from(names: [&str; N]) -> Self {
        Self::names(names)
    }
}
