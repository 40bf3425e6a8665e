//! Presentation classes attached to tree nodes

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered, duplicate-free set of CSS class names.
///
/// Serialized the way the console keeps it: one space-separated string.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct CssClasses(Vec<String>);

impl CssClasses {
    /// Empty class list
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a space-separated class string
    pub fn parse(css: &str) -> Self {
        let mut classes = Self::new();
        for class in css.split_whitespace() {
            classes.insert(class);
        }
        classes
    }

    /// Add a class unless already present
    pub fn insert(&mut self, class: &str) {
        if !self.contains(class) {
            self.0.push(class.to_string());
        }
    }

    /// Remove a class, returning whether it was present
    pub fn remove(&mut self, class: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|c| c != class);
        before != self.0.len()
    }

    /// Check for a class
    pub fn contains(&self, class: &str) -> bool {
        self.0.iter().any(|c| c == class)
    }

    /// Iterate class names in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Number of classes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if there are no classes
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for CssClasses {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(" "))
    }
}

impl From<String> for CssClasses {
    fn from(css: String) -> Self {
        Self::parse(&css)
    }
}

impl From<&str> for CssClasses {
    fn from(css: &str) -> Self {
        Self::parse(css)
    }
}

impl From<CssClasses> for String {
    fn from(classes: CssClasses) -> Self {
        classes.to_string()
    }
}
