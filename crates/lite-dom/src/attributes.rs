//! Element Attributes
//!
//! Attribute storage with HTML name semantics: names are ASCII
//! case-insensitive and kept in insertion order.

use std::collections::HashMap;

/// Named node map (attribute collection)
#[derive(Debug, Clone, Default)]
pub struct NamedNodeMap {
    attributes: Vec<Attr>,
    by_name: HashMap<String, usize>,
}

/// Single attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    pub name: String,
    pub value: String,
}

impl Attr {
    pub fn new(name: impl AsRef<str>, value: impl Into<String>) -> Self {
        Self {
            name: fold(name.as_ref()),
            value: value.into(),
        }
    }
}

fn fold(name: &str) -> String {
    name.to_ascii_lowercase()
}

impl NamedNodeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of attributes
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Attribute value by (case-insensitive) name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.by_name
            .get(&fold(name))
            .and_then(|&i| self.attributes.get(i))
            .map(|a| a.value.as_str())
    }

    /// Set an attribute, returning the previous value
    pub fn set(&mut self, name: &str, value: &str) -> Option<String> {
        let attr = Attr::new(name, value);
        if let Some(&index) = self.by_name.get(&attr.name) {
            Some(std::mem::replace(&mut self.attributes[index].value, attr.value))
        } else {
            self.by_name.insert(attr.name.clone(), self.attributes.len());
            self.attributes.push(attr);
            None
        }
    }

    /// Remove an attribute, returning its value
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let index = self.by_name.remove(&fold(name))?;
        for idx in self.by_name.values_mut() {
            if *idx > index {
                *idx -= 1;
            }
        }
        Some(self.attributes.remove(index).value)
    }

    pub fn has(&self, name: &str) -> bool {
        self.by_name.contains_key(&fold(name))
    }

    /// Toggle a boolean attribute
    pub fn toggle(&mut self, name: &str, force: Option<bool>) -> bool {
        let present = self.has(name);
        match force.unwrap_or(!present) {
            true => {
                if !present {
                    self.set(name, "");
                }
                true
            }
            false => {
                self.remove(name);
                false
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attr> {
        self.attributes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_fold_case() {
        let mut attrs = NamedNodeMap::new();
        attrs.set("videoStartAt", "30");

        assert_eq!(attrs.get("videostartat"), Some("30"));
        assert_eq!(attrs.get("VIDEOSTARTAT"), Some("30"));
        assert_eq!(attrs.iter().next().map(|a| a.name.as_str()), Some("videostartat"));
    }

    #[test]
    fn test_set_returns_previous() {
        let mut attrs = NamedNodeMap::new();
        assert_eq!(attrs.set("videoid", "a"), None);
        assert_eq!(attrs.set("videoid", "b"), Some("a".to_string()));
        assert_eq!(attrs.len(), 1);
    }

    #[test]
    fn test_remove_keeps_indices() {
        let mut attrs = NamedNodeMap::new();
        attrs.set("a", "1");
        attrs.set("b", "2");
        attrs.set("c", "3");

        assert_eq!(attrs.remove("a"), Some("1".to_string()));
        assert_eq!(attrs.get("c"), Some("3"));
        assert_eq!(attrs.get("b"), Some("2"));
        assert!(!attrs.has("a"));
    }

    #[test]
    fn test_toggle() {
        let mut attrs = NamedNodeMap::new();

        assert!(attrs.toggle("nocookie", None));
        assert_eq!(attrs.get("nocookie"), Some(""));
        assert!(!attrs.toggle("nocookie", None));
        assert!(attrs.toggle("autoload", Some(true)));
        assert!(attrs.toggle("autoload", Some(true)));
        assert!(!attrs.toggle("autoload", Some(false)));
    }
}
