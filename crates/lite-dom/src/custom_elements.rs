//! Custom Elements
//!
//! Custom element registry and lifecycle callbacks. The host asks the
//! registry whether an attribute is observed and queues an
//! `AttributeChanged` callback; the element drains the queue.

use std::collections::HashMap;

use crate::{DomError, NodeId};

/// Custom elements registry
#[derive(Debug, Default)]
pub struct CustomElementRegistry {
    definitions: HashMap<String, CustomElementDefinition>,
}

/// Custom element definition
#[derive(Debug, Clone)]
pub struct CustomElementDefinition {
    pub name: String,
    /// Lowercase attribute names that trigger `AttributeChanged`
    pub observed_attributes: Vec<String>,
}

/// Custom element lifecycle callbacks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleCallback {
    Connected,
    Disconnected,
    AttributeChanged,
}

/// Lifecycle callback info
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleCallbackInfo {
    pub callback: LifecycleCallback,
    pub element_id: NodeId,
    pub attribute_name: Option<String>,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
}

impl LifecycleCallbackInfo {
    pub fn connected(element_id: NodeId) -> Self {
        Self {
            callback: LifecycleCallback::Connected,
            element_id,
            attribute_name: None,
            old_value: None,
            new_value: None,
        }
    }

    pub fn attribute_changed(
        element_id: NodeId,
        name: &str,
        old_value: Option<String>,
        new_value: Option<String>,
    ) -> Self {
        Self {
            callback: LifecycleCallback::AttributeChanged,
            element_id,
            attribute_name: Some(name.to_ascii_lowercase()),
            old_value,
            new_value,
        }
    }
}

/// Pending callback queue for batch processing
#[derive(Debug, Default)]
pub struct CallbackQueue {
    callbacks: Vec<LifecycleCallbackInfo>,
}

impl CallbackQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, info: LifecycleCallbackInfo) {
        self.callbacks.push(info);
    }

    pub fn drain(&mut self) -> Vec<LifecycleCallbackInfo> {
        std::mem::take(&mut self.callbacks)
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }
}

impl CustomElementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a custom element
    pub fn define(&mut self, name: &str, observed_attributes: &[&str]) -> Result<(), DomError> {
        if !Self::is_valid_name(name) {
            return Err(DomError::InvalidName(name.to_string()));
        }
        if self.definitions.contains_key(name) {
            return Err(DomError::AlreadyDefined(name.to_string()));
        }

        let definition = CustomElementDefinition {
            name: name.to_string(),
            observed_attributes: observed_attributes.iter().map(|a| a.to_ascii_lowercase()).collect(),
        };
        tracing::debug!("defined custom element <{}>", name);
        self.definitions.insert(name.to_string(), definition);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&CustomElementDefinition> {
        self.definitions.get(name)
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    /// Whether changing `attribute` on a `<name>` element must be reported
    pub fn is_observed(&self, name: &str, attribute: &str) -> bool {
        self.get(name).is_some_and(|def| {
            def.observed_attributes
                .iter()
                .any(|a| a.eq_ignore_ascii_case(attribute))
        })
    }

    /// Validate custom element name
    pub fn is_valid_name(name: &str) -> bool {
        if !name.contains('-') {
            return false;
        }
        if !name.chars().next().is_some_and(|c| c.is_ascii_lowercase()) {
            return false;
        }

        const RESERVED: &[&str] = &[
            "annotation-xml", "color-profile", "font-face",
            "font-face-src", "font-face-uri", "font-face-format",
            "font-face-name", "missing-glyph",
        ];
        if RESERVED.contains(&name) {
            return false;
        }

        name.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '_' | '.'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert!(CustomElementRegistry::is_valid_name("lite-youtube"));
        assert!(CustomElementRegistry::is_valid_name("lite-vimeo"));
        assert!(!CustomElementRegistry::is_valid_name("liteyoutube")); // no hyphen
        assert!(!CustomElementRegistry::is_valid_name("Lite-YouTube")); // uppercase
        assert!(!CustomElementRegistry::is_valid_name("1-embed"));
        assert!(!CustomElementRegistry::is_valid_name("font-face")); // reserved
    }

    #[test]
    fn test_define() {
        let mut registry = CustomElementRegistry::new();

        assert!(registry.define("lite-youtube", &["videoid", "playlistid"]).is_ok());
        assert!(registry.is_defined("lite-youtube"));
        assert_eq!(
            registry.define("lite-youtube", &[]),
            Err(DomError::AlreadyDefined("lite-youtube".to_string()))
        );
    }

    #[test]
    fn test_observed_attributes() {
        let mut registry = CustomElementRegistry::new();
        registry.define("lite-youtube", &["videoId", "videotitle"]).unwrap();

        assert!(registry.is_observed("lite-youtube", "videoid"));
        assert!(registry.is_observed("lite-youtube", "VIDEOTITLE"));
        assert!(!registry.is_observed("lite-youtube", "nocookie"));
        assert!(!registry.is_observed("lite-vimeo", "videoid"));
    }

    #[test]
    fn test_callback_queue() {
        let mut queue = CallbackQueue::new();
        assert!(queue.is_empty());

        queue.enqueue(LifecycleCallbackInfo::connected(NodeId(1)));
        queue.enqueue(LifecycleCallbackInfo::attribute_changed(
            NodeId(1),
            "videoId",
            None,
            Some("abc".into()),
        ));
        assert_eq!(queue.len(), 2);

        let callbacks = queue.drain();
        assert_eq!(callbacks[1].attribute_name.as_deref(), Some("videoid"));
        assert!(queue.is_empty());
    }
}
