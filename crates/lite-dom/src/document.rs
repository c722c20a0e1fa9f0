//! Document - High-level document API
//!
//! Wraps the tree with everything that needs document scope: shadow roots,
//! the custom element registry and its callback queue, event listeners and
//! the outbox of `postMessage` calls made to embedded frames.

use std::collections::HashMap;

use crate::dom_events::Listener;
use crate::{
    CallbackQueue, CustomElementRegistry, DomError, DomEvent, DomEventType, DomTree,
    LifecycleCallbackInfo, ListenerId, ListenerOptions, NodeData, NodeId, ShadowRoot,
    ShadowRootMode,
};

/// A `postMessage` call delivered to a connected frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostedMessage {
    pub target: NodeId,
    pub data: String,
    pub target_origin: String,
}

/// Dispatched events kept for inspection; older ones are dropped
pub const EVENT_LOG_CAPACITY: usize = 256;

/// HTML Document
#[derive(Debug)]
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    /// Document URL
    url: String,
    /// Cached reference to <html> element
    html_element: NodeId,
    /// Cached reference to <head> element
    head_element: NodeId,
    /// Cached reference to <body> element
    body_element: NodeId,
    /// Shadow roots by host
    shadow_roots: HashMap<NodeId, ShadowRoot>,
    registry: CustomElementRegistry,
    callbacks: CallbackQueue,
    listeners: Vec<Listener>,
    next_listener: u32,
    /// Most recent dispatched events, oldest first
    events: Vec<DomEvent>,
    outbox: Vec<PostedMessage>,
}

impl Document {
    /// Create a new document with html/head/body
    pub fn new(url: &str) -> Self {
        let mut tree = DomTree::new();

        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        // Freshly created nodes; linking them cannot fail
        let _ = tree.append_child(tree.root(), html);
        let _ = tree.append_child(html, head);
        let _ = tree.append_child(html, body);

        Self {
            tree,
            url: url.to_string(),
            html_element: html,
            head_element: head,
            body_element: body,
            shadow_roots: HashMap::new(),
            registry: CustomElementRegistry::new(),
            callbacks: CallbackQueue::new(),
            listeners: Vec::new(),
            next_listener: 0,
            events: Vec::new(),
            outbox: Vec::new(),
        }
    }

    /// Get document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get <head> element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    /// Get element by ID (light DOM only)
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree.find_by_id(self.tree.root(), id)
    }

    // --- Shadow DOM ---

    /// Attach a shadow root, returning the node that holds the shadow tree
    pub fn attach_shadow(&mut self, host: NodeId, mode: ShadowRootMode) -> Result<NodeId, DomError> {
        if self.tree.element(host).is_none() {
            return Err(DomError::NotAnElement(host));
        }
        if self.shadow_roots.contains_key(&host) {
            return Err(DomError::ShadowAlreadyAttached(host));
        }

        let root = self.tree.create_shadow_root(host);
        self.shadow_roots.insert(host, ShadowRoot::new(host, root, mode));
        Ok(root)
    }

    pub fn shadow_root(&self, host: NodeId) -> Option<&ShadowRoot> {
        self.shadow_roots.get(&host)
    }

    /// Find an element by id inside a host's shadow tree
    pub fn shadow_element_by_id(&self, host: NodeId, id: &str) -> Option<NodeId> {
        let shadow = self.shadow_roots.get(&host)?;
        self.tree.find_by_id(shadow.root, id)
    }

    /// Whether a node is reachable from the document, crossing shadow
    /// boundaries through their hosts
    pub fn is_connected(&self, id: NodeId) -> bool {
        let mut cur = id;
        loop {
            let top = self.tree.tree_root(cur);
            match self.tree.get(top).map(|n| &n.data) {
                Some(NodeData::Document) => return true,
                Some(NodeData::ShadowRoot { host }) => cur = *host,
                _ => return false,
            }
        }
    }

    /// Shadow-including ancestors of a node, nearest first
    fn propagation_path(&self, target: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut cur = target;
        while cur.is_valid() {
            path.push(cur);
            cur = match self.tree.parent(cur) {
                Some(parent) => parent,
                None => match self.tree.get(cur).map(|n| &n.data) {
                    Some(NodeData::ShadowRoot { host }) => *host,
                    _ => NodeId::NONE,
                },
            };
        }
        path
    }

    // --- Custom elements ---

    pub fn registry(&self) -> &CustomElementRegistry {
        &self.registry
    }

    /// Define a custom element
    pub fn define(&mut self, name: &str, observed_attributes: &[&str]) -> Result<(), DomError> {
        self.registry.define(name, observed_attributes)
    }

    /// Whether a node is an element whose tag has a custom element definition
    pub fn is_custom_element(&self, id: NodeId) -> bool {
        self.tree.tag_name(id).is_some_and(|tag| self.registry.is_defined(tag))
    }

    /// Set an attribute, queueing `AttributeChanged` for observed attributes
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> Result<Option<String>, DomError> {
        let old = self.tree.set_attribute(id, name, value)?;
        if old.as_deref() != Some(value) {
            self.queue_attribute_changed(id, name, old.clone(), Some(value.to_string()));
        }
        Ok(old)
    }

    /// Remove an attribute, queueing `AttributeChanged` if it was present
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Option<String> {
        let old = self.tree.remove_attribute(id, name)?;
        self.queue_attribute_changed(id, name, Some(old.clone()), None);
        Some(old)
    }

    fn queue_attribute_changed(&mut self, id: NodeId, name: &str, old: Option<String>, new: Option<String>) {
        let Some(tag) = self.tree.tag_name(id) else {
            return;
        };
        if self.registry.is_observed(tag, name) {
            tracing::debug!("<{}> {:?} observed {} change", tag, id, name);
            self.callbacks
                .enqueue(LifecycleCallbackInfo::attribute_changed(id, name, old, new));
        }
    }

    /// Append a child, queueing `Connected` for custom elements that become
    /// connected
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        let was_connected = self.is_connected(child);
        self.tree.append_child(parent, child)?;
        if !was_connected && self.is_connected(child) {
            let mut subtree = vec![child];
            subtree.extend(self.tree.descendants(child));
            for id in subtree {
                if self.is_custom_element(id) {
                    self.callbacks.enqueue(LifecycleCallbackInfo::connected(id));
                }
            }
        }
        Ok(())
    }

    /// Pending lifecycle callbacks, oldest first
    pub fn take_callbacks(&mut self) -> Vec<LifecycleCallbackInfo> {
        self.callbacks.drain()
    }

    // --- Events ---

    pub fn add_event_listener(
        &mut self,
        target: NodeId,
        event_type: DomEventType,
        options: ListenerOptions,
    ) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push(Listener {
            id,
            target,
            event_type,
            options,
        });
        id
    }

    pub fn remove_event_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.id != id);
        self.listeners.len() != before
    }

    pub fn has_event_listener(&self, target: NodeId, event_type: &DomEventType) -> bool {
        self.listeners
            .iter()
            .any(|l| l.target == target && &l.event_type == event_type)
    }

    /// Dispatch an event, returning the listeners it reached in propagation
    /// order. `once` listeners are removed as they fire.
    pub fn dispatch_event(&mut self, event: DomEvent) -> Vec<ListenerId> {
        let path = if event.bubbles {
            self.propagation_path(event.target)
        } else {
            vec![event.target]
        };

        let mut fired = Vec::new();
        for node in path {
            for listener in &self.listeners {
                if listener.target == node && listener.event_type == event.event_type {
                    fired.push((listener.id, listener.options.once));
                }
            }
        }

        self.listeners
            .retain(|l| !fired.iter().any(|&(id, once)| once && id == l.id));

        tracing::trace!("dispatched {} to {:?}", event.type_name(), event.target);
        if self.events.len() >= EVENT_LOG_CAPACITY {
            let excess = self.events.len() + 1 - EVENT_LOG_CAPACITY;
            self.events.drain(..excess);
        }
        self.events.push(event);
        fired.into_iter().map(|(id, _)| id).collect()
    }

    /// The last `EVENT_LOG_CAPACITY` dispatched events, oldest first
    pub fn events(&self) -> &[DomEvent] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<DomEvent> {
        std::mem::take(&mut self.events)
    }

    // --- Messaging ---

    /// `iframe.contentWindow.postMessage(data, origin)`; returns false (and
    /// drops the message) unless `target` is a connected iframe
    pub fn post_message(&mut self, target: NodeId, data: &str, target_origin: &str) -> bool {
        if self.tree.tag_name(target) != Some("iframe") || !self.is_connected(target) {
            tracing::trace!("dropped message to {:?}", target);
            return false;
        }
        self.outbox.push(PostedMessage {
            target,
            data: data.to_string(),
            target_origin: target_origin.to_string(),
        });
        true
    }

    pub fn posted_messages(&self) -> &[PostedMessage] {
        &self.outbox
    }

    pub fn take_posted_messages(&mut self) -> Vec<PostedMessage> {
        std::mem::take(&mut self.outbox)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EventDetail, LifecycleCallback};

    #[test]
    fn test_document_structure() {
        let doc = Document::new("https://example.com/");
        assert_eq!(doc.url(), "https://example.com/");
        assert_eq!(doc.tree.tag_name(doc.head()), Some("head"));
        assert_eq!(doc.tree.parent(doc.body()), Some(doc.document_element()));
    }

    #[test]
    fn test_attach_shadow_once() {
        let mut doc = Document::default();
        let host = doc.tree.create_element("lite-youtube");

        let root = doc.attach_shadow(host, ShadowRootMode::Open).unwrap();
        assert_eq!(doc.shadow_root(host).map(|s| s.root), Some(root));
        assert_eq!(
            doc.attach_shadow(host, ShadowRootMode::Open),
            Err(DomError::ShadowAlreadyAttached(host))
        );
    }

    #[test]
    fn test_is_connected_through_shadow() {
        let mut doc = Document::default();
        let host = doc.tree.create_element("lite-youtube");
        let root = doc.attach_shadow(host, ShadowRootMode::Open).unwrap();
        let frame = doc.tree.create_element("div");
        doc.tree.append_child(root, frame).unwrap();

        assert!(!doc.is_connected(frame));
        let body = doc.body();
        doc.append_child(body, host).unwrap();
        assert!(doc.is_connected(frame));
    }

    #[test]
    fn test_observed_attribute_callbacks() {
        let mut doc = Document::default();
        doc.define("lite-youtube", &["videoid"]).unwrap();
        let el = doc.tree.create_element("lite-youtube");

        doc.set_attribute(el, "videoId", "a").unwrap();
        doc.set_attribute(el, "videoid", "a").unwrap(); // unchanged
        doc.set_attribute(el, "nocookie", "").unwrap(); // not observed
        doc.remove_attribute(el, "videoid");

        let callbacks = doc.take_callbacks();
        assert_eq!(callbacks.len(), 2);
        assert_eq!(callbacks[0].new_value.as_deref(), Some("a"));
        assert_eq!(callbacks[1].old_value.as_deref(), Some("a"));
        assert_eq!(callbacks[1].new_value, None);
    }

    #[test]
    fn test_connected_callback() {
        let mut doc = Document::default();
        doc.define("lite-vimeo", &[]).unwrap();
        let el = doc.tree.create_element("lite-vimeo");
        let body = doc.body();
        doc.append_child(body, el).unwrap();

        let callbacks = doc.take_callbacks();
        assert_eq!(callbacks.len(), 1);
        assert_eq!(callbacks[0].callback, LifecycleCallback::Connected);
    }

    #[test]
    fn test_once_listener() {
        let mut doc = Document::default();
        let el = doc.tree.create_element("div");
        let once = doc.add_event_listener(el, DomEventType::PointerOver, ListenerOptions::once());
        let always = doc.add_event_listener(el, DomEventType::PointerOver, ListenerOptions::default());

        let fired = doc.dispatch_event(DomEvent::new(DomEventType::PointerOver, el));
        assert_eq!(fired, vec![once, always]);

        let fired = doc.dispatch_event(DomEvent::new(DomEventType::PointerOver, el));
        assert_eq!(fired, vec![always]);
        assert_eq!(doc.take_events().len(), 2);
    }

    #[test]
    fn test_event_log_is_bounded() {
        let mut doc = Document::default();
        let el = doc.tree.create_element("div");
        for _ in 0..EVENT_LOG_CAPACITY + 10 {
            doc.dispatch_event(DomEvent::new(DomEventType::Click, el));
        }
        doc.dispatch_event(DomEvent::new(DomEventType::Play, el));

        let events = doc.events();
        assert_eq!(events.len(), EVENT_LOG_CAPACITY);
        assert_eq!(events.last().map(|e| e.event_type.clone()), Some(DomEventType::Play));
    }

    #[test]
    fn test_bubbling_from_shadow_tree() {
        let mut doc = Document::default();
        let host = doc.tree.create_element("lite-youtube");
        let body = doc.body();
        doc.append_child(body, host).unwrap();
        let root = doc.attach_shadow(host, ShadowRootMode::Open).unwrap();
        let button = doc.tree.create_element("button");
        doc.tree.append_child(root, button).unwrap();

        let on_body = doc.add_event_listener(
            body,
            DomEventType::Custom("loaded".into()),
            ListenerOptions::default(),
        );
        let fired = doc.dispatch_event(DomEvent::custom("loaded", button, EventDetail::new()));
        assert_eq!(fired, vec![on_body]);
    }

    #[test]
    fn test_post_message_requires_connected_iframe() {
        let mut doc = Document::default();
        let iframe = doc.tree.create_element("iframe");
        assert!(!doc.post_message(iframe, "{}", "*"));

        let body = doc.body();
        doc.append_child(body, iframe).unwrap();
        assert!(doc.post_message(iframe, "{}", "*"));

        let div = doc.tree.create_element("div");
        doc.append_child(body, div).unwrap();
        assert!(!doc.post_message(div, "{}", "*"));

        let messages = doc.take_posted_messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].target_origin, "*");
    }
}
