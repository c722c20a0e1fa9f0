//! lite DOM - host Document Object Model
//!
//! A small arena DOM that custom elements are written against: attributes,
//! shadow roots, custom element definitions, listeners, intersection
//! observers and HTML serialization.

mod attributes;
mod custom_elements;
mod document;
mod dom_events;
mod intersection;
mod node;
mod serializer;
mod shadow;
mod tree;
mod viewport;

pub use attributes::{Attr, NamedNodeMap};
pub use custom_elements::{
    CallbackQueue, CustomElementDefinition, CustomElementRegistry, LifecycleCallback,
    LifecycleCallbackInfo,
};
pub use document::{Document, EVENT_LOG_CAPACITY, PostedMessage};
pub use dom_events::{DomEvent, DomEventType, EventDetail, ListenerId, ListenerOptions};
pub use intersection::{
    DOMRect, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverManager,
    IntersectionObserverOptions, ObserverId,
};
pub use node::{ElementData, Node, NodeData};
pub use serializer::{HtmlSerializer, get_inner_html, get_outer_html};
pub use shadow::{ShadowRoot, ShadowRootMode};
pub use tree::DomTree;
pub use viewport::{MediaQuery, Viewport};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Document node ID
    pub const ROOT: NodeId = NodeId(0);
    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// DOM errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("node {0:?} does not exist")]
    NoSuchNode(NodeId),

    #[error("node {0:?} is not an element")]
    NotAnElement(NodeId),

    #[error("element {0:?} already hosts a shadow root")]
    ShadowAlreadyAttached(NodeId),

    #[error("invalid custom element name: {0}")]
    InvalidName(String),

    #[error("custom element already defined: {0}")]
    AlreadyDefined(String),
}
