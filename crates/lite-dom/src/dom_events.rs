//! DOM Events
//!
//! User input events routed into elements, and events elements dispatch
//! back out (custom events carrying a detail payload, media events).

use crate::NodeId;

/// DOM event types
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DomEventType {
    // Input
    Click,
    PointerOver,

    // Media lifecycle
    LoadedMetadata,
    Play,
    Pause,
    Ended,
    RateChange,

    /// `CustomEvent` with an application-defined type
    Custom(String),
}

impl DomEventType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Click => "click",
            Self::PointerOver => "pointerover",
            Self::LoadedMetadata => "loadedmetadata",
            Self::Play => "play",
            Self::Pause => "pause",
            Self::Ended => "ended",
            Self::RateChange => "ratechange",
            Self::Custom(name) => name,
        }
    }
}

/// Custom event detail (flat key/value payload)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventDetail {
    entries: Vec<(String, String)>,
}

impl EventDetail {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.entries.push((key.to_string(), value.to_string()));
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// DOM event
#[derive(Debug, Clone, PartialEq)]
pub struct DomEvent {
    pub event_type: DomEventType,
    pub target: NodeId,
    pub detail: Option<EventDetail>,
    pub bubbles: bool,
    pub cancelable: bool,
    pub timestamp: f64,
    default_prevented: bool,
}

impl DomEvent {
    /// Plain, non-bubbling event
    pub fn new(event_type: DomEventType, target: NodeId) -> Self {
        Self {
            event_type,
            target,
            detail: None,
            bubbles: false,
            cancelable: false,
            timestamp: 0.0,
            default_prevented: false,
        }
    }

    /// `CustomEvent` that bubbles and can be cancelled
    pub fn custom(name: &str, target: NodeId, detail: EventDetail) -> Self {
        Self {
            event_type: DomEventType::Custom(name.to_string()),
            target,
            detail: Some(detail),
            bubbles: true,
            cancelable: true,
            timestamp: 0.0,
            default_prevented: false,
        }
    }

    pub fn at(mut self, timestamp: f64) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn prevent_default(&mut self) {
        if self.cancelable {
            self.default_prevented = true;
        }
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn type_name(&self) -> &str {
        self.event_type.as_str()
    }
}

/// Listener handle returned by `add_event_listener`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u32);

/// Listener registration options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListenerOptions {
    /// Remove the listener after it fires once
    pub once: bool,
}

impl ListenerOptions {
    pub fn once() -> Self {
        Self { once: true }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Listener {
    pub id: ListenerId,
    pub target: NodeId,
    pub event_type: DomEventType,
    pub options: ListenerOptions,
}
