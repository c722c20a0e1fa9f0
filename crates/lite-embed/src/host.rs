//! Host services an embed runs against
//!
//! The page lends these to one component at a time.

use std::collections::HashMap;

use lite_dom::{
    Document, DomEvent, IntersectionObserverManager, IntersectionObserverOptions, NodeId,
    ObserverId, Viewport,
};

use crate::EmbedConfig;
use crate::timers::TimerManager;

/// Deferred work scheduled on the page clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Task {
    /// Send `playVideo` to a short-form embed's frame
    ShortAutoplay(NodeId),
}

/// What an intersection observer was installed for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WatchRole {
    /// One-shot: load the player once the element is in view
    Activate,
    /// Lifetime: pause the player whenever it is not fully visible
    Pause,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Watch {
    pub target: NodeId,
    pub role: WatchRole,
}

pub(crate) struct EmbedHost<'a> {
    pub document: &'a mut Document,
    pub observers: &'a mut IntersectionObserverManager,
    pub watches: &'a mut HashMap<ObserverId, Watch>,
    pub timers: &'a mut TimerManager<Task>,
    pub viewport: Viewport,
    pub config: &'a EmbedConfig,
}

impl EmbedHost<'_> {
    /// Create an observer for `target` and remember why
    pub fn watch(&mut self, target: NodeId, options: IntersectionObserverOptions, role: WatchRole) -> ObserverId {
        let id = self.observers.create(options);
        if let Some(observer) = self.observers.get(id) {
            observer.observe(target);
        }
        self.watches.insert(id, Watch { target, role });
        tracing::debug!("{:?} watch on {:?}", role, target);
        id
    }

    /// Stop an observer watching `target`; the observer itself is dropped
    pub fn unwatch(&mut self, id: ObserverId) {
        self.observers.remove(id);
        self.watches.remove(&id);
    }

    pub fn is_watching(&mut self, id: ObserverId, target: NodeId) -> bool {
        self.observers.get(id).is_some_and(|o| o.is_observing(target))
    }

    /// Dispatch an event stamped with the page clock
    pub fn dispatch(&mut self, event: DomEvent) {
        let now = self.timers.now() as f64;
        self.document.dispatch_event(event.at(now));
    }
}
