//! Shadow DOM
//!
//! A shadow root is an arena node of its own whose children form the shadow
//! tree; it is never linked as a child of its host.

use crate::NodeId;

/// Shadow root mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadowRootMode {
    #[default]
    Open,
    Closed,
}

/// Shadow root
#[derive(Debug, Clone)]
pub struct ShadowRoot {
    pub host: NodeId,
    pub mode: ShadowRootMode,
    /// Arena node holding the shadow children
    pub root: NodeId,
}

impl ShadowRoot {
    pub fn new(host: NodeId, root: NodeId, mode: ShadowRootMode) -> Self {
        Self { host, mode, root }
    }

    pub fn is_open(&self) -> bool {
        self.mode == ShadowRootMode::Open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shadow_root() {
        let shadow = ShadowRoot::new(NodeId(1), NodeId(2), ShadowRootMode::Open);
        assert!(shadow.is_open());
        assert_eq!(shadow.host, NodeId(1));
        assert!(!ShadowRoot::new(NodeId(1), NodeId(2), ShadowRootMode::Closed).is_open());
    }
}
