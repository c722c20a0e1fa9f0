//! Intersection Observer API
//!
//! Observe element visibility and intersection with the viewport.

use std::collections::HashMap;

use crate::{NodeId, Viewport};

/// Intersection observer id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// Intersection observer options
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionObserverOptions {
    /// Root margin in CSS pixels, applied on every side of the viewport
    pub root_margin: f32,
    /// Thresholds to trigger callback
    pub threshold: Vec<f32>,
}

impl Default for IntersectionObserverOptions {
    fn default() -> Self {
        Self {
            root_margin: 0.0,
            threshold: vec![0.0],
        }
    }
}

impl IntersectionObserverOptions {
    pub fn with_threshold(threshold: f32) -> Self {
        Self {
            threshold: vec![threshold],
            ..Self::default()
        }
    }
}

/// Intersection observer entry
#[derive(Debug, Clone)]
pub struct IntersectionObserverEntry {
    pub target: NodeId,
    pub bounding_client_rect: DOMRect,
    pub intersection_rect: DOMRect,
    pub root_bounds: DOMRect,
    pub intersection_ratio: f32,
    pub is_intersecting: bool,
    pub time: f64,
}

/// DOM rect
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DOMRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl DOMRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn top(&self) -> f32 { self.y }
    pub fn left(&self) -> f32 { self.x }
    pub fn right(&self) -> f32 { self.x + self.width }
    pub fn bottom(&self) -> f32 { self.y + self.height }

    /// Intersection with another rect; edge-adjacent rects intersect with
    /// zero area
    pub fn intersect(&self, other: &DOMRect) -> Option<DOMRect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right >= x && bottom >= y {
            Some(DOMRect {
                x,
                y,
                width: right - x,
                height: bottom - y,
            })
        } else {
            None
        }
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct LastState {
    threshold_index: usize,
    is_intersecting: bool,
}

/// Intersection observer
#[derive(Debug)]
pub struct IntersectionObserver {
    id: ObserverId,
    options: IntersectionObserverOptions,
    /// Observed targets in observation order, with the last reported state
    observed: Vec<(NodeId, Option<LastState>)>,
    pending_entries: Vec<IntersectionObserverEntry>,
}

impl IntersectionObserver {
    fn new(id: ObserverId, options: IntersectionObserverOptions) -> Self {
        Self {
            id,
            options,
            observed: Vec::new(),
            pending_entries: Vec::new(),
        }
    }

    pub fn id(&self) -> ObserverId {
        self.id
    }

    pub fn options(&self) -> &IntersectionObserverOptions {
        &self.options
    }

    /// Observe an element (no-op if already observed)
    pub fn observe(&mut self, target: NodeId) {
        if !self.is_observing(target) {
            self.observed.push((target, None));
        }
    }

    /// Stop observing
    pub fn unobserve(&mut self, target: NodeId) {
        self.observed.retain(|(n, _)| *n != target);
        self.pending_entries.retain(|e| e.target != target);
    }

    pub fn is_observing(&self, target: NodeId) -> bool {
        self.observed.iter().any(|(n, _)| *n == target)
    }

    /// Disconnect all
    pub fn disconnect(&mut self) {
        self.observed.clear();
        self.pending_entries.clear();
    }

    /// Number of thresholds the ratio has reached
    fn threshold_index(&self, ratio: f32, is_intersecting: bool) -> usize {
        self.options
            .threshold
            .iter()
            .filter(|&&t| if t == 0.0 { is_intersecting } else { ratio >= t })
            .count()
    }

    /// Check intersections
    pub fn check_intersections(
        &mut self,
        viewport: &Viewport,
        element_rects: &HashMap<NodeId, DOMRect>,
        time: f64,
    ) {
        let root = viewport.expand(self.options.root_margin).rect();
        let mut updates = Vec::new();

        for (index, (node, last)) in self.observed.iter().enumerate() {
            let Some(rect) = element_rects.get(node) else {
                continue;
            };
            let intersection = rect.intersect(&root);
            let is_intersecting = intersection.is_some();
            let ratio = match intersection {
                Some(i) if rect.area() > 0.0 => i.area() / rect.area(),
                // Zero-area targets are fully visible when they touch the root
                Some(_) => 1.0,
                None => 0.0,
            };
            let state = LastState {
                threshold_index: self.threshold_index(ratio, is_intersecting),
                is_intersecting,
            };

            if *last != Some(state) {
                updates.push((index, state));
                self.pending_entries.push(IntersectionObserverEntry {
                    target: *node,
                    bounding_client_rect: *rect,
                    intersection_rect: intersection.unwrap_or_default(),
                    root_bounds: root,
                    intersection_ratio: ratio,
                    is_intersecting,
                    time,
                });
            }
        }

        for (index, state) in updates {
            self.observed[index].1 = Some(state);
        }
    }

    /// Take pending entries
    pub fn take_entries(&mut self) -> Vec<IntersectionObserverEntry> {
        std::mem::take(&mut self.pending_entries)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending_entries.is_empty()
    }
}

/// Intersection observer manager
#[derive(Debug, Default)]
pub struct IntersectionObserverManager {
    observers: Vec<IntersectionObserver>,
    next_id: u64,
}

impl IntersectionObserverManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create observer
    pub fn create(&mut self, options: IntersectionObserverOptions) -> ObserverId {
        self.next_id += 1;
        let id = ObserverId(self.next_id);
        self.observers.push(IntersectionObserver::new(id, options));
        id
    }

    /// Get observer
    pub fn get(&mut self, id: ObserverId) -> Option<&mut IntersectionObserver> {
        self.observers.iter_mut().find(|o| o.id() == id)
    }

    /// Remove observer
    pub fn remove(&mut self, id: ObserverId) {
        self.observers.retain(|o| o.id() != id);
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Process all observers
    pub fn process(
        &mut self,
        viewport: &Viewport,
        element_rects: &HashMap<NodeId, DOMRect>,
        time: f64,
    ) -> Vec<(ObserverId, Vec<IntersectionObserverEntry>)> {
        let mut results = Vec::new();
        for observer in &mut self.observers {
            observer.check_intersections(viewport, element_rects, time);
            if observer.has_pending() {
                results.push((observer.id(), observer.take_entries()));
            }
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rects(node: NodeId, rect: DOMRect) -> HashMap<NodeId, DOMRect> {
        let mut rects = HashMap::new();
        rects.insert(node, rect);
        rects
    }

    #[test]
    fn test_intersection_observer() {
        let mut manager = IntersectionObserverManager::new();
        let id = manager.create(IntersectionObserverOptions::default());
        let node = NodeId(1);
        manager.get(id).unwrap().observe(node);

        let viewport = Viewport::sized(800.0, 600.0);
        let rects = rects(node, DOMRect::new(100.0, 100.0, 200.0, 200.0));

        let results = manager.process(&viewport, &rects, 0.0);
        assert_eq!(results.len(), 1);
        assert!(results[0].1[0].is_intersecting);

        // Unchanged state produces nothing
        assert!(manager.process(&viewport, &rects, 1.0).is_empty());
    }

    #[test]
    fn test_first_observation_reports_offscreen() {
        let mut manager = IntersectionObserverManager::new();
        let id = manager.create(IntersectionObserverOptions::default());
        let node = NodeId(1);
        manager.get(id).unwrap().observe(node);

        let rects = rects(node, DOMRect::new(0.0, 2000.0, 200.0, 200.0));
        let results = manager.process(&Viewport::sized(800.0, 600.0), &rects, 0.0);
        assert_eq!(results.len(), 1);
        assert!(!results[0].1[0].is_intersecting);
    }

    #[test]
    fn test_full_visibility_threshold() {
        let mut manager = IntersectionObserverManager::new();
        let id = manager.create(IntersectionObserverOptions::with_threshold(1.0));
        let node = NodeId(3);
        manager.get(id).unwrap().observe(node);

        let viewport = Viewport::sized(800.0, 600.0);
        let rect = rects(node, DOMRect::new(0.0, 100.0, 400.0, 225.0));
        let entries = manager.process(&viewport, &rect, 0.0);
        assert_eq!(entries[0].1[0].intersection_ratio, 1.0);

        // Half scrolled away: still intersecting, but below threshold
        let scrolled = viewport.scrolled_to(0.0, 212.5);
        let entries = manager.process(&scrolled, &rect, 1.0);
        assert_eq!(entries.len(), 1);
        let entry = &entries[0].1[0];
        assert!(entry.is_intersecting);
        assert!(entry.intersection_ratio < 1.0);
    }

    #[test]
    fn test_root_margin() {
        let mut manager = IntersectionObserverManager::new();
        let id = manager.create(IntersectionObserverOptions {
            root_margin: 100.0,
            threshold: vec![0.0],
        });
        let node = NodeId(1);
        manager.get(id).unwrap().observe(node);

        let rects = rects(node, DOMRect::new(0.0, 650.0, 100.0, 100.0));
        let entries = manager.process(&Viewport::sized(800.0, 600.0), &rects, 0.0);
        assert!(entries[0].1[0].is_intersecting);
    }

    #[test]
    fn test_unobserve() {
        let mut manager = IntersectionObserverManager::new();
        let id = manager.create(IntersectionObserverOptions::default());
        let node = NodeId(1);
        let observer = manager.get(id).unwrap();
        observer.observe(node);
        observer.unobserve(node);
        assert!(!observer.is_observing(node));

        let rects = rects(node, DOMRect::new(0.0, 0.0, 10.0, 10.0));
        assert!(manager.process(&Viewport::default(), &rects, 0.0).is_empty());
    }
}
