//! Viewport and media queries

use crate::DOMRect;

/// CSS pixels per `em` for media query evaluation
const PX_PER_EM: f32 = 16.0;

/// Layout viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0.0, 0.0, 1280.0, 800.0)
    }
}

impl Viewport {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Viewport of the given size at the scroll origin
    pub const fn sized(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn rect(&self) -> DOMRect {
        DOMRect::new(self.x, self.y, self.width, self.height)
    }

    /// Grow on every side by `margin` pixels (negative shrinks)
    pub fn expand(&self, margin: f32) -> Viewport {
        Viewport {
            x: self.x - margin,
            y: self.y - margin,
            width: (self.width + margin * 2.0).max(0.0),
            height: (self.height + margin * 2.0).max(0.0),
        }
    }

    /// Scroll to a new offset, keeping the size
    pub fn scrolled_to(&self, x: f32, y: f32) -> Viewport {
        Viewport { x, y, ..*self }
    }

    pub fn matches(&self, query: MediaQuery) -> bool {
        query.evaluate(self)
    }
}

/// The media features the embeds care about
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MediaQuery {
    /// `(max-width: Nem)`
    MaxWidthEm(f32),
    /// `(min-width: Nem)`
    MinWidthEm(f32),
}

impl MediaQuery {
    pub fn evaluate(&self, viewport: &Viewport) -> bool {
        match *self {
            Self::MaxWidthEm(em) => viewport.width <= em * PX_PER_EM,
            Self::MinWidthEm(em) => viewport.width >= em * PX_PER_EM,
        }
    }
}
