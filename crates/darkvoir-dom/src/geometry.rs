//! Shared geometry types: viewport and bounding box.

use serde::{Deserialize, Serialize};

/// Viewport information for coordinate calculations.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ViewportInfo {
    /// Viewport width in pixels.
    pub width: f64,
    /// Viewport height in pixels.
    pub height: f64,
    /// Scroll X offset.
    #[serde(default)]
    pub scroll_x: f64,
    /// Scroll Y offset.
    #[serde(default)]
    pub scroll_y: f64,
}

impl Default for ViewportInfo {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            scroll_x: 0.0,
            scroll_y: 0.0,
        }
    }
}

/// Bounding box for an element, in whichever coordinate space the caller
/// asked for (viewport or document).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Whether the box has no area at all.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Get the center point of this bounding box.
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Grow the box outward by `padding` on every side.
    pub fn inflate(&self, padding: f64) -> Self {
        Self {
            x: self.x - padding,
            y: self.y - padding,
            width: self.width + padding * 2.0,
            height: self.height + padding * 2.0,
        }
    }

    /// Translate the box by an offset.
    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            width: self.width,
            height: self.height,
        }
    }

    /// Whether the box (viewport coordinates) lies within the viewport
    /// expanded vertically by `margin` pixels in both directions.
    pub fn within_expanded_viewport(&self, viewport: &ViewportInfo, margin: f64) -> bool {
        self.bottom() > -margin && self.y < viewport.height + margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_box() {
        assert!(BoundingBox::default().is_empty());
        assert!(!BoundingBox::new(0.0, 0.0, 10.0, 10.0).is_empty());
    }

    #[test]
    fn test_center() {
        let b = BoundingBox::new(0.0, 0.0, 100.0, 100.0);
        assert_eq!(b.center(), (50.0, 50.0));
    }

    #[test]
    fn test_inflate() {
        let b = BoundingBox::new(10.0, 10.0, 20.0, 20.0).inflate(5.0);
        assert_eq!(b, BoundingBox::new(5.0, 5.0, 30.0, 30.0));
    }

    #[test]
    fn test_expanded_viewport_margin() {
        let viewport = ViewportInfo::default();
        let above = BoundingBox::new(0.0, -400.0, 50.0, 50.0);
        let far_above = BoundingBox::new(0.0, -700.0, 50.0, 50.0);
        let below = BoundingBox::new(0.0, 1100.0, 50.0, 50.0);
        let far_below = BoundingBox::new(0.0, 1300.0, 50.0, 50.0);
        assert!(above.within_expanded_viewport(&viewport, 500.0));
        assert!(!far_above.within_expanded_viewport(&viewport, 500.0));
        assert!(below.within_expanded_viewport(&viewport, 500.0));
        assert!(!far_below.within_expanded_viewport(&viewport, 500.0));
    }
}
