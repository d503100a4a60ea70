//! Viewport state
//!
//! The document scroll position and viewport dimensions - the read-only
//! shared state every section consults. Only two things ever mutate it:
//! user scroll deltas applied by the app (subject to the scroll policy) and
//! the smooth-scroll action.

/// Scroll position and dimensions of the visible page
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    /// Distance scrolled from document top, px
    pub scroll_y: f32,
    /// Viewport width, px
    pub width: f32,
    /// Viewport height, px
    pub height: f32,
    /// Total document height, px
    pub content_height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32, content_height: f32) -> Self {
        Self {
            scroll_y: 0.0,
            width,
            height,
            content_height,
        }
    }

    /// The furthest the page can scroll
    pub fn max_scroll(&self) -> f32 {
        (self.content_height - self.height).max(0.0)
    }

    /// Overall scroll progress through the document, in [0, 1]
    pub fn scroll_fraction(&self) -> f32 {
        let max = self.max_scroll();
        if max <= 0.0 {
            0.0
        } else {
            (self.scroll_y / max).clamp(0.0, 1.0)
        }
    }

    /// Set the scroll position, clamped to the scrollable range
    pub fn set_scroll(&mut self, y: f32) {
        self.scroll_y = y.clamp(0.0, self.max_scroll());
    }

    /// Apply a scroll delta (positive scrolls down)
    pub fn apply_scroll_delta(&mut self, delta: f32) {
        self.set_scroll(self.scroll_y + delta);
    }

    /// Document-space y of the viewport bottom edge
    pub fn bottom(&self) -> f32 {
        self.scroll_y + self.height
    }

    /// Whether a document-space span intersects the visible region
    pub fn intersects(&self, top: f32, bottom: f32) -> bool {
        bottom > self.scroll_y && top < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_clamps() {
        let mut vp = Viewport::new(1280.0, 720.0, 4000.0);
        vp.set_scroll(-100.0);
        assert_eq!(vp.scroll_y, 0.0);
        vp.set_scroll(10_000.0);
        assert_eq!(vp.scroll_y, 4000.0 - 720.0);
    }

    #[test]
    fn test_scroll_fraction() {
        let mut vp = Viewport::new(1280.0, 720.0, 4000.0);
        assert_eq!(vp.scroll_fraction(), 0.0);
        vp.set_scroll(vp.max_scroll());
        assert_eq!(vp.scroll_fraction(), 1.0);

        // Content shorter than the viewport never scrolls
        let short = Viewport::new(1280.0, 720.0, 500.0);
        assert_eq!(short.max_scroll(), 0.0);
        assert_eq!(short.scroll_fraction(), 0.0);
    }

    #[test]
    fn test_intersects() {
        let mut vp = Viewport::new(1280.0, 720.0, 4000.0);
        vp.set_scroll(1000.0);
        assert!(vp.intersects(900.0, 1100.0));
        assert!(vp.intersects(1500.0, 2000.0));
        assert!(!vp.intersects(0.0, 999.0));
        assert!(!vp.intersects(1721.0, 2500.0));
    }
}
