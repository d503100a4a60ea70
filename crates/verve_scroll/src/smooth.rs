//! Smooth scrolling
//!
//! The one-shot imperative "scroll to section" action behind the in-page
//! navigation anchors. A critically damped spring carries `scroll_y` to
//! the target so the section top lands on the viewport top without
//! overshoot. This action is the only programmatic mutator of scroll
//! position; a user scroll mid-flight cancels it.

use verve_animation::{Spring, SpringConfig};

use crate::viewport::Viewport;

/// Spring-driven scroll-to-anchor action
pub struct SmoothScroll {
    spring: Option<Spring>,
}

impl SmoothScroll {
    pub fn new() -> Self {
        Self { spring: None }
    }

    /// Begin scrolling so that `target_top` aligns with the viewport top
    ///
    /// The target is clamped to the scrollable range, so scrolling to the
    /// footer stops at the bottom of the document.
    pub fn scroll_to(&mut self, viewport: &Viewport, target_top: f32) {
        let target = target_top.clamp(0.0, viewport.max_scroll());
        let mut spring = Spring::new(SpringConfig::smooth_scroll(), viewport.scroll_y);
        spring.set_target(target);
        tracing::debug!(from = viewport.scroll_y, to = target, "smooth scroll started");
        self.spring = Some(spring);
    }

    /// Advance the scroll animation by `dt` seconds, writing the new
    /// position into the viewport
    ///
    /// Returns true while the animation is still in flight.
    pub fn tick(&mut self, viewport: &mut Viewport, dt: f32) -> bool {
        let Some(spring) = self.spring.as_mut() else {
            return false;
        };

        spring.step(dt);
        viewport.set_scroll(spring.value());

        if spring.is_settled() {
            viewport.set_scroll(spring.target());
            self.spring = None;
            return false;
        }
        true
    }

    /// Whether a scroll animation is in flight
    pub fn is_active(&self) -> bool {
        self.spring.is_some()
    }

    /// Cancel mid-flight (user grabbed the scroll wheel)
    pub fn cancel(&mut self) {
        self.spring = None;
    }
}

impl Default for SmoothScroll {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reaches_target_top() {
        let mut vp = Viewport::new(1280.0, 720.0, 5000.0);
        let mut smooth = SmoothScroll::new();
        smooth.scroll_to(&vp, 2200.0);

        let mut frames = 0;
        while smooth.tick(&mut vp, 1.0 / 60.0) {
            frames += 1;
            assert!(frames < 1200, "smooth scroll never settled");
        }

        // Section top aligned with viewport top, within a few pixels
        assert!((vp.scroll_y - 2200.0).abs() < 3.0);
        assert!(!smooth.is_active());
    }

    #[test]
    fn test_target_clamped_to_scrollable_range() {
        let mut vp = Viewport::new(1280.0, 720.0, 5000.0);
        let mut smooth = SmoothScroll::new();
        smooth.scroll_to(&vp, 9000.0);

        while smooth.tick(&mut vp, 1.0 / 60.0) {}
        assert!((vp.scroll_y - vp.max_scroll()).abs() < 3.0);
    }

    #[test]
    fn test_cancel_stops_motion() {
        let mut vp = Viewport::new(1280.0, 720.0, 5000.0);
        let mut smooth = SmoothScroll::new();
        smooth.scroll_to(&vp, 3000.0);

        smooth.tick(&mut vp, 1.0 / 60.0);
        let position = vp.scroll_y;
        smooth.cancel();

        assert!(!smooth.tick(&mut vp, 1.0 / 60.0));
        assert_eq!(vp.scroll_y, position);
    }
}
