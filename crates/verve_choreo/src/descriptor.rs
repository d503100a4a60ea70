//! Animation descriptors
//!
//! An [`AnimationDescriptor`] is the immutable value object a section hands
//! to its choreographer: start state, end state, duration, easing, and the
//! optional delay/stagger/yoyo modifiers. The choreographer compiles one
//! [`MultiKeyframeAnimation`] per target element from it; the descriptor
//! itself is never consumed or mutated.
//!
//! The named constructors are the transition shapes that recur across the
//! site - the same handful of fromTo pairs every section was hand-rolling.

use verve_animation::{Easing, KeyframeProperties, MultiKeyframeAnimation};

/// One declarative transition: from state, to state, timing
#[derive(Clone, Debug)]
pub struct AnimationDescriptor {
    from: KeyframeProperties,
    to: KeyframeProperties,
    duration_ms: u32,
    easing: Easing,
    delay_ms: u32,
    stagger_ms: u32,
    yoyo: bool,
}

impl AnimationDescriptor {
    pub fn new(
        from: KeyframeProperties,
        to: KeyframeProperties,
        duration_ms: u32,
        easing: Easing,
    ) -> Self {
        Self {
            from,
            to,
            duration_ms,
            easing,
            delay_ms: 0,
            stagger_ms: 0,
            yoyo: false,
        }
    }

    // ========================================================================
    // Recurring transition shapes
    // ========================================================================

    /// Plain opacity fade
    pub fn fade_in(duration_ms: u32) -> Self {
        Self::new(
            KeyframeProperties::default().with_opacity(0.0),
            KeyframeProperties::default(),
            duration_ms,
            Easing::EaseOut,
        )
    }

    /// Rise while fading in: the default section-title entrance
    pub fn fade_up(duration_ms: u32, distance: f32) -> Self {
        Self::new(
            KeyframeProperties::default()
                .with_opacity(0.0)
                .with_translate(0.0, distance),
            KeyframeProperties::default(),
            duration_ms,
            Easing::EaseOut,
        )
    }

    /// Blur-to-clear rise: the hero headline entrance
    pub fn blur_up(duration_ms: u32, distance: f32, blur: f32) -> Self {
        Self::new(
            KeyframeProperties::default()
                .with_opacity(0.0)
                .with_translate(0.0, distance)
                .with_scale(0.9)
                .with_blur(blur),
            KeyframeProperties::default(),
            duration_ms,
            Easing::EaseOut,
        )
    }

    /// Slide in from the left while fading: form rows
    pub fn slide_in_left(duration_ms: u32, distance: f32) -> Self {
        Self::new(
            KeyframeProperties::default()
                .with_opacity(0.0)
                .with_translate(-distance, 0.0),
            KeyframeProperties::default(),
            duration_ms,
            Easing::EaseOut,
        )
    }

    /// Drop in from above while fading: the navigation bar
    pub fn drop_in(duration_ms: u32, distance: f32) -> Self {
        Self::new(
            KeyframeProperties::default()
                .with_opacity(0.0)
                .with_translate(0.0, -distance),
            KeyframeProperties::default(),
            duration_ms,
            Easing::EaseOut,
        )
    }

    /// Grow from slightly shrunken with a small rise: project cards
    pub fn scale_in(duration_ms: u32) -> Self {
        Self::new(
            KeyframeProperties::default()
                .with_opacity(0.0)
                .with_scale(0.8)
                .with_translate(0.0, 20.0),
            KeyframeProperties::default(),
            duration_ms,
            Easing::EaseOut,
        )
    }

    /// Overshooting pop: call-to-action buttons
    pub fn pop_in(duration_ms: u32) -> Self {
        Self::new(
            KeyframeProperties::default()
                .with_opacity(0.0)
                .with_scale(0.8)
                .with_translate(0.0, 20.0),
            KeyframeProperties::default(),
            duration_ms,
            Easing::back_out(),
        )
    }

    /// Endless breathing scale: CTA/submit emphasis
    ///
    /// Continuous by construction - the yoyo flag is already set.
    pub fn pulse(duration_ms: u32, peak_scale: f32) -> Self {
        Self::new(
            KeyframeProperties::default(),
            KeyframeProperties::default().with_scale(peak_scale),
            duration_ms,
            Easing::EaseInOut,
        )
        .with_yoyo()
    }

    // ========================================================================
    // Modifiers (builder-style, used at construction only)
    // ========================================================================

    /// Delay before the animation starts, ms
    pub fn with_delay(mut self, delay_ms: u32) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Extra delay per element when applied to a group, ms
    pub fn with_stagger(mut self, stagger_ms: u32) -> Self {
        self.stagger_ms = stagger_ms;
        self
    }

    /// Repeat forever, alternating direction
    pub fn with_yoyo(mut self) -> Self {
        self.yoyo = true;
        self
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    pub fn stagger_ms(&self) -> u32 {
        self.stagger_ms
    }

    pub fn is_yoyo(&self) -> bool {
        self.yoyo
    }

    pub fn from(&self) -> &KeyframeProperties {
        &self.from
    }

    pub fn to(&self) -> &KeyframeProperties {
        &self.to
    }

    /// Longest possible wall time for a group of `count` staggered elements
    ///
    /// delay + stagger x (count - 1) + duration; the timing bound the
    /// end-to-end tests assert against.
    pub fn total_duration_ms(&self, count: usize) -> u32 {
        self.delay_ms + self.stagger_ms * count.saturating_sub(1) as u32 + self.duration_ms
    }

    /// Compile into a playable animation for the element at `index` within
    /// its group (index drives the stagger slot)
    pub fn compile(&self, index: usize) -> MultiKeyframeAnimation {
        let mut animation = MultiKeyframeAnimation::new(self.duration_ms)
            .keyframe(0.0, self.from, Easing::Linear)
            .keyframe(1.0, self.to, self.easing)
            .delay(self.delay_ms + self.stagger_ms * index as u32);
        if self.yoyo {
            animation = animation.repeat_yoyo();
        }
        animation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_respects_stagger_order() {
        let descriptor = AnimationDescriptor::scale_in(600).with_stagger(200);
        let first = descriptor.compile(0);
        let third = descriptor.compile(2);
        assert_eq!(first.delay_ms(), 0);
        assert_eq!(third.delay_ms(), 400);
    }

    #[test]
    fn test_total_duration_bound() {
        // First-card delay + per-card stagger x count + one card's duration
        let descriptor = AnimationDescriptor::scale_in(600)
            .with_delay(100)
            .with_stagger(200);
        assert_eq!(descriptor.total_duration_ms(4), 100 + 3 * 200 + 600);
        assert_eq!(descriptor.total_duration_ms(1), 700);
        assert_eq!(descriptor.total_duration_ms(0), 700);
    }

    #[test]
    fn test_descriptor_is_reusable() {
        let descriptor = AnimationDescriptor::fade_up(800, 50.0);
        let a = descriptor.compile(0);
        let b = descriptor.compile(0);
        assert_eq!(a.sample_at(0.5).opacity, b.sample_at(0.5).opacity);
    }

    #[test]
    fn test_pulse_compiles_continuous() {
        let mut animation = AnimationDescriptor::pulse(2000, 1.05).compile(0);
        animation.start();
        animation.tick(5000.0);
        assert!(animation.is_playing());
    }
}
