//! Multi-property keyframe animations
//!
//! A [`MultiKeyframeAnimation`] animates a full visual property set
//! ([`KeyframeProperties`]) between keyframes over a fixed duration. This is
//! the unit a section's entrance descriptor compiles down to: one animation
//! per element, optionally delayed for stagger, replayable in both
//! directions.
//!
//! Direction matters: scroll triggers play the animation forward on enter
//! and reverse it on exit. Reversing does not snap - playback continues
//! from the current position, so an interrupted reverse followed by a
//! re-enter still settles at the final keyframe.

use crate::easing::Easing;
use verve_core::Vec2;

/// Playback direction for a keyframe animation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlayDirection {
    #[default]
    Forward,
    Reverse,
}

/// The animatable visual state of one element
///
/// Every field has a neutral default, so a keyframe always describes the
/// complete state - no per-property presence tracking.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeyframeProperties {
    /// Opacity in [0, 1]
    pub opacity: f32,
    /// Uniform scale, 1.0 = natural size
    pub scale: f32,
    /// Translation from layout position, px
    pub translate: Vec2,
    /// Rotation around the z axis, degrees
    pub rotation: f32,
    /// Rotation around the y axis, degrees (logo flip reveal)
    pub rotation_y: f32,
    /// Gaussian blur radius, px
    pub blur: f32,
}

impl Default for KeyframeProperties {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            scale: 1.0,
            translate: Vec2::ZERO,
            rotation: 0.0,
            rotation_y: 0.0,
            blur: 0.0,
        }
    }
}

impl KeyframeProperties {
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_translate(mut self, x: f32, y: f32) -> Self {
        self.translate = Vec2::new(x, y);
        self
    }

    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn with_rotation_y(mut self, degrees: f32) -> Self {
        self.rotation_y = degrees;
        self
    }

    pub fn with_blur(mut self, radius: f32) -> Self {
        self.blur = radius;
        self
    }

    /// Interpolate every property toward `other` by factor `t`
    pub fn lerp(&self, other: &KeyframeProperties, t: f32) -> KeyframeProperties {
        KeyframeProperties {
            opacity: self.opacity + (other.opacity - self.opacity) * t,
            scale: self.scale + (other.scale - self.scale) * t,
            translate: self.translate.lerp(other.translate, t),
            rotation: self.rotation + (other.rotation - self.rotation) * t,
            rotation_y: self.rotation_y + (other.rotation_y - self.rotation_y) * t,
            blur: self.blur + (other.blur - self.blur) * t,
        }
    }
}

/// One keyframe: a complete property set at a normalized time position
#[derive(Clone, Copy, Debug)]
pub struct MultiKeyframe {
    /// Time position in [0, 1]
    pub time: f32,
    /// Property values at this keyframe
    pub props: KeyframeProperties,
    /// Easing applied when transitioning TO this keyframe
    pub easing: Easing,
}

/// A timed, bidirectional animation over [`KeyframeProperties`]
#[derive(Clone, Debug)]
pub struct MultiKeyframeAnimation {
    duration_ms: u32,
    delay_ms: u32,
    /// Keyframes sorted by time
    keyframes: Vec<MultiKeyframe>,
    /// Playback clock in ms; runs from `-delay_ms` to `duration_ms`
    clock_ms: f32,
    direction: PlayDirection,
    playing: bool,
    /// Alternate direction forever instead of stopping at the ends
    yoyo: bool,
}

impl MultiKeyframeAnimation {
    pub fn new(duration_ms: u32) -> Self {
        Self {
            duration_ms,
            delay_ms: 0,
            keyframes: Vec::new(),
            clock_ms: 0.0,
            direction: PlayDirection::Forward,
            playing: false,
            yoyo: false,
        }
    }

    /// Add a keyframe (builder pattern); keyframes are kept sorted by time
    pub fn keyframe(mut self, time: f32, props: KeyframeProperties, easing: Easing) -> Self {
        self.keyframes.push(MultiKeyframe {
            time,
            props,
            easing,
        });
        self.keyframes.sort_by(|a, b| {
            a.time
                .partial_cmp(&b.time)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        self
    }

    /// Delay before forward playback begins (stagger slot), in ms
    pub fn delay(mut self, delay_ms: u32) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Alternate forward/reverse forever (continuous pulse/glow effects)
    pub fn repeat_yoyo(mut self) -> Self {
        self.yoyo = true;
        self
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    /// Play toward the final keyframe
    ///
    /// From rest at either end the animation restarts from the beginning,
    /// including its delay (a staggered group re-staggers on every replay).
    /// From a mid-flight position it resumes - this is what makes an
    /// interrupted reverse settle at the end state instead of a partial one.
    pub fn play_forward(&mut self) {
        let duration = self.duration_ms as f32;
        if self.clock_ms >= duration || self.clock_ms <= 0.0 {
            self.clock_ms = -(self.delay_ms as f32);
        }
        self.direction = PlayDirection::Forward;
        self.playing = true;
    }

    /// Play back toward the first keyframe from the current position
    ///
    /// The start delay is not replayed in reverse; the clock clamps at 0.
    pub fn play_reverse(&mut self) {
        self.direction = PlayDirection::Reverse;
        self.clock_ms = self.clock_ms.min(self.duration_ms as f32);
        self.playing = self.clock_ms > 0.0;
    }

    /// Start forward playback from the beginning
    pub fn start(&mut self) {
        self.clock_ms = -(self.delay_ms as f32);
        self.direction = PlayDirection::Forward;
        self.playing = true;
    }

    pub fn stop(&mut self) {
        self.playing = false;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn direction(&self) -> PlayDirection {
        self.direction
    }

    /// Whether playback has reached the final keyframe
    pub fn is_complete(&self) -> bool {
        self.clock_ms >= self.duration_ms as f32
    }

    /// Normalized progress in [0, 1]; delay time reports 0
    pub fn progress(&self) -> f32 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        (self.clock_ms.max(0.0) / self.duration_ms as f32).clamp(0.0, 1.0)
    }

    /// Advance the playback clock by `dt_ms` in the current direction
    pub fn tick(&mut self, dt_ms: f32) {
        if !self.playing {
            return;
        }

        let duration = self.duration_ms as f32;
        match self.direction {
            PlayDirection::Forward => {
                self.clock_ms += dt_ms;
                if self.clock_ms >= duration {
                    if self.yoyo {
                        self.clock_ms = duration - (self.clock_ms - duration);
                        self.direction = PlayDirection::Reverse;
                    } else {
                        self.clock_ms = duration;
                        self.playing = false;
                    }
                }
            }
            PlayDirection::Reverse => {
                self.clock_ms -= dt_ms;
                if self.clock_ms <= 0.0 {
                    if self.yoyo {
                        self.clock_ms = -self.clock_ms;
                        self.direction = PlayDirection::Forward;
                    } else {
                        self.clock_ms = 0.0;
                        self.playing = false;
                    }
                }
            }
        }
    }

    /// Current interpolated property set
    pub fn props(&self) -> KeyframeProperties {
        self.sample_at(self.progress())
    }

    /// Sample the property set at an arbitrary progress in [0, 1]
    pub fn sample_at(&self, progress: f32) -> KeyframeProperties {
        if self.keyframes.is_empty() {
            return KeyframeProperties::default();
        }

        let progress = progress.clamp(0.0, 1.0);

        let mut prev = &self.keyframes[0];
        let mut next = &self.keyframes[0];
        for kf in &self.keyframes {
            if kf.time <= progress {
                prev = kf;
            }
            if kf.time >= progress {
                next = kf;
                break;
            }
        }

        if (next.time - prev.time).abs() < f32::EPSILON {
            return prev.props;
        }

        let local = (progress - prev.time) / (next.time - prev.time);
        let eased = next.easing.apply(local);
        prev.props.lerp(&next.props, eased)
    }
}
