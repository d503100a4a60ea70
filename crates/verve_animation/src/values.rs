//! Animatable value types
//!
//! [`Interpolate`] marks values the engine can blend; the generic
//! [`TypedKeyframeAnimation`] animates any of them on its own clock. The
//! decorative effects use this for color pulses and vector paths, where
//! the scalar scheduler types don't fit.

use verve_core::{Color, Vec2, Vec3};

use crate::easing::Easing;

/// Values that can be linearly interpolated
pub trait Interpolate: Clone {
    /// Blend toward `other` by factor `t` in [0, 1]
    fn lerp(&self, other: &Self, t: f32) -> Self;

    /// Approximate equality, for settling checks
    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool;
}

impl Interpolate for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self - other).abs() < epsilon
    }
}

impl Interpolate for Vec2 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Vec2::lerp(*self, *other, t)
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self.x - other.x).abs() < epsilon && (self.y - other.y).abs() < epsilon
    }
}

impl Interpolate for Vec3 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Vec3::lerp(*self, *other, t)
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self.x - other.x).abs() < epsilon
            && (self.y - other.y).abs() < epsilon
            && (self.z - other.z).abs() < epsilon
    }
}

impl Interpolate for Color {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Color::lerp(self, other, t)
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self.r - other.r).abs() < epsilon
            && (self.g - other.g).abs() < epsilon
            && (self.b - other.b).abs() < epsilon
            && (self.a - other.a).abs() < epsilon
    }
}

/// A keyframe holding a value of type T
#[derive(Clone, Debug)]
pub struct TypedKeyframe<T: Interpolate> {
    /// Time position in [0, 1]
    pub time: f32,
    pub value: T,
    /// Easing applied when transitioning TO this keyframe
    pub easing: Easing,
}

/// A self-clocked keyframe animation over any interpolatable type
#[derive(Clone, Debug)]
pub struct TypedKeyframeAnimation<T: Interpolate> {
    duration_ms: u32,
    keyframes: Vec<TypedKeyframe<T>>,
    clock_ms: f32,
    playing: bool,
    looping: bool,
    /// Reverse on each loop instead of wrapping
    alternate: bool,
    reversed: bool,
}

impl<T: Interpolate> TypedKeyframeAnimation<T> {
    pub fn new(duration_ms: u32) -> Self {
        Self {
            duration_ms,
            keyframes: Vec::new(),
            clock_ms: 0.0,
            playing: false,
            looping: false,
            alternate: false,
            reversed: false,
        }
    }

    /// Add a keyframe (builder pattern); kept sorted by time
    pub fn keyframe(mut self, time: f32, value: T, easing: Easing) -> Self {
        self.keyframes.push(TypedKeyframe {
            time,
            value,
            easing,
        });
        self.keyframes.sort_by(|a, b| {
            a.time
                .partial_cmp(&b.time)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        self
    }

    /// Add a keyframe with linear easing
    pub fn at(self, time: f32, value: T) -> Self {
        self.keyframe(time, value, Easing::Linear)
    }

    pub fn looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Loop forever, reversing each cycle (the glow pulse shape)
    pub fn yoyo(mut self) -> Self {
        self.looping = true;
        self.alternate = true;
        self
    }

    pub fn start(&mut self) {
        self.clock_ms = 0.0;
        self.reversed = false;
        self.playing = true;
    }

    pub fn stop(&mut self) {
        self.playing = false;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn progress(&self) -> f32 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        (self.clock_ms / self.duration_ms as f32).clamp(0.0, 1.0)
    }

    /// Advance by `dt_ms`
    pub fn tick(&mut self, dt_ms: f32) {
        if !self.playing {
            return;
        }

        let duration = self.duration_ms as f32;
        if self.reversed {
            self.clock_ms -= dt_ms;
            if self.clock_ms <= 0.0 {
                if self.looping && self.alternate {
                    self.clock_ms = -self.clock_ms;
                    self.reversed = false;
                } else {
                    self.clock_ms = 0.0;
                    self.playing = false;
                }
            }
        } else {
            self.clock_ms += dt_ms;
            if self.clock_ms >= duration {
                if self.looping {
                    if self.alternate {
                        self.clock_ms = duration - (self.clock_ms - duration);
                        self.reversed = true;
                    } else {
                        self.clock_ms %= duration.max(1.0);
                    }
                } else {
                    self.clock_ms = duration;
                    self.playing = false;
                }
            }
        }
    }

    /// Current interpolated value, or `None` with no keyframes
    pub fn value(&self) -> Option<T> {
        self.sample_at(self.progress())
    }

    /// Sample at an arbitrary progress in [0, 1]
    pub fn sample_at(&self, progress: f32) -> Option<T> {
        if self.keyframes.is_empty() {
            return None;
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
            return Some(prev.value.clone());
        }

        let local = (progress - prev.time) / (next.time - prev.time);
        let eased = next.easing.apply(local);
        Some(prev.value.lerp(&next.value, eased))
    }
}

/// Keyframe animation over f32
pub type FloatAnimation = TypedKeyframeAnimation<f32>;

/// Keyframe animation over positions
pub type Vec2Animation = TypedKeyframeAnimation<Vec2>;

/// Keyframe animation over colors (glow pulses)
pub type ColorAnimation = TypedKeyframeAnimation<Color>;
