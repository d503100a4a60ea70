//! Easing functions
//!
//! Maps linear progress in [0, 1] to eased progress. The set mirrors what
//! the site choreography actually uses: the quadratic family for most
//! entrances, an overshooting back-out for logo/button pops, and a bounce
//! for playful drops.

/// An easing curve applied to normalized animation progress
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Easing {
    #[default]
    Linear,
    /// Quadratic accelerate-in
    EaseIn,
    /// Quadratic decelerate-out
    EaseOut,
    /// Quadratic accelerate then decelerate
    EaseInOut,
    /// Cubic accelerate-in
    CubicIn,
    /// Cubic decelerate-out
    CubicOut,
    /// Overshoot past the target then settle back
    ///
    /// The overshoot factor controls how far past 1.0 the curve swings;
    /// 1.7 matches the logo/CTA pop used throughout the site.
    BackOut(f32),
    /// Bouncing settle at the target
    BounceOut,
}

impl Easing {
    /// Apply the curve to linear progress `t`
    ///
    /// Input is clamped to [0, 1]. Output may exceed 1.0 for overshooting
    /// curves (`BackOut`).
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => t * (2.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Easing::CubicIn => t * t * t,
            Easing::CubicOut => {
                let u = t - 1.0;
                u * u * u + 1.0
            }
            Easing::BackOut(overshoot) => {
                let c1 = *overshoot;
                let c3 = c1 + 1.0;
                let u = t - 1.0;
                1.0 + c3 * u * u * u + c1 * u * u
            }
            Easing::BounceOut => bounce_out(t),
        }
    }

    /// The standard overshoot used by the logo and CTA pops
    pub fn back_out() -> Self {
        Easing::BackOut(1.7)
    }
}

fn bounce_out(t: f32) -> f32 {
    const N1: f32 = 7.5625;
    const D1: f32 = 2.75;

    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        let u = t - 1.5 / D1;
        N1 * u * u + 0.75
    } else if t < 2.5 / D1 {
        let u = t - 2.25 / D1;
        N1 * u * u + 0.9375
    } else {
        let u = t - 2.625 / D1;
        N1 * u * u + 0.984375
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_fixed() {
        let curves = [
            Easing::Linear,
            Easing::EaseIn,
            Easing::EaseOut,
            Easing::EaseInOut,
            Easing::CubicIn,
            Easing::CubicOut,
            Easing::back_out(),
            Easing::BounceOut,
        ];
        for easing in curves {
            assert!((easing.apply(0.0)).abs() < 1e-5, "{easing:?} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-5, "{easing:?} at 1");
        }
    }

    #[test]
    fn test_input_clamped() {
        assert_eq!(Easing::EaseOut.apply(-0.5), 0.0);
        assert_eq!(Easing::EaseOut.apply(1.5), 1.0);
    }

    #[test]
    fn test_back_out_overshoots() {
        // Somewhere in the second half the curve must exceed 1.0
        let max = (50..100)
            .map(|i| Easing::back_out().apply(i as f32 / 100.0))
            .fold(f32::MIN, f32::max);
        assert!(max > 1.0);
    }

    #[test]
    fn test_ease_out_decelerates() {
        // First half covers more ground than the second half
        let first = Easing::EaseOut.apply(0.5);
        assert!(first > 0.5);
    }
}
