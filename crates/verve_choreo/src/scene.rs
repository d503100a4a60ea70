//! Scene driver
//!
//! Per-frame transforms for the decorative 3D primitives and the wandering
//! blobs, computed as pure functions of elapsed time and scroll fraction.
//! Nothing here owns state between frames: the renderer keeps the object
//! transforms, and two calls with identical inputs produce identical
//! outputs.

use verve_core::{lerp, Size, Vec2, Vec3};

/// A transform the renderer writes onto one of its objects
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SceneTransform {
    /// Position offset from the object's base placement
    pub position: Vec3,
    /// Euler rotation, radians
    pub rotation: Vec3,
}

/// Transform for a floating orb in the hero background
///
/// Slow sinusoidal tumble plus a gentle vertical bob around `base`.
pub fn orb_transform(t: f32, base: Vec3) -> SceneTransform {
    SceneTransform {
        position: Vec3::new(base.x, base.y + (t).sin() * 0.1, base.z),
        rotation: Vec3::new((t).sin() * 0.3, (t * 0.5).sin() * 0.2, 0.0),
    }
}

/// Transform for the floating robot
///
/// Bobs on a 2x clock, wobbles its yaw on a half clock, and slides across
/// the scene from x=-4 to x=4 as the page scrolls.
pub fn robot_transform(t: f32, scroll_fraction: f32) -> SceneTransform {
    SceneTransform {
        position: Vec3::new(
            lerp(-4.0, 4.0, scroll_fraction.clamp(0.0, 1.0)),
            (t * 2.0).sin() * 0.2,
            0.0,
        ),
        rotation: Vec3::new(0.0, (t * 0.5).sin() * 0.1, 0.0),
    }
}

/// Rotation for the background particle field, radians
pub fn particle_field_rotation(t: f32) -> Vec2 {
    Vec2::new(t * 0.02, t * 0.03)
}

/// Position of a wandering blob as a function of scroll progress
///
/// Blends a linear descent with two sinusoids at different frequencies,
/// phase-shifted per blob by `path_offset`, so the blobs trace distinct
/// Lissajous-like paths bounded by the viewport:
///
/// - x = w * (0.1 + off * 0.2 + sin(p * 3pi + phi) * 0.4)
/// - y = h * (0.2 + off * 0.3 + p * 0.6 + cos(p * 2pi + phi) * 0.15)
///
/// where phi = off * 2pi.
pub fn wander_position(progress: f32, path_offset: f32, viewport: Size) -> Vec2 {
    let phase = path_offset * std::f32::consts::TAU;
    let x = viewport.width
        * (0.1
            + path_offset * 0.2
            + (progress * std::f32::consts::PI * 3.0 + phase).sin() * 0.4);
    let y = viewport.height
        * (0.2
            + path_offset * 0.3
            + progress * 0.6
            + (progress * std::f32::consts::TAU + phase).cos() * 0.15);
    Vec2::new(x, y)
}

/// Opacity wave paired with [`wander_position`]
pub fn wander_opacity(progress: f32, path_offset: f32) -> f32 {
    let phase = path_offset * std::f32::consts::TAU;
    (0.4 - path_offset * 0.1) + (progress * std::f32::consts::TAU + phase).sin() * 0.3
}

/// Resting placement of a blob before any scroll happens
pub fn wander_rest_position(path_offset: f32, viewport: Size) -> Vec2 {
    Vec2::new(
        viewport.width * (0.1 + path_offset * 0.3),
        viewport.height * (0.2 + path_offset * 0.4),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transforms_are_deterministic() {
        let a = robot_transform(12.75, 0.4);
        let b = robot_transform(12.75, 0.4);
        assert_eq!(a, b);

        let size = Size::new(1280.0, 720.0);
        assert_eq!(wander_position(0.3, 0.6, size), wander_position(0.3, 0.6, size));
        assert_eq!(orb_transform(3.0, Vec3::new(2.0, 0.0, 0.0)), orb_transform(3.0, Vec3::new(2.0, 0.0, 0.0)));
    }

    #[test]
    fn test_robot_slides_with_scroll() {
        let top = robot_transform(0.0, 0.0);
        let bottom = robot_transform(0.0, 1.0);
        assert_eq!(top.position.x, -4.0);
        assert_eq!(bottom.position.x, 4.0);

        // Out-of-range fractions clamp
        assert_eq!(robot_transform(0.0, 2.0).position.x, 4.0);
    }

    #[test]
    fn test_robot_bob_is_bounded() {
        for i in 0..200 {
            let t = i as f32 * 0.1;
            let transform = robot_transform(t, 0.5);
            assert!(transform.position.y.abs() <= 0.2 + 1e-5);
            assert!(transform.rotation.y.abs() <= 0.1 + 1e-5);
        }
    }

    #[test]
    fn test_wander_paths_do_not_collide() {
        // Three blobs with the original path offsets; distinct phases keep
        // them apart along the whole scroll range
        let size = Size::new(1280.0, 720.0);
        let offsets = [0.0, 0.3, 0.6];
        for i in 0..=100 {
            let p = i as f32 / 100.0;
            let positions: Vec<Vec2> = offsets
                .iter()
                .map(|&off| wander_position(p, off, size))
                .collect();
            for a in 0..positions.len() {
                for b in (a + 1)..positions.len() {
                    assert!(
                        positions[a].distance(positions[b]) > 1.0,
                        "blobs {a} and {b} collided at p={p}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_wander_stays_near_viewport() {
        let size = Size::new(1280.0, 720.0);
        for i in 0..=100 {
            let p = i as f32 / 100.0;
            for off in [0.0, 0.3, 0.6] {
                let pos = wander_position(p, off, size);
                assert!(pos.x >= -size.width * 0.5 && pos.x <= size.width * 1.5);
                assert!(pos.y >= -size.height * 0.5 && pos.y <= size.height * 2.0);
            }
        }
    }
}
