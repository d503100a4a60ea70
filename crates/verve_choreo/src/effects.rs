//! Decorative effects
//!
//! Purely cosmetic subsystems - the custom cursor, the wandering energy
//! blobs with their particle trails, and the 3D scenes - behind one
//! [`DecorativeEffect`] capability. Each is independently constructible
//! and disposable, so a reduced-motion or low-power context omits them
//! without touching navigation or content logic. A stopped effect ignores
//! updates; dropping one releases whatever it registered.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use verve_animation::{
    AnimatedKeyframe, AnimatedTimeline, AnimatedValue, ColorAnimation, Easing, SchedulerHandle,
    SpringConfig, TimelineEntryId,
};
use verve_core::{Color, Size, Vec2};
use verve_scroll::Viewport;

use crate::descriptor::AnimationDescriptor;
use crate::scene::{
    self, orb_transform, particle_field_rotation, robot_transform, SceneTransform,
};

/// Why a decorative effect could not be constructed
///
/// Never fatal: the caller logs it and runs without the effect.
#[derive(Error, Debug)]
pub enum EffectError {
    /// The renderer refused to create a canvas
    #[error("canvas initialization failed: {0}")]
    CanvasInit(String),
}

/// Per-frame input for effect updates
#[derive(Clone, Copy, Debug)]
pub struct EffectContext {
    /// Seconds since the previous frame
    pub dt: f32,
    /// Seconds since the page mounted
    pub elapsed: f32,
    /// Current viewport state
    pub viewport: Viewport,
}

/// A cosmetic subsystem that can be started, stopped, and dropped freely
pub trait DecorativeEffect {
    fn start(&mut self);
    fn stop(&mut self);
    fn is_running(&self) -> bool;

    /// Advance the effect by one frame; no-op while stopped
    fn update(&mut self, ctx: &EffectContext);
}

// ============================================================================
// Custom cursor
// ============================================================================

/// The two-ring custom cursor: a stiff dot and a lagging follower
///
/// Both rings spring-chase the pointer; hovering an interactive element
/// swells them to 1.5x.
pub struct CursorEffect {
    dot_x: AnimatedValue,
    dot_y: AnimatedValue,
    follower_x: AnimatedValue,
    follower_y: AnimatedValue,
    scale: AnimatedValue,
    running: bool,
}

impl CursorEffect {
    pub fn new(scheduler: SchedulerHandle) -> Self {
        Self {
            dot_x: AnimatedValue::new(scheduler.clone(), 0.0, SpringConfig::cursor_dot()),
            dot_y: AnimatedValue::new(scheduler.clone(), 0.0, SpringConfig::cursor_dot()),
            follower_x: AnimatedValue::new(scheduler.clone(), 0.0, SpringConfig::cursor_follower()),
            follower_y: AnimatedValue::new(scheduler.clone(), 0.0, SpringConfig::cursor_follower()),
            scale: AnimatedValue::new(scheduler, 1.0, SpringConfig::cursor_follower()),
            running: false,
        }
    }

    /// Pointer moved; both rings re-target
    pub fn pointer_moved(&mut self, position: Vec2) {
        if !self.running {
            return;
        }
        self.dot_x.set_target(position.x);
        self.dot_y.set_target(position.y);
        self.follower_x.set_target(position.x);
        self.follower_y.set_target(position.y);
    }

    /// Pointer entered or left an interactive element
    pub fn set_hovering(&mut self, hovering: bool) {
        if !self.running {
            return;
        }
        self.scale.set_target(if hovering { 1.5 } else { 1.0 });
    }

    pub fn dot_position(&self) -> Vec2 {
        Vec2::new(self.dot_x.get(), self.dot_y.get())
    }

    pub fn follower_position(&self) -> Vec2 {
        Vec2::new(self.follower_x.get(), self.follower_y.get())
    }

    pub fn scale(&self) -> f32 {
        self.scale.get()
    }
}

impl DecorativeEffect for CursorEffect {
    fn start(&mut self) {
        self.running = true;
    }

    fn stop(&mut self) {
        self.running = false;
        // Park the rings where they are; springs deregister
        let dot = self.dot_position();
        let follower = self.follower_position();
        self.dot_x.set_immediate(dot.x);
        self.dot_y.set_immediate(dot.y);
        self.follower_x.set_immediate(follower.x);
        self.follower_y.set_immediate(follower.y);
        self.scale.set_immediate(1.0);
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn update(&mut self, _ctx: &EffectContext) {
        // Springs advance inside the scheduler; nothing to do per frame
    }
}

// ============================================================================
// Energy blobs
// ============================================================================

/// Static configuration for one wandering blob
#[derive(Clone, Copy, Debug)]
pub struct BlobConfig {
    /// Relative size multiplier
    pub size: f32,
    /// Spin speed multiplier
    pub speed: f32,
    /// Phase offset along the shared wander path, in [0, 1)
    pub path_offset: f32,
    /// Glow color
    pub color: Color,
}

impl BlobConfig {
    /// The three blobs the site ships: large cyan, medium purple, small pink
    pub fn default_trio() -> [BlobConfig; 3] {
        [
            BlobConfig {
                size: 1.0,
                speed: 1.0,
                path_offset: 0.0,
                color: Color::from_rgb8(0, 206, 209),
            },
            BlobConfig {
                size: 0.6,
                speed: 0.7,
                path_offset: 0.3,
                color: Color::from_rgb8(153, 50, 204),
            },
            BlobConfig {
                size: 0.8,
                speed: 1.2,
                path_offset: 0.6,
                color: Color::from_rgb8(255, 105, 180),
            },
        ]
    }
}

/// A short-lived trail particle shed by a blob
///
/// Appends itself to the active list on spawn and expires on its own once
/// its fade-out completes. The list has no cap; rapid scrolling grows it
/// transiently and expiry shrinks it back.
#[derive(Clone, Copy, Debug)]
pub struct TrailParticle {
    pub position: Vec2,
    /// Where the particle drifts as it fades
    pub drift: Vec2,
    pub size: f32,
    pub color: Color,
    pub age: f32,
    pub lifetime: f32,
}

impl TrailParticle {
    /// Fade progress in [0, 1]
    pub fn fade(&self) -> f32 {
        (self.age / self.lifetime).clamp(0.0, 1.0)
    }

    pub fn opacity(&self) -> f32 {
        1.0 - Easing::EaseOut.apply(self.fade())
    }
}

struct BlobState {
    config: BlobConfig,
    rotation: AnimatedTimeline,
    rotation_entry: Option<TimelineEntryId>,
    pulse: AnimatedKeyframe,
    glow: ColorAnimation,
    position: Vec2,
    opacity: f32,
}

/// Three glowing blobs wandering Lissajous-like paths as the page scrolls,
/// shedding self-expiring trail particles
pub struct EnergyBlobEffect {
    blobs: Vec<BlobState>,
    particles: Vec<TrailParticle>,
    rng: SmallRng,
    last_progress: Option<f32>,
    running: bool,
}

impl EnergyBlobEffect {
    /// Build the default trio; `seed` makes particle jitter reproducible
    pub fn new(scheduler: SchedulerHandle, seed: u64) -> Self {
        Self::with_blobs(scheduler, &BlobConfig::default_trio(), seed)
    }

    pub fn with_blobs(scheduler: SchedulerHandle, configs: &[BlobConfig], seed: u64) -> Self {
        let blobs = configs
            .iter()
            .enumerate()
            .map(|(i, &config)| {
                // Continuous spin, one revolution per 20s scaled by speed
                let mut rotation = AnimatedTimeline::new(scheduler.clone());
                let duration = (20_000.0 / config.speed) as u32;
                let rotation_entry = rotation.add(0, duration, 0.0, 360.0);
                rotation.set_loop(-1);

                // Phase-staggered breathing between 0.8x and 1.2x of base size
                let pulse = AnimationDescriptor::new(
                    verve_animation::KeyframeProperties::default().with_scale(0.8 * config.size),
                    verve_animation::KeyframeProperties::default().with_scale(1.2 * config.size),
                    (3 + i as u32) * 1000,
                    Easing::EaseInOut,
                )
                .with_delay(i as u32 * 500)
                .with_yoyo();
                let pulse = AnimatedKeyframe::register(scheduler.clone(), pulse.compile(0));

                // Glow pulse between dim and bright ends of the blob color
                let glow = ColorAnimation::new(2000 + i as u32 * 400)
                    .at(0.0, config.color.with_alpha(0.3))
                    .at(1.0, config.color.with_alpha(0.8))
                    .yoyo();

                BlobState {
                    config,
                    rotation,
                    rotation_entry,
                    pulse,
                    glow,
                    position: Vec2::ZERO,
                    opacity: 0.7 - config.path_offset * 0.2,
                }
            })
            .collect();

        Self {
            blobs,
            particles: Vec::new(),
            rng: SmallRng::seed_from_u64(seed),
            last_progress: None,
            running: false,
        }
    }

    pub fn blob_count(&self) -> usize {
        self.blobs.len()
    }

    pub fn blob_position(&self, index: usize) -> Option<Vec2> {
        self.blobs.get(index).map(|b| b.position)
    }

    pub fn blob_opacity(&self, index: usize) -> Option<f32> {
        self.blobs.get(index).map(|b| b.opacity)
    }

    pub fn blob_scale(&self, index: usize) -> Option<f32> {
        self.blobs
            .get(index)
            .and_then(|b| b.pulse.props())
            .map(|p| p.scale)
    }

    pub fn blob_rotation(&self, index: usize) -> Option<f32> {
        let blob = self.blobs.get(index)?;
        blob.rotation.value(blob.rotation_entry?)
    }

    pub fn blob_glow(&self, index: usize) -> Option<Color> {
        self.blobs.get(index).and_then(|b| b.glow.value())
    }

    /// Currently-alive trail particles
    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn particles(&self) -> &[TrailParticle] {
        &self.particles
    }

    fn spawn_trails(&mut self) {
        // Most scroll ticks shed nothing; occasionally a subset of blobs
        // each sheds one particle
        if self.rng.gen::<f32>() <= 0.85 {
            return;
        }

        for blob in &self.blobs {
            if self.rng.gen::<f32>() <= 0.7 {
                continue;
            }
            let drift = Vec2::new(
                (self.rng.gen::<f32>() - 0.5) * 50.0,
                (self.rng.gen::<f32>() - 0.5) * 50.0,
            );
            self.particles.push(TrailParticle {
                position: blob.position,
                drift,
                size: 2.0 + self.rng.gen::<f32>() * 4.0,
                color: blob.config.color,
                age: 0.0,
                lifetime: 1.0 + self.rng.gen::<f32>(),
            });
        }
    }
}

impl DecorativeEffect for EnergyBlobEffect {
    fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        for blob in &mut self.blobs {
            blob.rotation.start();
            blob.pulse.start();
            blob.glow.start();
        }
    }

    fn stop(&mut self) {
        self.running = false;
        for blob in &mut self.blobs {
            blob.rotation.stop();
            blob.pulse.stop();
            blob.glow.stop();
        }
        self.particles.clear();
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn update(&mut self, ctx: &EffectContext) {
        if !self.running {
            return;
        }

        let size = Size::new(ctx.viewport.width, ctx.viewport.height);
        let progress = ctx.viewport.scroll_fraction();
        let scrolled = self
            .last_progress
            .map_or(false, |p| (p - progress).abs() > f32::EPSILON);
        let first_update = self.last_progress.is_none();
        self.last_progress = Some(progress);

        for blob in &mut self.blobs {
            blob.glow.tick(ctx.dt * 1000.0);

            if first_update && progress <= 0.0 {
                blob.position = scene::wander_rest_position(blob.config.path_offset, size);
            } else {
                blob.position = scene::wander_position(progress, blob.config.path_offset, size);
                blob.opacity = scene::wander_opacity(progress, blob.config.path_offset);
            }
        }

        // Trails shed only while the page is actually scrolling
        if scrolled {
            self.spawn_trails();
        }

        // Age and self-remove expired particles
        let dt = ctx.dt;
        for particle in &mut self.particles {
            particle.age += dt;
            let fade = particle.fade();
            particle.position = particle.position + particle.drift * (fade * dt);
        }
        self.particles.retain(|p| p.age < p.lifetime);
    }
}

// ============================================================================
// Hero 3D scene (orbs + particle field)
// ============================================================================

/// Placement of one floating orb
#[derive(Clone, Copy, Debug)]
pub struct OrbConfig {
    pub base: verve_core::Vec3,
    pub color: Color,
    pub scale: f32,
}

impl OrbConfig {
    /// The hero background trio: central cyan, far purple, low pink
    pub fn default_trio() -> [OrbConfig; 3] {
        [
            OrbConfig {
                base: verve_core::Vec3::new(2.0, 0.0, 0.0),
                color: Color::from_rgb8(0, 206, 209),
                scale: 0.8,
            },
            OrbConfig {
                base: verve_core::Vec3::new(-3.0, 1.0, -2.0),
                color: Color::from_rgb8(153, 50, 204),
                scale: 0.5,
            },
            OrbConfig {
                base: verve_core::Vec3::new(1.0, -2.0, -1.0),
                color: Color::from_rgb8(255, 105, 180),
                scale: 0.3,
            },
        ]
    }
}

/// The hero background: three floating orbs and a slowly tumbling
/// particle field, all pure functions of elapsed time
pub struct HeroSceneEffect {
    orbs: Vec<OrbConfig>,
    elapsed: f32,
    running: bool,
}

impl HeroSceneEffect {
    /// Construct against the current viewport
    ///
    /// Fails like a renderer would when asked for a zero-area canvas; the
    /// caller logs and runs without the scene.
    pub fn try_new(viewport: &Viewport) -> Result<Self, EffectError> {
        if viewport.width <= 0.0 || viewport.height <= 0.0 {
            return Err(EffectError::CanvasInit(format!(
                "zero-area canvas {}x{}",
                viewport.width, viewport.height
            )));
        }
        Ok(Self {
            orbs: OrbConfig::default_trio().to_vec(),
            elapsed: 0.0,
            running: false,
        })
    }

    pub fn orb_count(&self) -> usize {
        self.orbs.len()
    }

    /// Transform for orb `index` at the last updated time
    pub fn orb(&self, index: usize) -> Option<SceneTransform> {
        self.orbs.get(index).map(|o| orb_transform(self.elapsed, o.base))
    }

    /// Rotation of the particle field at the last updated time
    pub fn field_rotation(&self) -> Vec2 {
        particle_field_rotation(self.elapsed)
    }
}

impl DecorativeEffect for HeroSceneEffect {
    fn start(&mut self) {
        self.running = true;
    }

    fn stop(&mut self) {
        self.running = false;
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn update(&mut self, ctx: &EffectContext) {
        if self.running {
            self.elapsed = ctx.elapsed;
        }
    }
}

// ============================================================================
// Floating robot
// ============================================================================

/// The scroll-surfing robot in its own corner canvas
pub struct RobotEffect {
    elapsed: f32,
    scroll_fraction: f32,
    running: bool,
}

impl RobotEffect {
    /// Construct against the current viewport; same failure contract as
    /// [`HeroSceneEffect::try_new`]
    pub fn try_new(viewport: &Viewport) -> Result<Self, EffectError> {
        if viewport.width <= 0.0 || viewport.height <= 0.0 {
            return Err(EffectError::CanvasInit(format!(
                "zero-area canvas {}x{}",
                viewport.width, viewport.height
            )));
        }
        Ok(Self {
            elapsed: 0.0,
            scroll_fraction: 0.0,
            running: false,
        })
    }

    /// The robot's transform at the last updated frame
    pub fn transform(&self) -> SceneTransform {
        robot_transform(self.elapsed, self.scroll_fraction)
    }
}

impl DecorativeEffect for RobotEffect {
    fn start(&mut self) {
        self.running = true;
    }

    fn stop(&mut self) {
        self.running = false;
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn update(&mut self, ctx: &EffectContext) {
        if self.running {
            self.elapsed = ctx.elapsed;
            self.scroll_fraction = ctx.viewport.scroll_fraction();
        }
    }
}
