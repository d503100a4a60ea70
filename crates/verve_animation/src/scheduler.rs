//! Animation scheduler
//!
//! Owns every active animation and advances them all from one explicit
//! clock. The page's frame loop calls [`AnimationScheduler::advance`] once
//! per cooperative tick; nothing here spawns threads or reads wall time,
//! which keeps playback deterministic under test.
//!
//! Components never hold the scheduler directly. They hold a weak
//! [`SchedulerHandle`] and wrapper types - [`AnimatedValue`],
//! [`AnimatedKeyframe`], [`AnimatedTimeline`] - that register on creation
//! and deregister on `Drop`. Dropping a choreographer therefore removes
//! every animation it created; the count accessors exist so tests can
//! assert exactly that.

use slotmap::{new_key_type, SlotMap};
use std::sync::{Arc, Mutex, Weak};

use crate::keyframe::{KeyframeProperties, MultiKeyframeAnimation};
use crate::spring::{Spring, SpringConfig};
use crate::timeline::{Timeline, TimelineEntryId};

new_key_type! {
    /// Handle to a registered spring
    pub struct SpringId;
    /// Handle to a registered keyframe animation
    pub struct KeyframeId;
    /// Handle to a registered timeline
    pub struct TimelineId;
}

struct SchedulerInner {
    springs: SlotMap<SpringId, Spring>,
    keyframes: SlotMap<KeyframeId, MultiKeyframeAnimation>,
    timelines: SlotMap<TimelineId, Timeline>,
}

/// The scheduler that ticks all active animations
///
/// Animations are registered implicitly when wrapper types are created and
/// removed when they drop; the scheduler never garbage-collects on its own,
/// so a completed animation can be restarted.
pub struct AnimationScheduler {
    inner: Arc<Mutex<SchedulerInner>>,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(SchedulerInner {
                springs: SlotMap::with_key(),
                keyframes: SlotMap::with_key(),
                timelines: SlotMap::with_key(),
            })),
        }
    }

    /// Get a weak handle for components to register animations through
    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Advance every animation by `dt` seconds
    ///
    /// Returns true if any animation is still active and needs another
    /// frame.
    pub fn advance(&self, dt: f32) -> bool {
        let dt_ms = dt * 1000.0;
        let mut inner = self.inner.lock().unwrap();

        for (_, spring) in inner.springs.iter_mut() {
            spring.step(dt);
        }
        for (_, keyframe) in inner.keyframes.iter_mut() {
            keyframe.tick(dt_ms);
        }
        for (_, timeline) in inner.timelines.iter_mut() {
            timeline.tick(dt_ms);
        }

        inner.springs.iter().any(|(_, s)| !s.is_settled())
            || inner.keyframes.iter().any(|(_, k)| k.is_playing())
            || inner.timelines.iter().any(|(_, t)| t.is_playing())
    }

    /// Whether any animation is mid-flight
    pub fn has_active_animations(&self) -> bool {
        let inner = self.inner.lock().unwrap();
        inner.springs.iter().any(|(_, s)| !s.is_settled())
            || inner.keyframes.iter().any(|(_, k)| k.is_playing())
            || inner.timelines.iter().any(|(_, t)| t.is_playing())
    }

    /// Number of registered springs (instrumentation for leak tests)
    pub fn spring_count(&self) -> usize {
        self.inner.lock().unwrap().springs.len()
    }

    /// Number of registered keyframe animations
    pub fn keyframe_count(&self) -> usize {
        self.inner.lock().unwrap().keyframes.len()
    }

    /// Number of registered timelines
    pub fn timeline_count(&self) -> usize {
        self.inner.lock().unwrap().timelines.len()
    }

    /// Total registrations of any kind
    pub fn registration_count(&self) -> usize {
        let inner = self.inner.lock().unwrap();
        inner.springs.len() + inner.keyframes.len() + inner.timelines.len()
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// A weak handle to the scheduler
///
/// Held by components that register animations. If the scheduler is gone,
/// every operation is a safe no-op.
#[derive(Clone)]
pub struct SchedulerHandle {
    inner: Weak<Mutex<SchedulerInner>>,
}

impl SchedulerHandle {
    /// Whether the scheduler is still alive
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    // =========================================================================
    // Springs
    // =========================================================================

    pub fn register_spring(&self, spring: Spring) -> Option<SpringId> {
        self.inner
            .upgrade()
            .map(|inner| inner.lock().unwrap().springs.insert(spring))
    }

    pub fn remove_spring(&self, id: SpringId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.lock().unwrap().springs.remove(id);
        }
    }

    pub fn spring_value(&self, id: SpringId) -> Option<f32> {
        self.inner
            .upgrade()
            .and_then(|inner| inner.lock().unwrap().springs.get(id).map(|s| s.value()))
    }

    pub fn set_spring_target(&self, id: SpringId, target: f32) {
        if let Some(inner) = self.inner.upgrade() {
            if let Some(spring) = inner.lock().unwrap().springs.get_mut(id) {
                spring.set_target(target);
            }
        }
    }

    /// Whether the spring has settled; a missing spring counts as settled
    pub fn is_spring_settled(&self, id: SpringId) -> bool {
        self.inner
            .upgrade()
            .and_then(|inner| inner.lock().unwrap().springs.get(id).map(|s| s.is_settled()))
            .unwrap_or(true)
    }

    // =========================================================================
    // Keyframe animations
    // =========================================================================

    pub fn register_keyframe(&self, animation: MultiKeyframeAnimation) -> Option<KeyframeId> {
        self.inner
            .upgrade()
            .map(|inner| inner.lock().unwrap().keyframes.insert(animation))
    }

    pub fn remove_keyframe(&self, id: KeyframeId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.lock().unwrap().keyframes.remove(id);
        }
    }

    /// Access a keyframe animation through a closure
    pub fn with_keyframe<F, R>(&self, id: KeyframeId, f: F) -> Option<R>
    where
        F: FnOnce(&mut MultiKeyframeAnimation) -> R,
    {
        self.inner
            .upgrade()
            .and_then(|inner| inner.lock().unwrap().keyframes.get_mut(id).map(f))
    }

    // =========================================================================
    // Timelines
    // =========================================================================

    pub fn register_timeline(&self, timeline: Timeline) -> Option<TimelineId> {
        self.inner
            .upgrade()
            .map(|inner| inner.lock().unwrap().timelines.insert(timeline))
    }

    pub fn remove_timeline(&self, id: TimelineId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.lock().unwrap().timelines.remove(id);
        }
    }

    /// Access a timeline through a closure
    pub fn with_timeline<F, R>(&self, id: TimelineId, f: F) -> Option<R>
    where
        F: FnOnce(&mut Timeline) -> R,
    {
        self.inner
            .upgrade()
            .and_then(|inner| inner.lock().unwrap().timelines.get_mut(id).map(f))
    }
}

// ============================================================================
// Animated Value (spring-based)
// ============================================================================

/// A spring-animated value that registers with the scheduler on demand
///
/// No spring exists until the target first moves away from the current
/// value; the spring is removed again on drop or `set_immediate`.
pub struct AnimatedValue {
    handle: SchedulerHandle,
    spring_id: Option<SpringId>,
    config: SpringConfig,
    current: f32,
    target: f32,
}

impl AnimatedValue {
    pub fn new(handle: SchedulerHandle, initial: f32, config: SpringConfig) -> Self {
        Self {
            handle,
            spring_id: None,
            config,
            current: initial,
            target: initial,
        }
    }

    /// Set the target; starts animating if it differs from the current value
    pub fn set_target(&mut self, target: f32) {
        self.target = target;

        if let Some(id) = self.spring_id {
            self.handle.set_spring_target(id, target);
        } else if (target - self.current).abs() > 0.001 {
            let spring = Spring::new(self.config, self.current);
            if let Some(id) = self.handle.register_spring(spring) {
                self.spring_id = Some(id);
                self.handle.set_spring_target(id, target);
            }
        }
    }

    /// Current animated value
    pub fn get(&self) -> f32 {
        match self.spring_id {
            Some(id) => self.handle.spring_value(id).unwrap_or(self.target),
            None => self.current,
        }
    }

    /// Jump to a value, cancelling any in-flight animation
    pub fn set_immediate(&mut self, value: f32) {
        if let Some(id) = self.spring_id.take() {
            self.handle.remove_spring(id);
        }
        self.current = value;
        self.target = value;
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn is_animating(&self) -> bool {
        match self.spring_id {
            Some(id) => !self.handle.is_spring_settled(id),
            None => false,
        }
    }
}

impl Drop for AnimatedValue {
    fn drop(&mut self) {
        if let Some(id) = self.spring_id {
            self.handle.remove_spring(id);
        }
    }
}

// ============================================================================
// Animated Keyframe
// ============================================================================

/// A scheduler-registered [`MultiKeyframeAnimation`]
///
/// The underlying animation is ticked by the scheduler; this wrapper only
/// steers direction and samples properties. Deregisters on drop.
pub struct AnimatedKeyframe {
    handle: SchedulerHandle,
    id: Option<KeyframeId>,
}

impl AnimatedKeyframe {
    /// Register a built animation with the scheduler
    pub fn register(handle: SchedulerHandle, animation: MultiKeyframeAnimation) -> Self {
        let id = handle.register_keyframe(animation);
        if id.is_none() {
            tracing::debug!("keyframe registered after scheduler shutdown; playback will no-op");
        }
        Self { handle, id }
    }

    /// Play toward the final keyframe (trigger enter)
    pub fn play_forward(&self) {
        if let Some(id) = self.id {
            self.handle.with_keyframe(id, |k| k.play_forward());
        }
    }

    /// Play back toward the first keyframe (trigger exit)
    pub fn play_reverse(&self) {
        if let Some(id) = self.id {
            self.handle.with_keyframe(id, |k| k.play_reverse());
        }
    }

    /// Start forward playback from the beginning
    pub fn start(&self) {
        if let Some(id) = self.id {
            self.handle.with_keyframe(id, |k| k.start());
        }
    }

    pub fn stop(&self) {
        if let Some(id) = self.id {
            self.handle.with_keyframe(id, |k| k.stop());
        }
    }

    /// Current interpolated property set
    pub fn props(&self) -> Option<KeyframeProperties> {
        self.id
            .and_then(|id| self.handle.with_keyframe(id, |k| k.props()))
    }

    pub fn progress(&self) -> f32 {
        self.id
            .and_then(|id| self.handle.with_keyframe(id, |k| k.progress()))
            .unwrap_or(0.0)
    }

    pub fn is_playing(&self) -> bool {
        self.id
            .and_then(|id| self.handle.with_keyframe(id, |k| k.is_playing()))
            .unwrap_or(false)
    }

    pub fn is_complete(&self) -> bool {
        self.id
            .and_then(|id| self.handle.with_keyframe(id, |k| k.is_complete()))
            .unwrap_or(false)
    }
}

impl Drop for AnimatedKeyframe {
    fn drop(&mut self) {
        if let Some(id) = self.id {
            self.handle.remove_keyframe(id);
        }
    }
}

// ============================================================================
// Animated Timeline
// ============================================================================

/// A scheduler-registered [`Timeline`]
///
/// Registered empty on creation; entries are added through the delegating
/// methods or the `with` escape hatch. Deregisters on drop.
pub struct AnimatedTimeline {
    handle: SchedulerHandle,
    id: Option<TimelineId>,
}

impl AnimatedTimeline {
    pub fn new(handle: SchedulerHandle) -> Self {
        let id = handle.register_timeline(Timeline::new());
        if id.is_none() {
            tracing::debug!("timeline registered after scheduler shutdown; playback will no-op");
        }
        Self { handle, id }
    }

    /// Add a linear entry
    pub fn add(&mut self, offset_ms: i32, duration_ms: u32, from: f32, to: f32) -> Option<TimelineEntryId> {
        self.with(|t| t.add(offset_ms, duration_ms, from, to))
    }

    /// Add an entry with a specific easing curve
    pub fn add_with_easing(
        &mut self,
        offset_ms: i32,
        duration_ms: u32,
        from: f32,
        to: f32,
        easing: crate::easing::Easing,
    ) -> Option<TimelineEntryId> {
        self.with(|t| t.add_with_easing(offset_ms, duration_ms, from, to, easing))
    }

    /// Run a closure against the underlying timeline
    ///
    /// This is the way to use [`Timeline::stagger`] or [`Timeline::on_complete`]
    /// on a registered timeline.
    pub fn with<F, R>(&mut self, f: F) -> Option<R>
    where
        F: FnOnce(&mut Timeline) -> R,
    {
        self.id.and_then(|id| self.handle.with_timeline(id, f))
    }

    pub fn set_loop(&mut self, count: i32) {
        self.with(|t| t.set_loop(count));
    }

    pub fn set_alternate(&mut self, enabled: bool) {
        self.with(|t| t.set_alternate(enabled));
    }

    pub fn start(&mut self) {
        self.with(|t| t.start());
    }

    pub fn stop(&mut self) {
        self.with(|t| t.stop());
    }

    pub fn value(&self, entry: TimelineEntryId) -> Option<f32> {
        self.id
            .and_then(|id| self.handle.with_timeline(id, |t| t.value(entry)))
            .flatten()
    }

    pub fn progress(&self) -> f32 {
        self.id
            .and_then(|id| self.handle.with_timeline(id, |t| t.progress()))
            .unwrap_or(0.0)
    }

    pub fn is_playing(&self) -> bool {
        self.id
            .and_then(|id| self.handle.with_timeline(id, |t| t.is_playing()))
            .unwrap_or(false)
    }
}

impl Drop for AnimatedTimeline {
    fn drop(&mut self) {
        if let Some(id) = self.id {
            self.handle.remove_timeline(id);
        }
    }
}

/// Shared spring value (cursor rings hold these across callbacks)
pub type SharedAnimatedValue = Arc<Mutex<AnimatedValue>>;

/// Shared timeline (continuous pulses held by several owners)
pub type SharedAnimatedTimeline = Arc<Mutex<AnimatedTimeline>>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Easing;

    #[test]
    fn test_advance_moves_spring() {
        let scheduler = AnimationScheduler::new();
        let mut value = AnimatedValue::new(scheduler.handle(), 0.0, SpringConfig::gentle());

        assert_eq!(value.get(), 0.0);
        value.set_target(100.0);
        assert!(value.is_animating());

        assert!(scheduler.advance(1.0 / 60.0));
        assert!(value.get() > 0.0);
    }

    #[test]
    fn test_wrappers_deregister_on_drop() {
        let scheduler = AnimationScheduler::new();
        let handle = scheduler.handle();

        {
            let mut value = AnimatedValue::new(handle.clone(), 0.0, SpringConfig::gentle());
            value.set_target(50.0);

            let anim = crate::keyframe::MultiKeyframeAnimation::new(500).keyframe(
                0.0,
                Default::default(),
                Easing::Linear,
            );
            let _keyframe = AnimatedKeyframe::register(handle.clone(), anim);
            let mut timeline = AnimatedTimeline::new(handle.clone());
            timeline.add(0, 1000, 0.0, 1.0);

            assert_eq!(scheduler.registration_count(), 3);
        }

        assert_eq!(scheduler.registration_count(), 0);
        assert!(!scheduler.has_active_animations());
    }

    #[test]
    fn test_dead_scheduler_is_noop() {
        let handle = {
            let scheduler = AnimationScheduler::new();
            scheduler.handle()
        };

        assert!(!handle.is_alive());
        assert!(handle
            .register_spring(Spring::new(SpringConfig::gentle(), 0.0))
            .is_none());

        // Wrapper creation against a dead scheduler must not panic
        let mut value = AnimatedValue::new(handle, 1.0, SpringConfig::gentle());
        value.set_target(2.0);
        assert_eq!(value.get(), 1.0);
    }

    #[test]
    fn test_timeline_plays_through_scheduler() {
        let scheduler = AnimationScheduler::new();
        let mut timeline = AnimatedTimeline::new(scheduler.handle());
        let entry = timeline.add(0, 1000, 0.0, 100.0).unwrap();
        timeline.start();

        scheduler.advance(0.5);
        let mid = timeline.value(entry).unwrap();
        assert!((mid - 50.0).abs() < 1e-3);

        scheduler.advance(0.6);
        assert_eq!(timeline.value(entry).unwrap(), 100.0);
        assert!(!timeline.is_playing());
    }

    #[test]
    fn test_settled_scheduler_reports_idle() {
        let scheduler = AnimationScheduler::new();
        let mut value = AnimatedValue::new(scheduler.handle(), 0.0, SpringConfig::smooth_scroll());
        value.set_target(10.0);

        for _ in 0..600 {
            scheduler.advance(1.0 / 60.0);
        }
        assert!(!scheduler.has_active_animations());
        assert_eq!(scheduler.spring_count(), 1); // registered but settled
    }
}
