//! The preload gate
//!
//! `Loading -> Ready`, once, never back. While loading, the gate owns a
//! scroll-lock guard and plays the fixed intro choreography on one
//! timeline: logo flip reveal, progress-bar fill overlapping its tail, and
//! the overlay fade-out. When the timeline completes, the gate transitions,
//! releases the lock, and invokes the parent's completion callback. If the
//! gate is dropped early (navigation away mid-load), the guard drops with
//! it and scroll is restored - there is no error state and no retry.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use verve_animation::{Easing, SchedulerHandle, TimelineEntryId};
use verve_core::{event_types, StateTransitions};
use verve_scroll::{ScrollLockGuard, ScrollPolicy};

/// Gate lifecycle states
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateState {
    Loading,
    /// Terminal; no reverse transition exists
    Ready,
}

impl StateTransitions for GateState {
    fn on_event(&self, event: u32) -> Option<Self> {
        match (self, event) {
            (GateState::Loading, event_types::TIMELINE_COMPLETE) => Some(GateState::Ready),
            _ => None,
        }
    }
}

/// Timing of the intro choreography, ms
///
/// The progress fill starts 500ms before the logo reveal ends; the exit
/// fade starts 500ms after the fill completes.
const LOGO_MS: u32 = 1500;
const FILL_MS: u32 = 2000;
const FILL_OVERLAP_MS: i32 = 500;
const EXIT_GAP_MS: i32 = 500;
const EXIT_MS: u32 = 1000;

/// Handles to the intro timeline's animated values
struct GateEntries {
    logo_opacity: TimelineEntryId,
    logo_scale: TimelineEntryId,
    logo_rotation_y: TimelineEntryId,
    progress_fill: TimelineEntryId,
    overlay_opacity: TimelineEntryId,
    overlay_scale: TimelineEntryId,
}

/// The preloader's state machine and intro timeline
pub struct PreloadGate {
    state: GateState,
    timeline: verve_animation::AnimatedTimeline,
    entries: Option<GateEntries>,
    lock: Option<ScrollLockGuard>,
    completed: Arc<AtomicBool>,
    on_complete: Option<Box<dyn FnOnce() + Send>>,
}

impl PreloadGate {
    /// Mount the gate: locks scroll and starts the intro choreography
    pub fn new<F>(scheduler: SchedulerHandle, policy: &ScrollPolicy, on_complete: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let completed = Arc::new(AtomicBool::new(false));
        let mut timeline = verve_animation::AnimatedTimeline::new(scheduler);

        let fill_start = LOGO_MS as i32 - FILL_OVERLAP_MS;
        let exit_start = fill_start + FILL_MS as i32 + EXIT_GAP_MS;

        let flag = Arc::clone(&completed);
        let entries = timeline.with(|t| {
            t.on_complete(move || flag.store(true, Ordering::SeqCst));
            GateEntries {
                logo_opacity: t.add_with_easing(0, LOGO_MS, 0.0, 1.0, Easing::back_out()),
                logo_scale: t.add_with_easing(0, LOGO_MS, 0.5, 1.0, Easing::back_out()),
                logo_rotation_y: t.add_with_easing(0, LOGO_MS, -180.0, 0.0, Easing::back_out()),
                progress_fill: t.add_with_easing(fill_start, FILL_MS, 0.0, 100.0, Easing::EaseOut),
                overlay_opacity: t.add_with_easing(exit_start, EXIT_MS, 1.0, 0.0, Easing::EaseInOut),
                overlay_scale: t.add_with_easing(exit_start, EXIT_MS, 1.0, 0.9, Easing::EaseInOut),
            }
        });
        if entries.is_none() {
            tracing::debug!("preload gate created after scheduler shutdown");
        }

        timeline.start();
        tracing::debug!("preload gate mounted; scroll locked");

        Self {
            state: GateState::Loading,
            timeline,
            entries,
            lock: Some(policy.lock()),
            completed,
            on_complete: Some(Box::new(on_complete)),
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == GateState::Ready
    }

    /// Logo reveal values: (opacity, scale, rotation-y degrees)
    pub fn logo(&self) -> (f32, f32, f32) {
        match &self.entries {
            Some(e) => (
                self.timeline.value(e.logo_opacity).unwrap_or(1.0),
                self.timeline.value(e.logo_scale).unwrap_or(1.0),
                self.timeline.value(e.logo_rotation_y).unwrap_or(0.0),
            ),
            None => (1.0, 1.0, 0.0),
        }
    }

    /// Progress-bar fill percentage in [0, 100]
    pub fn progress_fill(&self) -> f32 {
        match &self.entries {
            Some(e) => self.timeline.value(e.progress_fill).unwrap_or(100.0),
            None => 100.0,
        }
    }

    /// Overlay values during the exit fade: (opacity, scale)
    pub fn overlay(&self) -> (f32, f32) {
        match &self.entries {
            Some(e) => (
                self.timeline.value(e.overlay_opacity).unwrap_or(0.0),
                self.timeline.value(e.overlay_scale).unwrap_or(0.9),
            ),
            None => (0.0, 0.9),
        }
    }

    /// Poll for completion; called once per frame after the scheduler
    /// advances
    ///
    /// On the frame the timeline finishes this transitions to `Ready`,
    /// releases the scroll lock, and fires the completion callback. All of
    /// that happens exactly once; later calls are no-ops.
    pub fn update(&mut self) {
        if self.state == GateState::Ready {
            return;
        }
        if !self.completed.load(Ordering::SeqCst) {
            return;
        }

        if self.state.apply(event_types::TIMELINE_COMPLETE) {
            self.lock.take();
            tracing::debug!("preload gate ready; scroll restored");
            if let Some(callback) = self.on_complete.take() {
                callback();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use verve_animation::AnimationScheduler;

    fn advance_frames(scheduler: &AnimationScheduler, gate: &mut PreloadGate, frames: usize) {
        for _ in 0..frames {
            scheduler.advance(1.0 / 60.0);
            gate.update();
        }
    }

    #[test]
    fn test_choreography_order() {
        let scheduler = AnimationScheduler::new();
        let policy = ScrollPolicy::new();
        let mut gate = PreloadGate::new(scheduler.handle(), &policy, || {});

        // Mid logo reveal: nothing else has started
        advance_frames(&scheduler, &mut gate, 30); // 500ms
        let (opacity, _, rotation) = gate.logo();
        assert!(opacity > 0.0);
        assert!(rotation > -180.0);
        assert_eq!(gate.progress_fill(), 0.0);
        assert_eq!(gate.overlay(), (1.0, 1.0));

        // 2s in: fill is running (it started at 1s)
        advance_frames(&scheduler, &mut gate, 90);
        assert!(gate.progress_fill() > 0.0);
        assert!(gate.progress_fill() < 100.0);
        assert!(!gate.is_ready());
    }

    #[test]
    fn test_transitions_exactly_once_and_never_reverses() {
        let scheduler = AnimationScheduler::new();
        let policy = ScrollPolicy::new();
        let fired = Arc::new(AtomicUsize::new(0));
        let sink = Arc::clone(&fired);
        let mut gate = PreloadGate::new(scheduler.handle(), &policy, move || {
            sink.fetch_add(1, Ordering::SeqCst);
        });

        assert!(policy.is_locked());

        // Total choreography is 4.5s; run well past it
        advance_frames(&scheduler, &mut gate, 300);
        assert!(gate.is_ready());
        assert!(!policy.is_locked());
        assert_eq!(fired.load(Ordering::SeqCst), 1);

        // Keep running: still Ready, callback never re-fires
        advance_frames(&scheduler, &mut gate, 120);
        assert!(gate.is_ready());
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_scroll_locked_throughout_loading() {
        let scheduler = AnimationScheduler::new();
        let policy = ScrollPolicy::new();
        let mut gate = PreloadGate::new(scheduler.handle(), &policy, || {});

        for _ in 0..300 {
            scheduler.advance(1.0 / 60.0);
            gate.update();
            if !gate.is_ready() {
                assert!(policy.is_locked(), "scroll unlocked while still loading");
            }
        }
        assert!(gate.is_ready());
        assert!(!policy.is_locked());
    }

    #[test]
    fn test_early_unmount_restores_scroll() {
        let scheduler = AnimationScheduler::new();
        let policy = ScrollPolicy::new();
        let fired = Arc::new(AtomicUsize::new(0));
        let sink = Arc::clone(&fired);

        {
            let mut gate = PreloadGate::new(scheduler.handle(), &policy, move || {
                sink.fetch_add(1, Ordering::SeqCst);
            });
            advance_frames(&scheduler, &mut gate, 30);
            assert!(policy.is_locked());
            // Gate dropped mid-Loading
        }

        assert!(!policy.is_locked());
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        assert_eq!(scheduler.timeline_count(), 0);
    }

    #[test]
    fn test_final_visual_state() {
        let scheduler = AnimationScheduler::new();
        let policy = ScrollPolicy::new();
        let mut gate = PreloadGate::new(scheduler.handle(), &policy, || {});

        advance_frames(&scheduler, &mut gate, 300);
        let (logo_opacity, logo_scale, rotation) = gate.logo();
        assert!((logo_opacity - 1.0).abs() < 1e-4);
        assert!((logo_scale - 1.0).abs() < 1e-4);
        assert!(rotation.abs() < 1e-3);
        assert_eq!(gate.progress_fill(), 100.0);

        let (overlay_opacity, overlay_scale) = gate.overlay();
        assert!(overlay_opacity.abs() < 1e-4);
        assert!((overlay_scale - 0.9).abs() < 1e-4);
    }
}
