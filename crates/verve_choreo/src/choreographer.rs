//! The section choreographer
//!
//! One choreographer per mounted section. It owns every animation and
//! scroll binding the section creates, wires entrance animations to the
//! section's trigger edges, and guarantees exhaustive release when the
//! section unmounts - release is idempotent and also runs on drop, so a
//! dropped choreographer can never leak a timer or a callback.
//!
//! Entrance groups stagger in document order (the order of the `elements`
//! slice); across groups, the tie-break for triggers firing in the same
//! update is registration order, which the observer preserves.

use std::sync::{Arc, Mutex};

use smallvec::SmallVec;
use verve_animation::{AnimatedKeyframe, SchedulerHandle};
use verve_scroll::{ScrollTrigger, SharedScrollObserver, TriggerEvent, TriggerId};

use crate::descriptor::AnimationDescriptor;
use crate::section::{ElementHandle, Section};

/// One entrance group: the per-element animations driven by one trigger
struct EntranceGroup {
    elements: Vec<ElementHandle>,
    animations: Arc<Vec<AnimatedKeyframe>>,
}

/// One continuous (yoyo) animation bound to a single element
struct ContinuousBinding {
    element: ElementHandle,
    animation: AnimatedKeyframe,
}

/// Orchestrates one section's scroll-synchronized animations
pub struct SectionChoreographer {
    section: Section,
    scheduler: SchedulerHandle,
    observer: SharedScrollObserver,
    entrances: Vec<EntranceGroup>,
    continuous: Vec<ContinuousBinding>,
    triggers: SmallVec<[TriggerId; 8]>,
    /// Monotonic counter so binding keys stay stable across remounts
    group_serial: usize,
    released: bool,
}

impl SectionChoreographer {
    pub fn new(
        section: Section,
        scheduler: SchedulerHandle,
        observer: SharedScrollObserver,
    ) -> Self {
        Self {
            section,
            scheduler,
            observer,
            entrances: Vec::new(),
            continuous: Vec::new(),
            triggers: SmallVec::new(),
            group_serial: 0,
            released: false,
        }
    }

    pub fn section(&self) -> &Section {
        &self.section
    }

    /// Wire an entrance animation for `elements` to `trigger`
    ///
    /// Plays forward when the trigger is entered and reverses when it is
    /// exited; replayable on every re-entry. Elements stagger in slice
    /// order using the descriptor's stagger increment.
    ///
    /// If any element is not yet mounted the whole call is skipped
    /// silently - the next render pass registers again.
    pub fn register_entrance(
        &mut self,
        elements: &[ElementHandle],
        descriptor: &AnimationDescriptor,
        trigger: ScrollTrigger,
    ) {
        if self.released {
            return;
        }

        if elements.is_empty() {
            return;
        }

        if let Some(missing) = elements.iter().find(|e| !e.is_mounted()) {
            tracing::debug!(
                section = %self.section.id,
                element = %missing.name(),
                "entrance target not mounted; skipping registration"
            );
            return;
        }

        let animations: Arc<Vec<AnimatedKeyframe>> = Arc::new(
            (0..elements.len())
                .map(|i| AnimatedKeyframe::register(self.scheduler.clone(), descriptor.compile(i)))
                .collect(),
        );

        // Elements start from the descriptor's initial state, not neutral
        for element in elements {
            element.set_props(*descriptor.from());
        }

        let key = format!("{}#{}", self.section.id, self.group_serial);
        self.group_serial += 1;

        let group_animations = Arc::clone(&animations);
        let trigger_id = self.observer.lock().unwrap().observe(key, trigger, move |event| {
            for animation in group_animations.iter() {
                match event {
                    TriggerEvent::Enter => animation.play_forward(),
                    TriggerEvent::Exit => animation.play_reverse(),
                }
            }
        });
        self.triggers.push(trigger_id);

        self.entrances.push(EntranceGroup {
            elements: elements.to_vec(),
            animations,
        });
    }

    /// Start an infinite alternating animation on `element` immediately
    ///
    /// No scroll dependency; runs until the choreographer is released.
    /// An unmounted element is skipped silently.
    pub fn register_continuous(&mut self, element: &ElementHandle, descriptor: &AnimationDescriptor) {
        if self.released {
            return;
        }

        if !element.is_mounted() {
            tracing::debug!(
                section = %self.section.id,
                element = %element.name(),
                "continuous target not mounted; skipping registration"
            );
            return;
        }

        // Continuous effects are yoyo by definition
        let compiled = descriptor.clone().with_yoyo().compile(0);
        let animation = AnimatedKeyframe::register(self.scheduler.clone(), compiled);
        animation.start();

        self.continuous.push(ContinuousBinding {
            element: element.clone(),
            animation,
        });
    }

    /// Subscribe `on_progress` to scrub progress over this section's range
    ///
    /// Invoked with progress in [0, 1] on every scroll update while the
    /// section is on screen.
    pub fn bind_scroll_progress<F>(&mut self, on_progress: F)
    where
        F: FnMut(f32) + Send + 'static,
    {
        if self.released {
            return;
        }

        let key = format!("{}#{}", self.section.id, self.group_serial);
        self.group_serial += 1;

        let trigger_id =
            self.observer
                .lock()
                .unwrap()
                .observe_progress(key, self.section.trigger(), on_progress);
        self.triggers.push(trigger_id);
    }

    /// Write sampled animation output back to the section's elements
    ///
    /// Called once per frame after the scheduler advances. Elements that
    /// were unmounted mid-flight are skipped silently.
    pub fn update(&mut self) {
        for group in &self.entrances {
            for (element, animation) in group.elements.iter().zip(group.animations.iter()) {
                if !element.is_mounted() {
                    continue;
                }
                if let Some(props) = animation.props() {
                    element.set_props(props);
                }
            }
        }

        for binding in &self.continuous {
            if !binding.element.is_mounted() {
                continue;
            }
            if let Some(props) = binding.animation.props() {
                binding.element.set_props(props);
            }
        }
    }

    /// Cancel every animation and scroll binding this choreographer created
    ///
    /// Idempotent; also runs on drop.
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;

        if let Ok(mut observer) = self.observer.lock() {
            for id in self.triggers.drain(..) {
                observer.release(id);
            }
        }

        // Dropping the wrappers deregisters their animations
        self.entrances.clear();
        self.continuous.clear();

        tracing::debug!(section = %self.section.id, "choreography released");
    }
}

impl Drop for SectionChoreographer {
    fn drop(&mut self) {
        self.release();
    }
}

/// Observer handle helper for app wiring
pub fn shared_observer() -> SharedScrollObserver {
    Arc::new(Mutex::new(verve_scroll::ScrollObserver::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use verve_animation::AnimationScheduler;
    use verve_core::Rect;
    use verve_scroll::Viewport;

    fn viewport_at(scroll_y: f32) -> Viewport {
        let mut vp = Viewport::new(1280.0, 720.0, 5000.0);
        vp.set_scroll(scroll_y);
        vp
    }

    fn projects_section() -> Section {
        Section::new("projects", Rect::new(0.0, 2000.0, 1280.0, 900.0))
            .child(ElementHandle::mounted("card-1"))
            .child(ElementHandle::mounted("card-2"))
            .child(ElementHandle::mounted("card-3"))
    }

    #[test]
    fn test_mount_unmount_leaves_nothing() {
        let scheduler = AnimationScheduler::new();
        let observer = shared_observer();
        let section = projects_section();
        let elements = section.children.clone();

        {
            let mut choreo =
                SectionChoreographer::new(section, scheduler.handle(), Arc::clone(&observer));
            choreo.register_entrance(
                &elements,
                &AnimationDescriptor::scale_in(600).with_stagger(200),
                choreo.section().trigger(),
            );
            choreo.register_continuous(&elements[0], &AnimationDescriptor::pulse(2000, 1.05));
            choreo.bind_scroll_progress(|_| {});

            assert!(scheduler.registration_count() > 0);
            assert!(observer.lock().unwrap().binding_count() > 0);
        }

        // Dropped without an explicit release() call
        assert_eq!(scheduler.registration_count(), 0);
        assert_eq!(observer.lock().unwrap().binding_count(), 0);
        assert!(!scheduler.has_active_animations());
    }

    #[test]
    fn test_release_is_idempotent() {
        let scheduler = AnimationScheduler::new();
        let observer = shared_observer();
        let section = projects_section();
        let elements = section.children.clone();

        let mut choreo =
            SectionChoreographer::new(section, scheduler.handle(), Arc::clone(&observer));
        choreo.register_entrance(
            &elements,
            &AnimationDescriptor::scale_in(600),
            choreo.section().trigger(),
        );

        choreo.release();
        choreo.release();
        assert_eq!(scheduler.registration_count(), 0);

        // Registration after release is refused
        choreo.register_entrance(
            &elements,
            &AnimationDescriptor::scale_in(600),
            Section::new("projects", Rect::new(0.0, 2000.0, 1280.0, 900.0)).trigger(),
        );
        assert_eq!(scheduler.registration_count(), 0);
    }

    #[test]
    fn test_unmounted_element_skips_group() {
        let scheduler = AnimationScheduler::new();
        let observer = shared_observer();
        let section = Section::new("about", Rect::new(0.0, 1000.0, 1280.0, 700.0))
            .child(ElementHandle::mounted("text"))
            .child(ElementHandle::unmounted("image"));
        let elements = section.children.clone();

        let mut choreo =
            SectionChoreographer::new(section, scheduler.handle(), Arc::clone(&observer));
        choreo.register_entrance(
            &elements,
            &AnimationDescriptor::fade_up(800, 50.0),
            choreo.section().trigger(),
        );

        // Whole call skipped: no animations, no trigger
        assert_eq!(scheduler.registration_count(), 0);
        assert_eq!(observer.lock().unwrap().binding_count(), 0);

        // Re-render mounts the element; the retry registers
        elements[1].set_mounted(true);
        choreo.register_entrance(
            &elements,
            &AnimationDescriptor::fade_up(800, 50.0),
            choreo.section().trigger(),
        );
        assert_eq!(scheduler.keyframe_count(), 2);
    }

    #[test]
    fn test_entrance_replays_and_settles_visible() {
        let scheduler = AnimationScheduler::new();
        let observer = shared_observer();
        let section = projects_section();
        let elements = section.children.clone();

        let mut choreo =
            SectionChoreographer::new(section, scheduler.handle(), Arc::clone(&observer));
        choreo.register_entrance(
            &elements,
            &AnimationDescriptor::scale_in(600).with_stagger(200),
            choreo.section().trigger(),
        );

        // Before anything happens, elements hold the descriptor's from state
        assert_eq!(elements[0].props().opacity, 0.0);

        // Scroll into the trigger zone and let everything settle
        observer.lock().unwrap().update(&viewport_at(1600.0));
        for _ in 0..200 {
            scheduler.advance(1.0 / 60.0);
        }
        choreo.update();
        for element in &elements {
            assert!((element.props().opacity - 1.0).abs() < 1e-4);
            assert!((element.props().scale - 1.0).abs() < 1e-4);
        }

        // Scroll out: reverse partway, then back in before it finishes
        observer.lock().unwrap().update(&viewport_at(0.0));
        for _ in 0..10 {
            scheduler.advance(1.0 / 60.0);
        }
        choreo.update();
        let partial = elements[0].props().opacity;
        assert!(partial < 1.0);

        observer.lock().unwrap().update(&viewport_at(1600.0));
        for _ in 0..400 {
            scheduler.advance(1.0 / 60.0);
        }
        choreo.update();

        // The settled state is always the fully-visible end state
        for element in &elements {
            assert!((element.props().opacity - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_stagger_follows_document_order() {
        let scheduler = AnimationScheduler::new();
        let observer = shared_observer();
        let section = projects_section();
        let elements = section.children.clone();

        let mut choreo =
            SectionChoreographer::new(section, scheduler.handle(), Arc::clone(&observer));
        choreo.register_entrance(
            &elements,
            &AnimationDescriptor::scale_in(600).with_stagger(200),
            choreo.section().trigger(),
        );

        observer.lock().unwrap().update(&viewport_at(1600.0));
        // 300ms in: card 1 is animating, card 2 just started, card 3 still waiting
        for _ in 0..18 {
            scheduler.advance(1.0 / 60.0);
        }
        choreo.update();

        let opacities: Vec<f32> = elements.iter().map(|e| e.props().opacity).collect();
        assert!(opacities[0] > opacities[1]);
        assert!(opacities[1] >= opacities[2]);
        assert_eq!(opacities[2], 0.0);
    }

    #[test]
    fn test_continuous_runs_without_scroll() {
        let scheduler = AnimationScheduler::new();
        let observer = shared_observer();
        let section = projects_section();
        let element = section.children[0].clone();

        let mut choreo =
            SectionChoreographer::new(section, scheduler.handle(), Arc::clone(&observer));
        choreo.register_continuous(&element, &AnimationDescriptor::pulse(2000, 1.05));

        // No observer update at all - the pulse still animates
        for _ in 0..120 {
            scheduler.advance(1.0 / 60.0);
        }
        choreo.update();
        assert!(element.props().scale > 1.0);
        assert!(scheduler.has_active_animations());
    }

    #[test]
    fn test_scroll_progress_binding() {
        let scheduler = AnimationScheduler::new();
        let observer = shared_observer();
        let section = Section::new("blobs", Rect::new(0.0, 0.0, 1280.0, 5000.0));

        let progress = Arc::new(Mutex::new(0.0f32));
        let sink = Arc::clone(&progress);

        let mut choreo =
            SectionChoreographer::new(section, scheduler.handle(), Arc::clone(&observer));
        choreo.bind_scroll_progress(move |p| *sink.lock().unwrap() = p);

        observer.lock().unwrap().update(&viewport_at(2140.0));
        assert!((*progress.lock().unwrap() - 0.5).abs() < 1e-3);
    }
}
