//! Scroll trigger observer
//!
//! Watches the viewport and tells registered bindings when their element
//! crosses its threshold (edge events) or how far scroll has progressed
//! through their range (progress callbacks). This is the single place
//! enter/exit hysteresis lives; choreographers only see clean events.
//!
//! Bindings are keyed: registering a second binding for the same key
//! releases the stale one first, so a remounted section can never
//! accumulate duplicate triggers.

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};

use crate::viewport::Viewport;

new_key_type! {
    /// Handle to a registered scroll binding
    pub struct TriggerId;
}

/// Edge events emitted as an element crosses its threshold
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerEvent {
    /// The element crossed into its trigger zone (scrolling down)
    Enter,
    /// The element left its trigger zone (scrolling back up)
    Exit,
}

/// A document-space span with viewport-relative thresholds
///
/// `enter_threshold` is a fraction of viewport height measured from the
/// top: 0.85 means "element top reaches 85% down the viewport", the
/// default the section entrances use. Enter and exit share the threshold
/// unless configured apart.
#[derive(Clone, Copy, Debug)]
pub struct ScrollTrigger {
    /// Element top in document space, px
    pub top: f32,
    /// Element bottom in document space, px
    pub bottom: f32,
    /// Enter when `top <= scroll_y + enter_threshold * viewport.height`
    pub enter_threshold: f32,
    /// Exit when `top > scroll_y + exit_threshold * viewport.height`
    pub exit_threshold: f32,
}

impl ScrollTrigger {
    /// Trigger with the default 85% enter line
    pub fn at_element(top: f32, bottom: f32) -> Self {
        Self {
            top,
            bottom,
            enter_threshold: 0.85,
            exit_threshold: 0.85,
        }
    }

    /// Trigger spanning the whole document (global scrub ranges)
    pub fn whole_document(content_height: f32) -> Self {
        Self {
            top: 0.0,
            bottom: content_height,
            enter_threshold: 1.0,
            exit_threshold: 1.0,
        }
    }

    pub fn with_thresholds(mut self, enter: f32, exit: f32) -> Self {
        self.enter_threshold = enter;
        self.exit_threshold = exit;
        self
    }

    fn is_past_enter(&self, viewport: &Viewport) -> bool {
        self.top <= viewport.scroll_y + self.enter_threshold * viewport.height
    }

    fn is_past_exit(&self, viewport: &Viewport) -> bool {
        self.top <= viewport.scroll_y + self.exit_threshold * viewport.height
    }

    /// Scrub progress: 0 when the range top aligns with the viewport top,
    /// 1 when the range bottom aligns with the viewport bottom
    fn progress(&self, viewport: &Viewport) -> f32 {
        let span = (self.bottom - self.top) - viewport.height;
        if span <= 0.0 {
            return if viewport.scroll_y >= self.top { 1.0 } else { 0.0 };
        }
        ((viewport.scroll_y - self.top) / span).clamp(0.0, 1.0)
    }
}

enum BindingKind {
    Edge {
        callback: Box<dyn FnMut(TriggerEvent) + Send>,
        /// Whether the element is currently past its enter threshold
        active: bool,
        primed: bool,
    },
    Progress {
        callback: Box<dyn FnMut(f32) + Send>,
        last: Option<f32>,
    },
}

struct Binding {
    key: String,
    trigger: ScrollTrigger,
    kind: BindingKind,
}

/// The viewport observer: evaluates every binding against scroll updates
///
/// Callbacks run in registration order, which is the tie-break the
/// choreography relies on when several triggers fire in the same update.
pub struct ScrollObserver {
    bindings: SlotMap<TriggerId, Binding>,
    by_key: FxHashMap<String, TriggerId>,
    order: Vec<TriggerId>,
}

impl ScrollObserver {
    pub fn new() -> Self {
        Self {
            bindings: SlotMap::with_key(),
            by_key: FxHashMap::default(),
            order: Vec::new(),
        }
    }

    /// Register an edge-event binding for `key`
    ///
    /// A stale binding under the same key is released first.
    pub fn observe<F>(&mut self, key: impl Into<String>, trigger: ScrollTrigger, callback: F) -> TriggerId
    where
        F: FnMut(TriggerEvent) + Send + 'static,
    {
        self.insert(
            key.into(),
            trigger,
            BindingKind::Edge {
                callback: Box::new(callback),
                active: false,
                primed: false,
            },
        )
    }

    /// Register a progress binding for `key`
    ///
    /// The callback receives scrub progress in [0, 1] on every update while
    /// the range is on screen.
    pub fn observe_progress<F>(
        &mut self,
        key: impl Into<String>,
        trigger: ScrollTrigger,
        callback: F,
    ) -> TriggerId
    where
        F: FnMut(f32) + Send + 'static,
    {
        self.insert(
            key.into(),
            trigger,
            BindingKind::Progress {
                callback: Box::new(callback),
                last: None,
            },
        )
    }

    fn insert(&mut self, key: String, trigger: ScrollTrigger, kind: BindingKind) -> TriggerId {
        if let Some(stale) = self.by_key.remove(&key) {
            tracing::debug!(key = %key, "releasing stale scroll binding before re-registering");
            self.remove(stale);
        }

        let id = self.bindings.insert(Binding {
            key: key.clone(),
            trigger,
            kind,
        });
        self.by_key.insert(key, id);
        self.order.push(id);
        id
    }

    /// Release one binding; safe to call with an already-released id
    pub fn release(&mut self, id: TriggerId) {
        self.remove(id);
    }

    fn remove(&mut self, id: TriggerId) {
        if let Some(binding) = self.bindings.remove(id) {
            self.by_key.remove(&binding.key);
            self.order.retain(|&o| o != id);
        }
    }

    /// Release every binding
    pub fn release_all(&mut self) {
        self.bindings.clear();
        self.by_key.clear();
        self.order.clear();
    }

    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    /// Evaluate all bindings against the current viewport
    ///
    /// Edge bindings fire `Enter` on crossing into the zone and `Exit` on
    /// crossing back out; the first update after registration fires `Enter`
    /// immediately if the element is already in the zone. Progress bindings
    /// fire whenever their range is on screen and progress changed.
    pub fn update(&mut self, viewport: &Viewport) {
        for &id in &self.order {
            let Some(binding) = self.bindings.get_mut(id) else {
                continue;
            };

            match &mut binding.kind {
                BindingKind::Edge {
                    callback,
                    active,
                    primed,
                } => {
                    let now_active = if *active {
                        binding.trigger.is_past_exit(viewport)
                    } else {
                        binding.trigger.is_past_enter(viewport)
                    };

                    if !*primed {
                        *primed = true;
                        *active = now_active;
                        if now_active {
                            callback(TriggerEvent::Enter);
                        }
                    } else if now_active != *active {
                        *active = now_active;
                        callback(if now_active {
                            TriggerEvent::Enter
                        } else {
                            TriggerEvent::Exit
                        });
                    }
                }
                BindingKind::Progress { callback, last } => {
                    if !viewport.intersects(binding.trigger.top, binding.trigger.bottom) {
                        continue;
                    }
                    let progress = binding.trigger.progress(viewport);
                    if last.map_or(true, |p| (p - progress).abs() > f32::EPSILON) {
                        *last = Some(progress);
                        callback(progress);
                    }
                }
            }
        }
    }
}

impl Default for ScrollObserver {
    fn default() -> Self {
        Self::new()
    }
}

/// Observer shared between the app's frame loop and the choreographers
pub type SharedScrollObserver = std::sync::Arc<std::sync::Mutex<ScrollObserver>>;
