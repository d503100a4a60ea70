//! Sections and element handles
//!
//! A [`Section`] is a named region of the page: document-space bounds, the
//! ordered child elements eligible for staggered animation, and the
//! viewport thresholds that decide when it counts as entered. Sections are
//! created on mount and destroyed on unmount; their choreography is
//! re-creatable on remount.
//!
//! An [`ElementHandle`] stands in for a rendered element that may not be
//! mounted yet (or may already be gone). Animations write their sampled
//! visual properties back through the handle, which is also what the tests
//! read to observe settled states.

use std::sync::{Arc, Mutex};

use verve_animation::KeyframeProperties;
use verve_core::Rect;
use verve_scroll::ScrollTrigger;

/// A section's anchor identifier (`home`, `about`, `projects`, ...)
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SectionId(pub String);

impl SectionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SectionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

struct ElementState {
    name: String,
    mounted: bool,
    props: KeyframeProperties,
}

/// Shared handle to a (possibly unmounted) visual element
///
/// Cheap to clone; clones refer to the same element.
#[derive(Clone)]
pub struct ElementHandle {
    inner: Arc<Mutex<ElementState>>,
}

impl ElementHandle {
    /// A mounted element with neutral visual properties
    pub fn mounted(name: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ElementState {
                name: name.into(),
                mounted: true,
                props: KeyframeProperties::default(),
            })),
        }
    }

    /// An element that has not been attached yet
    pub fn unmounted(name: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ElementState {
                name: name.into(),
                mounted: false,
                props: KeyframeProperties::default(),
            })),
        }
    }

    pub fn name(&self) -> String {
        self.inner.lock().unwrap().name.clone()
    }

    pub fn is_mounted(&self) -> bool {
        self.inner.lock().unwrap().mounted
    }

    /// Attach or detach the element (re-render lifecycle)
    pub fn set_mounted(&self, mounted: bool) {
        self.inner.lock().unwrap().mounted = mounted;
    }

    /// Current visual properties
    pub fn props(&self) -> KeyframeProperties {
        self.inner.lock().unwrap().props
    }

    /// Write sampled animation output back to the element
    pub fn set_props(&self, props: KeyframeProperties) {
        self.inner.lock().unwrap().props = props;
    }
}

impl std::fmt::Debug for ElementHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.lock().unwrap();
        f.debug_struct("ElementHandle")
            .field("name", &state.name)
            .field("mounted", &state.mounted)
            .finish()
    }
}

/// A named, mounted region of the page
#[derive(Clone, Debug)]
pub struct Section {
    pub id: SectionId,
    /// Document-space bounds
    pub bounds: Rect,
    /// Children in document order - the stagger order
    pub children: Vec<ElementHandle>,
    /// Enter line as a fraction of viewport height
    pub enter_threshold: f32,
    /// Exit line as a fraction of viewport height
    pub exit_threshold: f32,
}

impl Section {
    pub fn new(id: impl Into<SectionId>, bounds: Rect) -> Self {
        Self {
            id: id.into(),
            bounds,
            children: Vec::new(),
            enter_threshold: 0.85,
            exit_threshold: 0.85,
        }
    }

    /// Append a child element (document order)
    pub fn child(mut self, element: ElementHandle) -> Self {
        self.children.push(element);
        self
    }

    pub fn with_thresholds(mut self, enter: f32, exit: f32) -> Self {
        self.enter_threshold = enter;
        self.exit_threshold = exit;
        self
    }

    /// The scroll trigger covering this section's bounds
    pub fn trigger(&self) -> ScrollTrigger {
        ScrollTrigger {
            top: self.bounds.top(),
            bottom: self.bounds.bottom(),
            enter_threshold: self.enter_threshold,
            exit_threshold: self.exit_threshold,
        }
    }
}

impl From<String> for SectionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
