//! Verve Scroll Plumbing
//!
//! Everything between raw scroll input and the choreography layer:
//!
//! - **Viewport**: scroll position and dimensions, the page's read-only
//!   shared state
//! - **Observer**: keyed scroll-trigger bindings with enter/exit edges and
//!   scrub-progress callbacks
//! - **Policy**: the explicit scroll-lock object (preloader holds a guard)
//! - **Smooth Scroll**: the spring-driven scroll-to-anchor action

pub mod observer;
pub mod policy;
pub mod smooth;
pub mod viewport;

pub use observer::{
    ScrollObserver, ScrollTrigger, SharedScrollObserver, TriggerEvent, TriggerId,
};
pub use policy::{ScrollLockGuard, ScrollPolicy};
pub use smooth::SmoothScroll;
pub use viewport::Viewport;
