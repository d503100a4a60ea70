//! Verve Site Assembly
//!
//! Puts the whole page together: sections and their choreography, the
//! navigation bar, the contact form, the preload gate, and the decorative
//! effects, all driven by one cooperative frame loop.
//!
//! # Example
//!
//! ```ignore
//! use verve_app::{VerveApp, VerveConfig};
//!
//! fn main() -> verve_app::Result<()> {
//!     verve_app::init_tracing();
//!     let mut app = VerveApp::new(VerveConfig::default())?;
//!
//!     // Drive frames at 60fps; the preloader plays, the page reveals
//!     loop {
//!         app.advance(1.0 / 60.0);
//!         if !app.is_loading() {
//!             app.scroll_to_anchor("#projects")?;
//!             break;
//!         }
//!     }
//!     Ok(())
//! }
//! ```

mod app;
mod config;
mod error;
mod form;
mod page;

#[cfg(test)]
mod tests;

pub use app::{init_tracing, VerveApp, VerveConfig};
pub use config::{ContactInfo, FaqEntry, NavItem, Project, SiteConfig, SiteInfo};
pub use error::{Result, VerveError};
pub use form::{ContactForm, FormState, SubmitOutcome};
pub use page::{NavBar, NavState, Page, PageElements};

// Re-export the layers underneath for app consumers
pub use verve_animation::AnimationScheduler;
pub use verve_choreo::{
    AnimationDescriptor, DecorativeEffect, ElementHandle, PreloadGate, Section,
    SectionChoreographer,
};
pub use verve_scroll::{ScrollPolicy, SmoothScroll, Viewport};
