//! Verve Core
//!
//! Foundational primitives shared by every Verve crate:
//!
//! - **Geometry**: `Vec2`, `Vec3`, `Rect`, `Size` - plain f32 math for motion code
//! - **Color**: RGBA color with interpolation for glow/pulse effects
//! - **State Machines**: event-driven transitions for lifecycle gates and
//!   interaction states
//!
//! # Example
//!
//! ```rust
//! use verve_core::{StateTransitions, Vec2};
//!
//! #[derive(Clone, Copy, PartialEq, Eq, Debug)]
//! enum NavState {
//!     Expanded,
//!     Collapsed,
//! }
//!
//! impl StateTransitions for NavState {
//!     fn on_event(&self, event: u32) -> Option<Self> {
//!         use verve_core::event_types::*;
//!         match (self, event) {
//!             (NavState::Expanded, SCROLL_PAST) => Some(NavState::Collapsed),
//!             (NavState::Collapsed, SCROLL_BACK) => Some(NavState::Expanded),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let mut state = NavState::Expanded;
//! if let Some(next) = state.on_event(verve_core::event_types::SCROLL_PAST) {
//!     state = next;
//! }
//! assert_eq!(state, NavState::Collapsed);
//! ```

pub mod color;
pub mod fsm;
pub mod geometry;

pub use color::Color;
pub use fsm::{event_types, StateTransitions};
pub use geometry::{lerp, Rect, Size, Vec2, Vec3};
