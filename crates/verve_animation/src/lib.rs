//! Verve Animation Engine
//!
//! Keyframe animations, timeline orchestration, and spring physics behind
//! the site's motion, all advanced from one explicit clock.
//!
//! # Features
//!
//! - **Multi-Property Keyframes**: opacity/scale/translate/rotation/blur
//!   animated together, replayable forward and reverse
//! - **Timelines**: many scalar animations sequenced or overlapped on a
//!   shared clock, with repeat/yoyo loops and a completion callback
//! - **Stagger**: fixed-increment delays across element groups
//! - **Springs**: RK4 physics for target-chasing motion (smooth scroll,
//!   cursor rings)
//! - **Deterministic Scheduler**: `advance(dt)` from the frame loop; no
//!   threads, no wall clock, drop-to-deregister wrappers

pub mod easing;
pub mod keyframe;
pub mod scheduler;
pub mod spring;
pub mod timeline;
pub mod values;

pub use easing::Easing;
pub use keyframe::{KeyframeProperties, MultiKeyframe, MultiKeyframeAnimation, PlayDirection};
pub use scheduler::{
    AnimatedKeyframe, AnimatedTimeline, AnimatedValue, AnimationScheduler, KeyframeId,
    SchedulerHandle, SharedAnimatedTimeline, SharedAnimatedValue, SpringId, TimelineId,
};
pub use spring::{Spring, SpringConfig};
pub use timeline::{StaggerBuilder, Timeline, TimelineEntryId};
pub use values::{
    ColorAnimation, FloatAnimation, Interpolate, TypedKeyframe, TypedKeyframeAnimation,
    Vec2Animation,
};
