//! Verve Choreography
//!
//! The layer that turns scroll and lifecycle events into animation engine
//! calls:
//!
//! - **Descriptors**: immutable value objects describing one transition
//! - **Sections**: named page regions with document-ordered children
//! - **Section Choreographer**: entrance/continuous/progress wiring with
//!   idempotent, exhaustive teardown
//! - **Scene Driver**: pure `(t, s) -> transform` functions for the
//!   decorative 3D objects and wandering blobs
//! - **Decorative Effects**: cursor, energy blobs, 3D scenes behind a
//!   start/stop capability so reduced-motion contexts can omit them
//! - **Preload Gate**: the one-way `Loading -> Ready` machine that holds
//!   the scroll lock

pub mod choreographer;
pub mod descriptor;
pub mod effects;
pub mod preload;
pub mod scene;
pub mod section;

pub use choreographer::{shared_observer, SectionChoreographer};
pub use descriptor::AnimationDescriptor;
pub use effects::{
    BlobConfig, CursorEffect, DecorativeEffect, EffectContext, EffectError, EnergyBlobEffect,
    HeroSceneEffect, OrbConfig, RobotEffect, TrailParticle,
};
pub use preload::{GateState, PreloadGate};
pub use scene::{
    orb_transform, particle_field_rotation, robot_transform, wander_opacity, wander_position,
    wander_rest_position, SceneTransform,
};
pub use section::{ElementHandle, Section, SectionId};
