//! The application shell
//!
//! Owns the scheduler, viewport, observer, scroll policy, page, preload
//! gate, and decorative effects, and drives them all from one cooperative
//! frame loop. Everything is single-threaded: a frame is scheduler tick,
//! gate poll, smooth-scroll step, observer sweep, choreography propagation,
//! then effect updates.

use std::sync::Arc;

use verve_animation::AnimationScheduler;
use verve_choreo::{
    shared_observer, CursorEffect, DecorativeEffect, EffectContext, EnergyBlobEffect,
    HeroSceneEffect, PreloadGate, RobotEffect,
};
use verve_core::Vec2;
use verve_scroll::{ScrollPolicy, SharedScrollObserver, SmoothScroll, Viewport};

use crate::config::SiteConfig;
use crate::error::Result;
use crate::page::Page;

/// Construction options for the app
#[derive(Clone, Debug)]
pub struct VerveConfig {
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Omit every decorative effect (reduced-motion / low-power contexts)
    pub reduced_motion: bool,
    /// Seed for decorative particle jitter
    pub effect_seed: u64,
    pub site: SiteConfig,
}

impl Default for VerveConfig {
    fn default() -> Self {
        Self {
            viewport_width: 1280.0,
            viewport_height: 720.0,
            reduced_motion: false,
            effect_seed: 0,
            site: SiteConfig::default(),
        }
    }
}

/// The assembled application
pub struct VerveApp {
    scheduler: AnimationScheduler,
    observer: SharedScrollObserver,
    policy: ScrollPolicy,
    viewport: Viewport,
    smooth: SmoothScroll,
    page: Page,
    gate: Option<PreloadGate>,
    cursor: Option<CursorEffect>,
    effects: Vec<Box<dyn DecorativeEffect>>,
    elapsed: f32,
}

impl VerveApp {
    pub fn new(config: VerveConfig) -> Result<Self> {
        let scheduler = AnimationScheduler::new();
        let observer = shared_observer();
        let policy = ScrollPolicy::new();

        let page = Page::new(
            config.site,
            scheduler.handle(),
            Arc::clone(&observer),
            config.viewport_width,
            config.viewport_height,
        );
        let viewport = Viewport::new(
            config.viewport_width,
            config.viewport_height,
            page.content_height(),
        );

        let gate = PreloadGate::new(scheduler.handle(), &policy, || {
            tracing::info!("preload complete");
        });

        let mut cursor = None;
        let mut effects: Vec<Box<dyn DecorativeEffect>> = Vec::new();
        if !config.reduced_motion {
            let mut ring = CursorEffect::new(scheduler.handle());
            ring.start();
            cursor = Some(ring);

            let mut blobs = EnergyBlobEffect::new(scheduler.handle(), config.effect_seed);
            blobs.start();
            effects.push(Box::new(blobs));

            // Renderer-backed scenes may fail to come up; the page runs
            // without them
            match HeroSceneEffect::try_new(&viewport) {
                Ok(mut scene) => {
                    scene.start();
                    effects.push(Box::new(scene));
                }
                Err(err) => tracing::warn!(%err, "hero scene disabled"),
            }
            match RobotEffect::try_new(&viewport) {
                Ok(mut robot) => {
                    robot.start();
                    effects.push(Box::new(robot));
                }
                Err(err) => tracing::warn!(%err, "robot scene disabled"),
            }
        }

        Ok(Self {
            scheduler,
            observer,
            policy,
            viewport,
            smooth: SmoothScroll::new(),
            page,
            gate: Some(gate),
            cursor,
            effects,
            elapsed: 0.0,
        })
    }

    /// Advance one cooperative frame by `dt` seconds
    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt;
        self.scheduler.advance(dt);

        if let Some(gate) = &mut self.gate {
            gate.update();
        }
        if self.gate.as_ref().is_some_and(|gate| gate.is_ready()) {
            self.gate = None;
            self.page.reveal();
        }

        self.smooth.tick(&mut self.viewport, dt);
        self.page.on_scroll(self.viewport.scroll_y);
        self.observer.lock().unwrap().update(&self.viewport);
        self.page.update();

        let ctx = EffectContext {
            dt,
            elapsed: self.elapsed,
            viewport: self.viewport,
        };
        for effect in &mut self.effects {
            effect.update(&ctx);
        }
        if let Some(cursor) = &mut self.cursor {
            cursor.update(&ctx);
        }
    }

    /// Apply a user scroll delta; ignored while scroll is locked
    pub fn scroll_by(&mut self, delta: f32) {
        if self.policy.is_locked() {
            tracing::debug!(delta, "scroll ignored while locked");
            return;
        }
        // User input wins over an in-flight smooth scroll
        self.smooth.cancel();
        self.viewport.apply_scroll_delta(delta);
    }

    /// Navigate to an in-page anchor with a smooth scroll
    pub fn scroll_to_anchor(&mut self, anchor: &str) -> Result<()> {
        let target = self.page.anchor_target(anchor)?;
        if self.policy.is_locked() {
            tracing::debug!(anchor, "navigation ignored while scroll is locked");
            return Ok(());
        }
        self.smooth.scroll_to(&self.viewport, target);
        Ok(())
    }

    /// Pointer moved (drives the custom cursor)
    pub fn pointer_moved(&mut self, position: Vec2) {
        if let Some(cursor) = &mut self.cursor {
            cursor.pointer_moved(position);
        }
    }

    /// Pointer entered/left an interactive element
    pub fn set_hovering(&mut self, hovering: bool) {
        if let Some(cursor) = &mut self.cursor {
            cursor.set_hovering(hovering);
        }
    }

    /// Whether the preloader still covers the page
    pub fn is_loading(&self) -> bool {
        self.gate.is_some()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    pub fn policy(&self) -> &ScrollPolicy {
        &self.policy
    }

    pub fn scheduler(&self) -> &AnimationScheduler {
        &self.scheduler
    }

    pub fn observer(&self) -> &SharedScrollObserver {
        &self.observer
    }

    pub fn cursor(&self) -> Option<&CursorEffect> {
        self.cursor.as_ref()
    }

    /// Number of active decorative effects (cursor included)
    pub fn effect_count(&self) -> usize {
        self.effects.len() + usize::from(self.cursor.is_some())
    }

    /// Whether a smooth scroll is in flight
    pub fn is_smooth_scrolling(&self) -> bool {
        self.smooth.is_active()
    }
}

/// Install the default tracing subscriber (binaries and examples)
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}
