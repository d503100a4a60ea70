//! End-to-end tests for the assembled site
//!
//! These drive the whole app through its frame loop the way a browser
//! session would: preloader, reveal, navigation, scroll-triggered
//! entrances, form submission.

use crate::{SubmitOutcome, VerveApp, VerveConfig};
use verve_core::Vec2;

const FRAME: f32 = 1.0 / 60.0;

/// The preload choreography runs 4.5s; one extra frame for the poll
const PRELOAD_FRAMES: usize = 272;

fn advance_frames(app: &mut VerveApp, frames: usize) {
    for _ in 0..frames {
        app.advance(FRAME);
    }
}

fn test_app() -> VerveApp {
    VerveApp::new(VerveConfig::default()).expect("app must assemble")
}

#[test]
fn test_preloader_gates_then_reveals() {
    let mut app = test_app();
    assert!(app.is_loading());
    assert!(app.policy().is_locked());
    assert_eq!(app.page().opacity(), 0.0);

    advance_frames(&mut app, PRELOAD_FRAMES);
    assert!(!app.is_loading());
    assert!(!app.policy().is_locked());

    // The reveal fade runs after the gate opens
    advance_frames(&mut app, 120);
    assert!((app.page().opacity() - 1.0).abs() < 0.05);
}

#[test]
fn test_scroll_ignored_while_loading() {
    let mut app = test_app();
    advance_frames(&mut app, 30);

    app.scroll_by(400.0);
    assert_eq!(app.viewport().scroll_y, 0.0);

    app.scroll_to_anchor("#projects").unwrap();
    advance_frames(&mut app, 30);
    assert_eq!(app.viewport().scroll_y, 0.0);

    // After the gate opens, scrolling works
    advance_frames(&mut app, PRELOAD_FRAMES);
    app.scroll_by(400.0);
    assert_eq!(app.viewport().scroll_y, 400.0);
}

#[test]
fn test_projects_navigation_end_to_end() {
    let mut app = test_app();
    advance_frames(&mut app, PRELOAD_FRAMES);

    // Click the Projects nav link
    app.scroll_to_anchor("#projects").unwrap();
    assert!(app.is_smooth_scrolling());

    let projects_top = app.page().anchor_target("#projects").unwrap();
    let mut frames = 0;
    while app.is_smooth_scrolling() {
        app.advance(FRAME);
        frames += 1;
        assert!(frames < 600, "smooth scroll never settled");
    }

    // Section top aligned with viewport top, within a few pixels
    assert!((app.viewport().scroll_y - projects_top).abs() < 3.0);

    // Entrance bound: first-card delay + stagger x cards + one duration.
    // The descriptor is scale_in(600) staggered 200ms across 4 cards.
    let card_count = app.page().elements().project_cards.len();
    assert_eq!(card_count, 4);
    let bound_ms = 200.0 * card_count as f32 + 600.0;
    advance_frames(&mut app, (bound_ms / 1000.0 / FRAME).ceil() as usize + 2);

    for card in &app.page().elements().project_cards {
        let props = card.props();
        assert!((props.opacity - 1.0).abs() < 1e-3, "card not fully visible");
        assert!((props.scale - 1.0).abs() < 1e-3, "card not fully scaled");
    }

    // The nav collapsed on the way down
    assert_eq!(app.page().nav().state(), crate::NavState::Collapsed);
}

#[test]
fn test_scroll_back_replays_entrance() {
    let mut app = test_app();
    advance_frames(&mut app, PRELOAD_FRAMES);

    app.scroll_to_anchor("#projects").unwrap();
    while app.is_smooth_scrolling() {
        app.advance(FRAME);
    }
    advance_frames(&mut app, 120);
    assert!((app.page().elements().project_cards[0].props().opacity - 1.0).abs() < 1e-3);

    // Back to the top: the entrance reverses
    app.scroll_by(-app.viewport().scroll_y);
    advance_frames(&mut app, 300);
    let reversed = app.page().elements().project_cards[0].props().opacity;
    assert!(reversed < 0.05, "entrance did not reverse, opacity {reversed}");

    // Down again: it replays, settling fully visible
    app.scroll_by(app.page().anchor_target("#projects").unwrap());
    advance_frames(&mut app, 300);
    assert!((app.page().elements().project_cards[0].props().opacity - 1.0).abs() < 1e-3);
}

#[test]
fn test_reduced_motion_omits_decorative_effects() {
    let mut app = VerveApp::new(VerveConfig {
        reduced_motion: true,
        ..Default::default()
    })
    .unwrap();

    assert_eq!(app.effect_count(), 0);
    assert!(app.cursor().is_none());

    // Core navigation and content still work
    advance_frames(&mut app, PRELOAD_FRAMES);
    app.scroll_to_anchor("#contact").unwrap();
    while app.is_smooth_scrolling() {
        app.advance(FRAME);
    }
    let contact_top = app.page().anchor_target("#contact").unwrap();
    assert!((app.viewport().scroll_y - contact_top).abs() < 3.0);
}

#[test]
fn test_cursor_follows_pointer() {
    let mut app = test_app();
    app.pointer_moved(Vec2::new(640.0, 360.0));
    advance_frames(&mut app, 60);

    let cursor = app.cursor().expect("cursor enabled by default");
    assert!((cursor.dot_position().x - 640.0).abs() < 5.0);
    assert!((cursor.dot_position().y - 360.0).abs() < 5.0);
}

#[test]
fn test_unknown_anchor_is_an_error() {
    let mut app = test_app();
    advance_frames(&mut app, PRELOAD_FRAMES);
    assert!(app.scroll_to_anchor("#careers").is_err());
}

#[tokio::test(start_paused = true)]
async fn test_contact_form_end_to_end() {
    let mut app = test_app();

    // Empty form never reaches the simulated delay
    assert_eq!(
        app.page_mut().submit_contact().await,
        SubmitOutcome::MissingField("name")
    );

    app.page_mut().form_mut().set_name("Ada Lovelace");
    app.page_mut().form_mut().set_email("ada@example.com");
    app.page_mut().form_mut().set_message("Let's build something");

    assert_eq!(app.page_mut().submit_contact().await, SubmitOutcome::Sent);
    assert_eq!(app.page().form().name(), "");
    assert!(!app.page().form().is_submitting());
}
