//! Page assembly
//!
//! Mounts the site's sections in document order and wires each one's
//! choreography: the hero's staggered blur-in headline after the preloader,
//! the about cards, the project cards fading and scaling in 0.2s apart,
//! FAQ items, the contact title and form rows, the footer fade. Also owns
//! the navigation bar (entrance + collapse-past-50px), the contact form,
//! and the page-level reveal fade that follows the preload gate.
//!
//! Section geometry is synthesized from the viewport: each section gets a
//! band of document space, stacked top to bottom. Unmounting a section
//! drops its choreographer, which releases everything it registered.

use indexmap::IndexMap;

use verve_animation::{
    AnimatedKeyframe, AnimatedValue, Easing, KeyframeProperties, MultiKeyframeAnimation,
    SchedulerHandle, SpringConfig,
};
use verve_choreo::{
    AnimationDescriptor, ElementHandle, Section, SectionChoreographer,
};
use verve_core::{event_types, Rect, StateTransitions};
use verve_scroll::SharedScrollObserver;

use crate::config::SiteConfig;
use crate::error::{Result, VerveError};
use crate::form::{ContactForm, SubmitOutcome};

/// Scroll depth (px) past which the nav bar collapses into its pill form
const NAV_COLLAPSE_AT: f32 = 50.0;

/// Navigation bar states
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavState {
    Expanded,
    Collapsed,
}

impl StateTransitions for NavState {
    fn on_event(&self, event: u32) -> Option<Self> {
        match (self, event) {
            (NavState::Expanded, event_types::SCROLL_PAST) => Some(NavState::Collapsed),
            (NavState::Collapsed, event_types::SCROLL_BACK) => Some(NavState::Expanded),
            _ => None,
        }
    }
}

/// The fixed navigation bar: entrance drop-in and scroll-collapse
pub struct NavBar {
    state: NavState,
    element: ElementHandle,
    entrance: AnimatedKeyframe,
    /// 0 = expanded, 1 = collapsed pill; spring-eased between the two
    collapse: AnimatedValue,
}

impl NavBar {
    fn new(scheduler: SchedulerHandle) -> Self {
        let entrance = AnimatedKeyframe::register(
            scheduler.clone(),
            AnimationDescriptor::drop_in(1000, 100.0)
                .with_delay(3000)
                .compile(0),
        );
        entrance.start();

        Self {
            state: NavState::Expanded,
            element: ElementHandle::mounted("nav"),
            entrance,
            collapse: AnimatedValue::new(scheduler, 0.0, SpringConfig::gentle()),
        }
    }

    /// React to a new scroll position
    fn on_scroll(&mut self, scroll_y: f32) {
        let event = if scroll_y > NAV_COLLAPSE_AT {
            event_types::SCROLL_PAST
        } else {
            event_types::SCROLL_BACK
        };
        if self.state.apply(event) {
            let target = match self.state {
                NavState::Collapsed => 1.0,
                NavState::Expanded => 0.0,
            };
            self.collapse.set_target(target);
            tracing::debug!(state = ?self.state, "nav bar state changed");
        }
    }

    fn update(&mut self) {
        if let Some(props) = self.entrance.props() {
            self.element.set_props(props);
        }
    }

    pub fn state(&self) -> NavState {
        self.state
    }

    /// Collapse blend in [0, 1]; drives width/padding/blur interpolation
    pub fn collapse_factor(&self) -> f32 {
        self.collapse.get()
    }

    pub fn element(&self) -> &ElementHandle {
        &self.element
    }
}

/// Handles to every animated element on the page, for wiring and tests
pub struct PageElements {
    pub hero_title_lines: Vec<ElementHandle>,
    pub hero_subtitle: ElementHandle,
    pub hero_cta: ElementHandle,
    pub hero_scroll_hint: ElementHandle,
    pub about_title: ElementHandle,
    pub about_cards: Vec<ElementHandle>,
    pub projects_title: ElementHandle,
    pub project_cards: Vec<ElementHandle>,
    pub faq_title: ElementHandle,
    pub faq_items: Vec<ElementHandle>,
    pub contact_title: ElementHandle,
    pub form_rows: Vec<ElementHandle>,
    pub submit_button: ElementHandle,
    pub footer: ElementHandle,
}

/// The assembled single-page site
pub struct Page {
    config: SiteConfig,
    scheduler: SchedulerHandle,
    choreographers: IndexMap<String, SectionChoreographer>,
    elements: PageElements,
    nav: NavBar,
    form: ContactForm,
    /// Page-level reveal fade; 0 while the preloader covers everything
    opacity: AnimatedValue,
    confirmation: Option<AnimatedKeyframe>,
    content_height: f32,
}

impl Page {
    /// Mount every section and register its choreography
    pub fn new(
        config: SiteConfig,
        scheduler: SchedulerHandle,
        observer: SharedScrollObserver,
        viewport_width: f32,
        viewport_height: f32,
    ) -> Self {
        let h = viewport_height;
        let w = viewport_width;

        let elements = PageElements {
            hero_title_lines: vec![
                ElementHandle::mounted("hero-title-1"),
                ElementHandle::mounted("hero-title-2"),
            ],
            hero_subtitle: ElementHandle::mounted("hero-subtitle"),
            hero_cta: ElementHandle::mounted("hero-cta"),
            hero_scroll_hint: ElementHandle::mounted("hero-scroll-hint"),
            about_title: ElementHandle::mounted("about-title"),
            about_cards: (1..=3)
                .map(|i| ElementHandle::mounted(format!("about-card-{i}")))
                .collect(),
            projects_title: ElementHandle::mounted("projects-title"),
            project_cards: config
                .projects
                .iter()
                .map(|p| ElementHandle::mounted(format!("project-{}", p.title)))
                .collect(),
            faq_title: ElementHandle::mounted("faq-title"),
            faq_items: config
                .faq
                .iter()
                .enumerate()
                .map(|(i, _)| ElementHandle::mounted(format!("faq-item-{i}")))
                .collect(),
            contact_title: ElementHandle::mounted("contact-title"),
            form_rows: vec![
                ElementHandle::mounted("form-name"),
                ElementHandle::mounted("form-email"),
                ElementHandle::mounted("form-message"),
            ],
            submit_button: ElementHandle::mounted("form-submit"),
            footer: ElementHandle::mounted("footer"),
        };

        // Document bands, stacked top to bottom
        let bands: [(&str, f32); 6] = [
            ("home", 1.0),
            ("about", 0.9),
            ("projects", 1.2),
            ("faq", 0.9),
            ("contact", 1.0),
            ("footer", 0.4),
        ];
        let mut tops = IndexMap::new();
        let mut y = 0.0;
        for (id, factor) in bands {
            tops.insert(id.to_string(), Rect::new(0.0, y, w, h * factor));
            y += h * factor;
        }
        let content_height = y;

        let mut choreographers = IndexMap::new();

        // Hero: staggered blur-in headline, subtitle, CTA pop, scroll hint.
        // The delays mirror the preloader's 3.5s runway.
        {
            let bounds = tops["home"];
            let mut section = Section::new("home", bounds).with_thresholds(1.0, 1.0);
            for element in &elements.hero_title_lines {
                section = section.child(element.clone());
            }
            section = section
                .child(elements.hero_subtitle.clone())
                .child(elements.hero_cta.clone())
                .child(elements.hero_scroll_hint.clone());

            let trigger = section.trigger();
            let mut choreo =
                SectionChoreographer::new(section, scheduler.clone(), observer.clone());
            choreo.register_entrance(
                &elements.hero_title_lines,
                &AnimationDescriptor::blur_up(1200, 50.0, 10.0)
                    .with_delay(3500)
                    .with_stagger(100),
                trigger,
            );
            choreo.register_entrance(
                std::slice::from_ref(&elements.hero_subtitle),
                &AnimationDescriptor::fade_up(800, 30.0).with_delay(4300),
                trigger,
            );
            choreo.register_entrance(
                std::slice::from_ref(&elements.hero_cta),
                &AnimationDescriptor::pop_in(600).with_delay(4800),
                trigger,
            );
            choreo.register_entrance(
                std::slice::from_ref(&elements.hero_scroll_hint),
                &AnimationDescriptor::fade_up(500, 20.0).with_delay(5200),
                trigger,
            );
            choreo.register_continuous(
                &elements.hero_cta,
                &AnimationDescriptor::pulse(2000, 1.05),
            );
            choreographers.insert("home".to_string(), choreo);
        }

        // About: title blur-in, value cards scale in 0.2s apart
        {
            let bounds = tops["about"];
            let mut section = Section::new("about", bounds).child(elements.about_title.clone());
            for card in &elements.about_cards {
                section = section.child(card.clone());
            }
            let trigger = section.trigger();
            let mut choreo =
                SectionChoreographer::new(section, scheduler.clone(), observer.clone());
            choreo.register_entrance(
                std::slice::from_ref(&elements.about_title),
                &AnimationDescriptor::blur_up(1000, 50.0, 10.0),
                trigger,
            );
            choreo.register_entrance(
                &elements.about_cards,
                &AnimationDescriptor::scale_in(800).with_stagger(200),
                trigger,
            );
            choreographers.insert("about".to_string(), choreo);
        }

        // Projects: title blur-in, cards fade/scale in 0.2s apart in
        // document order
        {
            let bounds = tops["projects"];
            let mut section =
                Section::new("projects", bounds).child(elements.projects_title.clone());
            for card in &elements.project_cards {
                section = section.child(card.clone());
            }
            let trigger = section.trigger();
            let mut choreo =
                SectionChoreographer::new(section, scheduler.clone(), observer.clone());
            choreo.register_entrance(
                std::slice::from_ref(&elements.projects_title),
                &AnimationDescriptor::blur_up(1000, 50.0, 10.0),
                trigger,
            );
            choreo.register_entrance(
                &elements.project_cards,
                &AnimationDescriptor::scale_in(600).with_stagger(200),
                trigger,
            );
            choreographers.insert("projects".to_string(), choreo);
        }

        // FAQ: title, then items
        {
            let bounds = tops["faq"];
            let mut section = Section::new("faq", bounds).child(elements.faq_title.clone());
            for item in &elements.faq_items {
                section = section.child(item.clone());
            }
            let trigger = section.trigger();
            let mut choreo =
                SectionChoreographer::new(section, scheduler.clone(), observer.clone());
            choreo.register_entrance(
                std::slice::from_ref(&elements.faq_title),
                &AnimationDescriptor::fade_up(1000, 50.0),
                trigger,
            );
            choreo.register_entrance(
                &elements.faq_items,
                &AnimationDescriptor::fade_up(600, 30.0).with_stagger(150),
                trigger,
            );
            choreographers.insert("faq".to_string(), choreo);
        }

        // Contact: title blur-in, form rows sliding in from the left,
        // pulsing submit button
        {
            let bounds = tops["contact"];
            let mut section =
                Section::new("contact", bounds).child(elements.contact_title.clone());
            for row in &elements.form_rows {
                section = section.child(row.clone());
            }
            section = section.child(elements.submit_button.clone());
            let trigger = section.trigger();
            let mut choreo =
                SectionChoreographer::new(section, scheduler.clone(), observer.clone());
            choreo.register_entrance(
                std::slice::from_ref(&elements.contact_title),
                &AnimationDescriptor::blur_up(1000, 50.0, 10.0),
                trigger,
            );
            choreo.register_entrance(
                &elements.form_rows,
                &AnimationDescriptor::slide_in_left(800, 50.0).with_stagger(200),
                trigger,
            );
            choreo.register_continuous(
                &elements.submit_button,
                &AnimationDescriptor::pulse(2000, 1.05),
            );
            choreographers.insert("contact".to_string(), choreo);
        }

        // Footer: plain fade once it scrolls into view
        {
            let bounds = tops["footer"];
            let section = Section::new("footer", bounds)
                .child(elements.footer.clone())
                .with_thresholds(0.95, 0.95);
            let trigger = section.trigger();
            let mut choreo =
                SectionChoreographer::new(section, scheduler.clone(), observer.clone());
            choreo.register_entrance(
                std::slice::from_ref(&elements.footer),
                &AnimationDescriptor::fade_in(1000),
                trigger,
            );
            choreographers.insert("footer".to_string(), choreo);
        }

        let nav = NavBar::new(scheduler.clone());
        let opacity = AnimatedValue::new(scheduler.clone(), 0.0, SpringConfig::gentle());

        Self {
            config,
            scheduler,
            choreographers,
            elements,
            nav,
            form: ContactForm::new(),
            opacity,
            confirmation: None,
            content_height,
        }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn elements(&self) -> &PageElements {
        &self.elements
    }

    pub fn nav(&self) -> &NavBar {
        &self.nav
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ContactForm {
        &mut self.form
    }

    /// Total document height the sections occupy
    pub fn content_height(&self) -> f32 {
        self.content_height
    }

    pub fn section_count(&self) -> usize {
        self.choreographers.len()
    }

    /// The preload gate finished: fade the page in
    pub fn reveal(&mut self) {
        self.opacity.set_target(1.0);
    }

    /// Page-level reveal opacity in [0, 1]
    pub fn opacity(&self) -> f32 {
        self.opacity.get()
    }

    /// Resolve an in-page anchor (`#projects`) to its section's document top
    pub fn anchor_target(&self, anchor: &str) -> Result<f32> {
        let id = anchor.strip_prefix('#').unwrap_or(anchor);
        self.choreographers
            .get(id)
            .map(|c| c.section().bounds.top())
            .ok_or_else(|| VerveError::UnknownAnchor(anchor.to_string()))
    }

    /// Scroll position changed; feed the nav collapse logic
    pub fn on_scroll(&mut self, scroll_y: f32) {
        self.nav.on_scroll(scroll_y);
    }

    /// Per-frame propagation of sampled animation values to elements
    pub fn update(&mut self) {
        for choreo in self.choreographers.values_mut() {
            choreo.update();
        }
        self.nav.update();

        if let Some(confirmation) = &self.confirmation {
            if let Some(props) = confirmation.props() {
                self.elements.submit_button.set_props(props);
            }
            if confirmation.is_complete() {
                self.confirmation = None;
            }
        }
    }

    /// Submit the contact form; plays the confirmation pop on success
    pub async fn submit_contact(&mut self) -> SubmitOutcome {
        let delay = match self.form.begin_submit() {
            Ok(delay) => delay,
            Err(outcome) => return outcome,
        };
        tokio::time::sleep(delay).await;
        self.form.finish_submit();
        self.play_confirmation();
        SubmitOutcome::Sent
    }

    fn play_confirmation(&mut self) {
        let animation = MultiKeyframeAnimation::new(600)
            .keyframe(0.0, KeyframeProperties::default(), Easing::Linear)
            .keyframe(
                0.5,
                KeyframeProperties::default().with_scale(1.2),
                Easing::back_out(),
            )
            .keyframe(1.0, KeyframeProperties::default(), Easing::EaseOut);
        let confirmation = AnimatedKeyframe::register(self.scheduler.clone(), animation);
        confirmation.start();
        self.confirmation = Some(confirmation);
    }

    /// Unmount one section, releasing everything it registered
    ///
    /// Returns whether the section existed.
    pub fn unmount_section(&mut self, id: &str) -> bool {
        self.choreographers.shift_remove(id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use verve_animation::AnimationScheduler;
    use verve_choreo::shared_observer;

    fn test_page(scheduler: &AnimationScheduler) -> (Page, SharedScrollObserver) {
        let observer = shared_observer();
        let page = Page::new(
            SiteConfig::sample(),
            scheduler.handle(),
            Arc::clone(&observer),
            1280.0,
            720.0,
        );
        (page, observer)
    }

    #[test]
    fn test_sections_mount_in_document_order() {
        let scheduler = AnimationScheduler::new();
        let (page, _observer) = test_page(&scheduler);

        let ids: Vec<&String> = page.choreographers.keys().collect();
        assert_eq!(
            ids,
            ["home", "about", "projects", "faq", "contact", "footer"]
        );
        assert_eq!(page.content_height(), 720.0 * 5.4);
    }

    #[test]
    fn test_anchor_resolution() {
        let scheduler = AnimationScheduler::new();
        let (page, _observer) = test_page(&scheduler);

        assert_eq!(page.anchor_target("#home").unwrap(), 0.0);
        let projects_top = page.anchor_target("#projects").unwrap();
        assert_eq!(projects_top, 720.0 * 1.9);

        assert!(matches!(
            page.anchor_target("#careers"),
            Err(VerveError::UnknownAnchor(_))
        ));
    }

    #[test]
    fn test_unmount_releases_section_bindings() {
        let scheduler = AnimationScheduler::new();
        let (mut page, observer) = test_page(&scheduler);

        let bindings_before = observer.lock().unwrap().binding_count();
        let keyframes_before = scheduler.keyframe_count();

        assert!(page.unmount_section("projects"));
        assert!(observer.lock().unwrap().binding_count() < bindings_before);
        assert!(scheduler.keyframe_count() < keyframes_before);

        // Unknown section is a no-op
        assert!(!page.unmount_section("projects"));
        assert!(matches!(
            page.anchor_target("#projects"),
            Err(VerveError::UnknownAnchor(_))
        ));
    }

    #[test]
    fn test_nav_collapses_past_threshold() {
        let scheduler = AnimationScheduler::new();
        let (mut page, _observer) = test_page(&scheduler);

        assert_eq!(page.nav().state(), NavState::Expanded);
        page.on_scroll(120.0);
        assert_eq!(page.nav().state(), NavState::Collapsed);

        // Spring eases toward the collapsed pill
        for _ in 0..300 {
            scheduler.advance(1.0 / 60.0);
        }
        assert!((page.nav().collapse_factor() - 1.0).abs() < 0.05);

        page.on_scroll(0.0);
        assert_eq!(page.nav().state(), NavState::Expanded);
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_plays_confirmation() {
        let scheduler = AnimationScheduler::new();
        let (mut page, _observer) = test_page(&scheduler);

        page.form_mut().set_name("Ada");
        page.form_mut().set_email("ada@example.com");
        page.form_mut().set_message("Hi");

        assert_eq!(page.submit_contact().await, SubmitOutcome::Sent);
        assert!(page.confirmation.is_some());

        // Mid-pop the button is scaled up
        for _ in 0..18 {
            scheduler.advance(1.0 / 60.0);
        }
        page.update();
        assert!(page.elements().submit_button.props().scale > 1.0);

        // After the pop it returns to rest and the animation is dropped
        for _ in 0..30 {
            scheduler.advance(1.0 / 60.0);
        }
        page.update();
        assert!((page.elements().submit_button.props().scale - 1.0).abs() < 1e-3);
        assert!(page.confirmation.is_none());
    }
}
