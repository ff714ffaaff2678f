//! The seam between the controller and the hosting page.
//!
//! Everything the controller reads from or writes to the DOM goes through
//! the [`Page`] trait: fragments land in named [`Container`]s, navigation
//! and gesture visuals are single method calls, and page-only concerns
//! (service worker, install prompt, the external delete collaborator) are
//! delegated outright. [`HeadlessPage`] records every effect in plain
//! fields and backs the test suite; a webview embedder implements the same
//! trait against the real DOM.

use std::collections::{HashMap, HashSet};

use crate::gesture::{PullVisual, RippleSpec};
use crate::nav::{IndicatorPlacement, Rect, Section};

/// Named fragment containers on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Container {
    Posts,
    Assignments,
    Meetings,
    Resources,
    Submissions,
    HackatimeProjects,
}

impl Container {
    /// DOM id of this container.
    #[must_use]
    pub const fn dom_id(self) -> &'static str {
        match self {
            Self::Posts => "mobilePostsList",
            Self::Assignments => "mobileAssignmentsList",
            Self::Meetings => "mobileMeetingsList",
            Self::Resources => "mobileResourcesList",
            Self::Submissions => "mobileSubmissionsList",
            Self::HackatimeProjects => "mobileHackatimeProjectsList",
        }
    }
}

/// Cached collection sizes shown on the dashboard stat cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatCounts {
    pub posts: usize,
    pub assignments: usize,
    pub meetings: usize,
    pub projects: usize,
}

/// Toast severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Error,
}

/// DOM effects and reads the controller needs from its hosting page.
pub trait Page {
    /// Whether `container` exists on this page.
    fn has_container(&self, container: Container) -> bool;

    /// Bounding box of the tab for `section`, when that tab exists.
    fn tab_rect(&self, section: Section) -> Option<Rect>;

    /// Bounding box of the tab strip.
    fn tab_strip_rect(&self) -> Option<Rect>;

    /// Member currently picked in the Hackatime selector.
    fn selected_member_id(&self) -> Option<String>;

    /// Replace a container's markup.
    fn set_container_html(&mut self, container: Container, html: String);

    /// Show the full-screen loading overlay.
    fn show_loading_screen(&mut self);

    /// Start fading the loading overlay out.
    fn begin_loading_fade(&mut self);

    /// Hide the faded overlay and reveal the dashboard.
    fn finish_loading_fade(&mut self);

    /// Run the one-time entrance effects.
    fn trigger_entrance_effects(&mut self);

    /// Mark the tab for `section` active, clearing the others.
    fn set_active_tab(&mut self, section: Section);

    /// Show the inline section for `section`, hiding the others.
    fn set_active_section(&mut self, section: Section);

    /// Slide the active-tab indicator.
    fn place_indicator(&mut self, placement: IndicatorPlacement);

    /// Slide a detail panel in.
    fn open_detail(&mut self, section: Section);

    /// Start a detail panel's slide-out.
    fn begin_detail_close(&mut self, section: Section);

    /// Hide a detail panel once its slide-out finished.
    fn finish_detail_close(&mut self, section: Section);

    /// Set or clear the body-level marker that hides the header and tab
    /// strip while a detail panel is open.
    fn set_detail_marker(&mut self, open: bool);

    /// Apply the pull-to-refresh translate/fade.
    fn set_pull_visual(&mut self, visual: PullVisual);

    /// Clear the pull-to-refresh visuals.
    fn reset_pull_visual(&mut self);

    /// Spawn a press ripple.
    fn spawn_ripple(&mut self, ripple: RippleSpec);

    /// Show a transient notification.
    fn show_toast(&mut self, message: &str, kind: ToastKind);

    /// Refresh the dashboard stat cards.
    fn update_stats(&mut self, counts: StatCounts);

    /// Remove a post's rendered card.
    fn remove_post_card(&mut self, post_id: i64);

    /// Hand a deletion to the page's external collaborator.
    fn dispatch_delete_post(&mut self, post_id: i64, content: String);

    /// Register the offline service worker.
    fn register_service_worker(&mut self, script_path: &str);

    /// Suppress the browser's default install prompt.
    fn suppress_install_prompt(&mut self);
}

/// In-memory [`Page`] that records every effect.
///
/// Backs the test suite; also usable as a reference when wiring the
/// controller to a real page.
#[derive(Debug, Default)]
pub struct HeadlessPage {
    pub containers: HashMap<Container, String>,
    pub missing_containers: HashSet<Container>,
    pub tab_rects: HashMap<Section, Rect>,
    pub tab_strip: Option<Rect>,
    pub selected_member: Option<String>,
    pub loading_screen_shown: bool,
    pub loading_fade_begun: bool,
    pub loading_fade_finished: bool,
    pub entrance_effects: usize,
    pub active_tab: Option<Section>,
    pub active_section: Option<Section>,
    pub indicator: Option<IndicatorPlacement>,
    pub opened_details: Vec<Section>,
    pub closing_detail: Option<Section>,
    pub closed_details: Vec<Section>,
    pub detail_marker: bool,
    pub pull_visuals: Vec<PullVisual>,
    pub pull_resets: usize,
    pub ripples: Vec<RippleSpec>,
    pub toasts: Vec<(String, ToastKind)>,
    pub stats: Vec<StatCounts>,
    pub removed_posts: Vec<i64>,
    pub delete_dispatches: Vec<(i64, String)>,
    pub registered_worker: Option<String>,
    pub install_prompt_suppressed: bool,
}

impl HeadlessPage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current markup of a container, empty when never painted.
    #[must_use]
    pub fn container_html(&self, container: Container) -> &str {
        self.containers.get(&container).map_or("", String::as_str)
    }

    /// Pretend `container` is absent from this page.
    pub fn remove_container(&mut self, container: Container) {
        self.missing_containers.insert(container);
    }

    /// Pick a member in the Hackatime selector.
    pub fn select_member(&mut self, member_id: &str) {
        self.selected_member = Some(member_id.to_string());
    }

    pub fn set_tab_rect(&mut self, section: Section, rect: Rect) {
        self.tab_rects.insert(section, rect);
    }

    pub fn set_tab_strip_rect(&mut self, rect: Rect) {
        self.tab_strip = Some(rect);
    }
}

impl Page for HeadlessPage {
    fn has_container(&self, container: Container) -> bool {
        !self.missing_containers.contains(&container)
    }

    fn tab_rect(&self, section: Section) -> Option<Rect> {
        self.tab_rects.get(&section).copied()
    }

    fn tab_strip_rect(&self) -> Option<Rect> {
        self.tab_strip
    }

    fn selected_member_id(&self) -> Option<String> {
        self.selected_member.clone()
    }

    fn set_container_html(&mut self, container: Container, html: String) {
        self.containers.insert(container, html);
    }

    fn show_loading_screen(&mut self) {
        self.loading_screen_shown = true;
    }

    fn begin_loading_fade(&mut self) {
        self.loading_fade_begun = true;
    }

    fn finish_loading_fade(&mut self) {
        self.loading_fade_finished = true;
    }

    fn trigger_entrance_effects(&mut self) {
        self.entrance_effects += 1;
    }

    fn set_active_tab(&mut self, section: Section) {
        self.active_tab = Some(section);
    }

    fn set_active_section(&mut self, section: Section) {
        self.active_section = Some(section);
    }

    fn place_indicator(&mut self, placement: IndicatorPlacement) {
        self.indicator = Some(placement);
    }

    fn open_detail(&mut self, section: Section) {
        self.opened_details.push(section);
    }

    fn begin_detail_close(&mut self, section: Section) {
        self.closing_detail = Some(section);
    }

    fn finish_detail_close(&mut self, section: Section) {
        self.closing_detail = None;
        self.closed_details.push(section);
    }

    fn set_detail_marker(&mut self, open: bool) {
        self.detail_marker = open;
    }

    fn set_pull_visual(&mut self, visual: PullVisual) {
        self.pull_visuals.push(visual);
    }

    fn reset_pull_visual(&mut self) {
        self.pull_resets += 1;
    }

    fn spawn_ripple(&mut self, ripple: RippleSpec) {
        self.ripples.push(ripple);
    }

    fn show_toast(&mut self, message: &str, kind: ToastKind) {
        self.toasts.push((message.to_string(), kind));
    }

    fn update_stats(&mut self, counts: StatCounts) {
        self.stats.push(counts);
    }

    fn remove_post_card(&mut self, post_id: i64) {
        self.removed_posts.push(post_id);
    }

    fn dispatch_delete_post(&mut self, post_id: i64, content: String) {
        self.delete_dispatches.push((post_id, content));
    }

    fn register_service_worker(&mut self, script_path: &str) {
        self.registered_worker = Some(script_path.to_string());
    }

    fn suppress_install_prompt(&mut self) {
        self.install_prompt_suppressed = true;
    }
}
