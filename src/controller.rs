//! The dashboard controller.
//!
//! One instance drives a whole page session: it owns the API client, the
//! collection store, and the navigation/gesture state, and pushes every
//! visible effect through the [`Page`] it was built with. All failures are
//! converted at the section boundary into fragments or a toast; nothing
//! escapes `init`.

use maud::{Markup, Render};
use tracing::{error, info, warn};

use crate::api::{ApiClient, ApiError, DataStore, Endpoint, LoadToken};
use crate::components::{
    escape_html, AssignmentList, EmptyState, ErrorState, HackatimeProjectList, MeetingList,
    PostList, ResourceList, SectionLoading, SubmissionList,
};
use crate::config::DashboardConfig;
use crate::constants::{DETAIL_SLIDE, LOADING_FADE, SERVICE_WORKER_PATH};
use crate::gesture::{self, PullToRefresh, RippleSpec};
use crate::model::{decode_rows, Assignment, Meeting, Post, Resource, Submission};
use crate::nav::{IndicatorPlacement, Rect, Section};
use crate::page::{Container, Page, StatCounts, ToastKind};

/// Controller for the mobile club dashboard.
///
/// # Example
///
/// ```ignore
/// use mobile_club_dashboard::controller::MobileDashboard;
/// use mobile_club_dashboard::page::HeadlessPage;
///
/// let mut dashboard =
///     MobileDashboard::from_page_html("https://clubs.example", &page_html, HeadlessPage::new())?;
/// dashboard.init().await;
/// ```
pub struct MobileDashboard<P: Page> {
    config: DashboardConfig,
    client: ApiClient,
    store: DataStore,
    current_section: Section,
    is_loading: bool,
    active_detail: Option<Section>,
    pull: PullToRefresh,
    rubber_start_y: f64,
    page: P,
}

impl<P: Page> MobileDashboard<P> {
    /// Create a controller for the backend at `origin`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidOrigin`] when `origin` is not a valid URL.
    pub fn new(origin: &str, config: DashboardConfig, page: P) -> Result<Self, ApiError> {
        let client = ApiClient::new(origin, &config)?;
        Ok(Self {
            config,
            client,
            store: DataStore::new(),
            current_section: Section::Dashboard,
            is_loading: true,
            active_detail: None,
            pull: PullToRefresh::new(),
            rubber_start_y: 0.0,
            page,
        })
    }

    /// Create a controller with its config extracted from page markup.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidOrigin`] when `origin` is not a valid URL.
    pub fn from_page_html(origin: &str, html: &str, page: P) -> Result<Self, ApiError> {
        Self::new(origin, DashboardConfig::from_page(html), page)
    }

    /// Bring the page up: loading overlay, service worker, initial data.
    ///
    /// The overlay is hidden on the way out no matter what the fetches
    /// did, so the page can never get stuck loading.
    pub async fn init(&mut self) {
        info!(club_id = ?self.config.club_id, "Initializing mobile dashboard");

        self.page.show_loading_screen();
        self.page.register_service_worker(SERVICE_WORKER_PATH);
        self.page.suppress_install_prompt();

        self.load_all_data().await;

        self.hide_loading_screen().await;
    }

    /// Fetch the four core collections concurrently.
    ///
    /// Each success commits on its own; one failure surfaces a single
    /// toast and leaves the other collections' fresh rows in place.
    pub async fn load_all_data(&mut self) {
        let posts_token = self.store.begin_load(Endpoint::Posts);
        let assignments_token = self.store.begin_load(Endpoint::Assignments);
        let meetings_token = self.store.begin_load(Endpoint::Meetings);
        let projects_token = self.store.begin_load(Endpoint::Projects);

        let (posts, assignments, meetings, projects) = tokio::join!(
            self.client.fetch_collection(Endpoint::Posts),
            self.client.fetch_collection(Endpoint::Assignments),
            self.client.fetch_collection(Endpoint::Meetings),
            self.client.fetch_collection(Endpoint::Projects),
        );

        let mut failed = false;
        for (token, outcome) in [
            (posts_token, posts),
            (assignments_token, assignments),
            (meetings_token, meetings),
            (projects_token, projects),
        ] {
            match outcome {
                Ok(rows) => {
                    self.store.commit(&token, rows);
                }
                Err(e) => {
                    error!(endpoint = %token.endpoint(), error = %e, "Collection fetch failed");
                    failed = true;
                }
            }
        }

        if failed {
            self.page.show_toast("Error loading data", ToastKind::Error);
        }

        self.push_stats();
    }

    /// Switch to a tab by name; unknown names are ignored.
    pub async fn open_tab_by_name(&mut self, name: &str) {
        match Section::from_name(name) {
            Some(section) => self.open_tab(section).await,
            None => warn!(name = %name, "Ignoring unknown section name"),
        }
    }

    /// Switch to a tab.
    ///
    /// No-op while the initial load is in flight. Detail sections open as
    /// overlay panels and never become the current inline section.
    pub async fn open_tab(&mut self, section: Section) {
        if self.is_loading {
            return;
        }

        if section.is_detail() {
            self.open_detail_section(section).await;
            return;
        }

        info!(section = %section, "Opening tab");
        self.page.set_active_tab(section);
        if let (Some(tab), Some(strip)) = (self.page.tab_rect(section), self.page.tab_strip_rect())
        {
            self.page
                .place_indicator(IndicatorPlacement::compute(&tab, &strip));
        }
        self.page.set_active_section(section);
        self.current_section = section;

        self.load_section(section).await;
    }

    /// Slide a detail panel in and load its data.
    pub async fn open_detail_section(&mut self, section: Section) {
        info!(section = %section, "Opening detail section");
        self.page.set_detail_marker(true);
        self.page.open_detail(section);
        self.active_detail = Some(section);

        self.load_section(section).await;
    }

    /// Slide the open detail panel out; the header and tab strip come
    /// back only after the slide finishes.
    pub async fn close_detail_section(&mut self) {
        let Some(section) = self.active_detail.take() else {
            return;
        };
        info!(section = %section, "Closing detail section");

        self.page.begin_detail_close(section);
        tokio::time::sleep(DETAIL_SLIDE).await;
        self.page.finish_detail_close(section);
        self.page.set_detail_marker(false);
    }

    /// Record a touch start for the pull and overscroll trackers.
    pub fn touch_start(&mut self, scroll_top: f64, y: f64) {
        self.rubber_start_y = y;
        self.pull.touch_start(scroll_top, y);
    }

    /// Track a touch move.
    ///
    /// Returns whether the page should suppress the browser's default
    /// move (the rubber-band bounce at scroll-top).
    pub fn touch_move(&mut self, scroll_top: f64, y: f64) -> bool {
        if let Some(visual) = self.pull.touch_move(scroll_top, y) {
            self.page.set_pull_visual(visual);
        }
        gesture::should_suppress_overscroll(scroll_top, self.rubber_start_y, y)
    }

    /// Finish a touch. Pull visuals reset immediately; a pull past the
    /// threshold then refreshes every core collection.
    pub async fn touch_end(&mut self) {
        let triggered = self.pull.release();
        self.page.reset_pull_visual();

        if triggered {
            info!("Pull past threshold, refreshing data");
            self.load_all_data().await;
        }
    }

    /// Spawn a press ripple on an interactive element.
    pub fn pointer_down(&mut self, target: Rect, x: f64, y: f64) {
        self.page.spawn_ripple(RippleSpec::for_press(&target, x, y));
    }

    /// Hand a post deletion to the page's collaborator and drop the card
    /// optimistically, without waiting for the outcome.
    pub fn delete_post(&mut self, post: &Post) {
        info!(post_id = post.id, "Deleting post");
        self.page
            .dispatch_delete_post(post.id, escape_html(&post.content));
        self.page.remove_post_card(post.id);
    }

    /// Load and render the Hackatime report for the selected member.
    pub async fn load_hackatime_projects(&mut self) {
        if !self.page.has_container(Container::HackatimeProjects) {
            return;
        }

        let member_id = self
            .page
            .selected_member_id()
            .filter(|id| !id.is_empty());
        let Some(member_id) = member_id else {
            self.paint(
                Container::HackatimeProjects,
                EmptyState::select_member().render(),
            );
            return;
        };

        self.paint(
            Container::HackatimeProjects,
            SectionLoading::new("Loading Hackatime projects...").render(),
        );

        match self.client.fetch_hackatime_projects(&member_id).await {
            Ok(report) => {
                let markup = if let Some(message) = report.error {
                    warn!(member_id = %member_id, error = %message, "Hackatime reported an error");
                    ErrorState::with_message("Unable to load projects", &message).render()
                } else {
                    let username = report.username.unwrap_or_default();
                    let projects = report.projects.unwrap_or_default();
                    if projects.is_empty() {
                        let subtext =
                            format!("{username} hasn't logged any coding time yet on Hackatime");
                        EmptyState::new("clock", "No projects found", &subtext).render()
                    } else {
                        HackatimeProjectList::new(&projects, &username).render()
                    }
                };
                self.paint(Container::HackatimeProjects, markup);
            }
            Err(e) => {
                error!(member_id = %member_id, error = %e, "Error loading Hackatime projects");
                self.paint(
                    Container::HackatimeProjects,
                    ErrorState::with_message(
                        "Error loading projects",
                        "Failed to fetch Hackatime data. Please try again.",
                    )
                    .render(),
                );
            }
        }
    }

    /// Current inline section.
    #[must_use]
    pub const fn current_section(&self) -> Section {
        self.current_section
    }

    /// Whether the initial load is still in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// The detail section currently open, if any.
    #[must_use]
    pub const fn active_detail(&self) -> Option<Section> {
        self.active_detail
    }

    #[must_use]
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> &DataStore {
        &self.store
    }

    #[must_use]
    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    async fn hide_loading_screen(&mut self) {
        self.page.begin_loading_fade();
        tokio::time::sleep(LOADING_FADE).await;
        self.page.finish_loading_fade();
        self.is_loading = false;
        self.page.trigger_entrance_effects();
    }

    async fn load_section(&mut self, section: Section) {
        match section {
            Section::Stream => self.load_posts().await,
            Section::Assignments => self.load_assignments().await,
            Section::Projects => self.load_projects().await,
            Section::Schedule => self.load_meetings().await,
            Section::Resources => self.load_resources().await,
            Section::Pizza => self.load_submissions().await,
            Section::Dashboard | Section::Shop | Section::Ysws | Section::Settings => {}
        }
    }

    async fn load_posts(&mut self) {
        if !self.page.has_container(Container::Posts) {
            return;
        }
        self.paint(Container::Posts, SectionLoading::new("Loading posts...").render());

        let token = self.store.begin_load(Endpoint::Posts);
        match self.client.fetch_collection(Endpoint::Posts).await {
            Ok(rows) => {
                if !self.store.commit(&token, rows) {
                    return;
                }
                let posts: Vec<Post> = decode_rows("posts", self.store.get(Endpoint::Posts));
                let markup = if posts.is_empty() {
                    EmptyState::no_posts().render()
                } else if self.config.is_leader {
                    PostList::new(&posts).with_delete_buttons().render()
                } else {
                    PostList::new(&posts).render()
                };
                self.paint(Container::Posts, markup);
            }
            Err(e) => self.paint_fetch_error(Container::Posts, "posts", &token, &e),
        }
    }

    async fn load_assignments(&mut self) {
        if !self.page.has_container(Container::Assignments) {
            return;
        }
        self.paint(
            Container::Assignments,
            SectionLoading::new("Loading assignments...").render(),
        );

        let token = self.store.begin_load(Endpoint::Assignments);
        match self.client.fetch_collection(Endpoint::Assignments).await {
            Ok(rows) => {
                if !self.store.commit(&token, rows) {
                    return;
                }
                let assignments: Vec<Assignment> =
                    decode_rows("assignments", self.store.get(Endpoint::Assignments));
                let markup = if assignments.is_empty() {
                    EmptyState::no_assignments().render()
                } else {
                    AssignmentList::new(&assignments).render()
                };
                self.paint(Container::Assignments, markup);
            }
            Err(e) => self.paint_fetch_error(Container::Assignments, "assignments", &token, &e),
        }
    }

    async fn load_meetings(&mut self) {
        if !self.page.has_container(Container::Meetings) {
            return;
        }
        self.paint(
            Container::Meetings,
            SectionLoading::new("Loading meetings...").render(),
        );

        let token = self.store.begin_load(Endpoint::Meetings);
        match self.client.fetch_collection(Endpoint::Meetings).await {
            Ok(rows) => {
                if !self.store.commit(&token, rows) {
                    return;
                }
                let meetings: Vec<Meeting> =
                    decode_rows("meetings", self.store.get(Endpoint::Meetings));
                let markup = if meetings.is_empty() {
                    EmptyState::no_meetings().render()
                } else {
                    MeetingList::new(&meetings).render()
                };
                self.paint(Container::Meetings, markup);
            }
            Err(e) => self.paint_fetch_error(Container::Meetings, "meetings", &token, &e),
        }
    }

    async fn load_resources(&mut self) {
        if !self.page.has_container(Container::Resources) {
            return;
        }
        self.paint(
            Container::Resources,
            SectionLoading::new("Loading resources...").render(),
        );

        let token = self.store.begin_load(Endpoint::Resources);
        match self.client.fetch_collection(Endpoint::Resources).await {
            Ok(rows) => {
                if !self.store.commit(&token, rows) {
                    return;
                }
                let resources: Vec<Resource> =
                    decode_rows("resources", self.store.get(Endpoint::Resources));
                let markup = if resources.is_empty() {
                    EmptyState::no_resources().render()
                } else {
                    ResourceList::new(&resources).render()
                };
                self.paint(Container::Resources, markup);
            }
            Err(e) => self.paint_fetch_error(Container::Resources, "resources", &token, &e),
        }
    }

    async fn load_submissions(&mut self) {
        if !self.page.has_container(Container::Submissions) {
            return;
        }
        self.paint(
            Container::Submissions,
            SectionLoading::new("Loading submissions...").render(),
        );

        let token = self.store.begin_load(Endpoint::Submissions);
        match self.client.fetch_collection(Endpoint::Submissions).await {
            Ok(rows) => {
                if !self.store.commit(&token, rows) {
                    return;
                }
                let submissions: Vec<Submission> =
                    decode_rows("submissions", self.store.get(Endpoint::Submissions));
                let markup = if submissions.is_empty() {
                    EmptyState::no_submissions().render()
                } else {
                    SubmissionList::new(&submissions).render()
                };
                self.paint(Container::Submissions, markup);
            }
            Err(e) => self.paint_fetch_error(Container::Submissions, "submissions", &token, &e),
        }
    }

    /// Projects feed the stat cards only; there is no projects container.
    async fn load_projects(&mut self) {
        let token = self.store.begin_load(Endpoint::Projects);
        match self.client.fetch_collection(Endpoint::Projects).await {
            Ok(rows) => {
                if self.store.commit(&token, rows) {
                    self.push_stats();
                }
            }
            Err(e) => {
                error!(endpoint = %Endpoint::Projects, error = %e, "Error loading projects");
            }
        }
    }

    fn push_stats(&mut self) {
        self.page.update_stats(StatCounts {
            posts: self.store.count(Endpoint::Posts),
            assignments: self.store.count(Endpoint::Assignments),
            meetings: self.store.count(Endpoint::Meetings),
            projects: self.store.count(Endpoint::Projects),
        });
    }

    fn paint(&mut self, container: Container, markup: Markup) {
        self.page.set_container_html(container, markup.into_string());
    }

    /// Paint an error fragment, unless a newer load owns the container.
    fn paint_fetch_error(
        &mut self,
        container: Container,
        thing: &str,
        token: &LoadToken,
        error: &ApiError,
    ) {
        error!(endpoint = %token.endpoint(), error = %error, "Collection fetch failed");
        if !self.store.is_current(token) {
            return;
        }
        self.paint(container, ErrorState::for_fetch(thing, error).render());
    }
}
