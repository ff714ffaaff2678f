//! Integration tests for the dashboard controller, driven through a
//! headless page.

use mobile_club_dashboard::config::DashboardConfig;
use mobile_club_dashboard::controller::MobileDashboard;
use mobile_club_dashboard::model::{Post, PostAuthor};
use mobile_club_dashboard::nav::{Rect, Section};
use mobile_club_dashboard::page::{Container, HeadlessPage, StatCounts, ToastKind};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn leader_config() -> DashboardConfig {
    DashboardConfig {
        club_id: Some("club-7".to_string()),
        join_code: Some("JOIN42".to_string()),
        is_leader: true,
    }
}

fn member_config() -> DashboardConfig {
    DashboardConfig {
        is_leader: false,
        ..leader_config()
    }
}

fn dashboard_for(server: &MockServer, config: DashboardConfig) -> MobileDashboard<HeadlessPage> {
    MobileDashboard::new(&server.uri(), config, HeadlessPage::new())
        .expect("Failed to create dashboard")
}

async fn mount_collection(server: &MockServer, endpoint: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/api/clubs/club-7/{endpoint}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_empty(server: &MockServer, endpoints: &[&str]) {
    for endpoint in endpoints {
        mount_collection(server, endpoint, json!([])).await;
    }
}

/// Mount all four startup collections as empty, each expected exactly
/// `expect` times.
async fn mount_empty_core(server: &MockServer, expect: u64) {
    for endpoint in ["posts", "assignments", "meetings", "projects"] {
        Mock::given(method("GET"))
            .and(path(format!("/api/clubs/club-7/{endpoint}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(expect)
            .mount(server)
            .await;
    }
}

fn sample_posts() -> Value {
    json!([
        {
            "id": 1,
            "user": {"username": "zara", "display_name": "Zara Q"},
            "content": "First meeting is Friday!",
            "created_at": "2024-03-01T18:00:00Z",
        },
        {
            "id": 2,
            "user": {"username": "finn"},
            "content": "I shipped my game",
            "created_at": "2024-03-02T10:30:00Z",
        },
    ])
}

#[tokio::test]
async fn test_init_loads_core_data_and_hides_overlay() {
    let mock_server = MockServer::start().await;
    mount_collection(&mock_server, "posts", sample_posts()).await;
    mount_collection(&mock_server, "assignments", json!([{"title": "Build a game"}])).await;
    mount_collection(&mock_server, "meetings", json!([])).await;
    mount_collection(
        &mock_server,
        "projects",
        json!([{"name": "a"}, {"name": "b"}, {"name": "c"}]),
    )
    .await;

    let mut dashboard = dashboard_for(&mock_server, leader_config());
    dashboard.init().await;

    assert!(!dashboard.is_loading());
    let page = dashboard.page();
    assert!(page.loading_screen_shown);
    assert!(page.loading_fade_begun);
    assert!(page.loading_fade_finished);
    assert_eq!(page.entrance_effects, 1);
    assert_eq!(page.registered_worker.as_deref(), Some("/static/sw.js"));
    assert!(page.install_prompt_suppressed);
    assert!(page.toasts.is_empty(), "No toast on a clean load");
    assert_eq!(
        page.stats.last(),
        Some(&StatCounts {
            posts: 2,
            assignments: 1,
            meetings: 0,
            projects: 3,
        })
    );
}

#[tokio::test]
async fn test_init_failure_toasts_and_keeps_successes() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/clubs/club-7/posts"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    mount_collection(&mock_server, "assignments", json!([{"title": "Build a game"}])).await;
    mount_empty(&mock_server, &["meetings", "projects"]).await;

    let mut dashboard = dashboard_for(&mock_server, leader_config());
    dashboard.init().await;

    // The overlay never gets stuck, even on failure.
    assert!(!dashboard.is_loading());
    assert_eq!(
        dashboard.page().toasts,
        vec![("Error loading data".to_string(), ToastKind::Error)]
    );
    assert_eq!(
        dashboard.page().stats.last(),
        Some(&StatCounts {
            posts: 0,
            assignments: 1,
            meetings: 0,
            projects: 0,
        })
    );
}

#[tokio::test]
async fn test_single_toast_when_several_fetches_fail() {
    let mock_server = MockServer::start().await;
    for endpoint in ["posts", "meetings"] {
        Mock::given(method("GET"))
            .and(path(format!("/api/clubs/club-7/{endpoint}")))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;
    }
    mount_empty(&mock_server, &["assignments", "projects"]).await;

    let mut dashboard = dashboard_for(&mock_server, leader_config());
    dashboard.init().await;

    assert_eq!(dashboard.page().toasts.len(), 1);
}

#[tokio::test]
async fn test_open_tab_renders_posts_with_delete_buttons_for_leader() {
    let mock_server = MockServer::start().await;
    mount_collection(&mock_server, "posts", sample_posts()).await;
    mount_empty(&mock_server, &["assignments", "meetings", "projects"]).await;

    let mut dashboard = dashboard_for(&mock_server, leader_config());
    dashboard.init().await;
    dashboard.open_tab(Section::Stream).await;

    assert_eq!(dashboard.current_section(), Section::Stream);
    assert_eq!(dashboard.page().active_tab, Some(Section::Stream));
    assert_eq!(dashboard.page().active_section, Some(Section::Stream));

    let html = dashboard.page().container_html(Container::Posts);
    assert!(html.contains("First meeting is Friday!"));
    assert!(html.contains("Zara Q"));
    assert!(html.contains("Mar 1, 2024"));
    assert!(html.contains("delete-post-btn"));
}

#[tokio::test]
async fn test_members_see_no_delete_buttons() {
    let mock_server = MockServer::start().await;
    mount_collection(&mock_server, "posts", sample_posts()).await;
    mount_empty(&mock_server, &["assignments", "meetings", "projects"]).await;

    let mut dashboard = dashboard_for(&mock_server, member_config());
    dashboard.init().await;
    dashboard.open_tab(Section::Stream).await;

    let html = dashboard.page().container_html(Container::Posts);
    assert!(html.contains("I shipped my game"));
    assert!(!html.contains("delete-post-btn"));
}

#[tokio::test]
async fn test_open_tab_places_indicator_from_geometry() {
    let mock_server = MockServer::start().await;
    mount_empty(&mock_server, &["posts", "assignments", "meetings", "projects"]).await;

    let mut dashboard = dashboard_for(&mock_server, leader_config());
    dashboard
        .page_mut()
        .set_tab_strip_rect(Rect::new(10.0, 0.0, 400.0, 48.0));
    dashboard
        .page_mut()
        .set_tab_rect(Section::Stream, Rect::new(100.0, 0.0, 80.0, 48.0));
    dashboard.init().await;
    dashboard.open_tab(Section::Stream).await;

    let indicator = dashboard.page().indicator.expect("Indicator not placed");
    assert!((indicator.translate_x - 90.0).abs() < f64::EPSILON);
    assert!((indicator.width - 80.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_open_tab_ignored_while_loading() {
    let mock_server = MockServer::start().await;

    let mut dashboard = dashboard_for(&mock_server, leader_config());
    // No init: the initial load is still considered in flight.
    dashboard.open_tab(Section::Stream).await;

    assert_eq!(dashboard.current_section(), Section::Dashboard);
    assert_eq!(dashboard.page().active_tab, None);
    assert!(dashboard.page().containers.is_empty());
}

#[tokio::test]
async fn test_unknown_section_name_is_ignored() {
    let mock_server = MockServer::start().await;
    mount_empty_core(&mock_server, 1).await;

    let mut dashboard = dashboard_for(&mock_server, leader_config());
    dashboard.init().await;
    dashboard.open_tab_by_name("bogus").await;

    assert_eq!(dashboard.current_section(), Section::Dashboard);
}

#[tokio::test]
async fn test_empty_collections_render_empty_states() {
    let mock_server = MockServer::start().await;
    mount_collection(&mock_server, "assignments", json!({"items": []})).await;
    mount_empty(
        &mock_server,
        &["posts", "meetings", "projects", "resources", "submissions"],
    )
    .await;

    let mut dashboard = dashboard_for(&mock_server, leader_config());
    dashboard.init().await;

    dashboard.open_tab(Section::Stream).await;
    dashboard.open_tab(Section::Assignments).await;
    dashboard.open_tab(Section::Schedule).await;
    dashboard.open_tab(Section::Resources).await;
    dashboard.open_tab(Section::Pizza).await;

    let page = dashboard.page();
    assert!(page.container_html(Container::Posts).contains("No posts yet"));
    assert!(page
        .container_html(Container::Posts)
        .contains("Be the first to share something!"));
    assert!(page
        .container_html(Container::Assignments)
        .contains("No assignments yet"));
    assert!(page
        .container_html(Container::Meetings)
        .contains("No meetings scheduled"));
    assert!(page
        .container_html(Container::Resources)
        .contains("No resources yet"));
    assert!(page
        .container_html(Container::Submissions)
        .contains("No submissions yet"));
    for container in [
        Container::Posts,
        Container::Assignments,
        Container::Meetings,
        Container::Resources,
        Container::Submissions,
    ] {
        assert!(
            !page.container_html(container).contains("error-state"),
            "Empty data is not an error"
        );
    }
}

#[tokio::test]
async fn test_http_error_paints_error_state() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/clubs/club-7/posts"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    mount_empty(&mock_server, &["assignments", "meetings", "projects"]).await;

    let mut dashboard = dashboard_for(&mock_server, leader_config());
    dashboard.init().await;
    dashboard.open_tab(Section::Stream).await;

    let html = dashboard.page().container_html(Container::Posts);
    assert!(html.contains("Error loading posts"));
    assert!(html.contains("Please try again later"));
}

#[tokio::test]
async fn test_undecodable_body_mentions_console() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/clubs/club-7/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html>oops</html>", "text/html"))
        .mount(&mock_server)
        .await;
    mount_empty(&mock_server, &["assignments", "meetings", "projects"]).await;

    let mut dashboard = dashboard_for(&mock_server, leader_config());
    dashboard.init().await;
    dashboard.open_tab(Section::Stream).await;

    let html = dashboard.page().container_html(Container::Posts);
    assert!(html.contains("Error loading posts"));
    assert!(html.contains("Server error - check console for details"));
}

#[tokio::test]
async fn test_post_content_is_escaped() {
    let mock_server = MockServer::start().await;
    mount_collection(
        &mock_server,
        "posts",
        json!([{
            "id": 5,
            "user": {"username": "mallory"},
            "content": "<script>alert('x')</script>\nsecond line",
            "created_at": "2024-03-01T18:00:00Z",
        }]),
    )
    .await;
    mount_empty(&mock_server, &["assignments", "meetings", "projects"]).await;

    let mut dashboard = dashboard_for(&mock_server, member_config());
    dashboard.init().await;
    dashboard.open_tab(Section::Stream).await;

    let html = dashboard.page().container_html(Container::Posts);
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
    assert!(html.contains("<br>"), "Newlines become line breaks");
}

#[tokio::test]
async fn test_server_rendered_content_html_is_trusted() {
    let mock_server = MockServer::start().await;
    mount_collection(
        &mock_server,
        "posts",
        json!([{
            "id": 6,
            "user": {"username": "zara"},
            "content": "plain",
            "content_html": "<strong>already rendered</strong>",
            "created_at": "2024-03-01T18:00:00Z",
        }]),
    )
    .await;
    mount_empty(&mock_server, &["assignments", "meetings", "projects"]).await;

    let mut dashboard = dashboard_for(&mock_server, member_config());
    dashboard.init().await;
    dashboard.open_tab(Section::Stream).await;

    let html = dashboard.page().container_html(Container::Posts);
    assert!(html.contains("<strong>already rendered</strong>"));
}

#[tokio::test]
async fn test_detail_section_opens_as_overlay() {
    let mock_server = MockServer::start().await;
    mount_empty(&mock_server, &["posts", "assignments", "meetings", "projects"]).await;

    let mut dashboard = dashboard_for(&mock_server, leader_config());
    dashboard.init().await;
    dashboard.open_tab(Section::Schedule).await;

    // Details overlay the page; the inline section stays where it was.
    assert_eq!(dashboard.current_section(), Section::Dashboard);
    assert_eq!(dashboard.active_detail(), Some(Section::Schedule));
    assert_eq!(dashboard.page().opened_details, vec![Section::Schedule]);
    assert!(dashboard.page().detail_marker);
    assert_eq!(dashboard.page().active_tab, None);
}

#[tokio::test]
async fn test_close_detail_clears_marker_after_slide() {
    let mock_server = MockServer::start().await;
    mount_empty(&mock_server, &["posts", "assignments", "meetings", "projects"]).await;

    let mut dashboard = dashboard_for(&mock_server, leader_config());
    dashboard.init().await;
    dashboard.open_tab(Section::Schedule).await;
    dashboard.close_detail_section().await;

    assert_eq!(dashboard.active_detail(), None);
    assert_eq!(dashboard.page().closed_details, vec![Section::Schedule]);
    assert!(!dashboard.page().detail_marker);

    // Closing with nothing open changes nothing.
    dashboard.close_detail_section().await;
    assert_eq!(dashboard.page().closed_details.len(), 1);
}

#[tokio::test]
async fn test_pull_at_threshold_does_not_refresh() {
    let mock_server = MockServer::start().await;
    mount_empty_core(&mock_server, 1).await;

    let mut dashboard = dashboard_for(&mock_server, leader_config());
    dashboard.init().await;

    // Distance lands exactly on the threshold; the trigger is strict.
    dashboard.touch_start(0.0, 10.0);
    dashboard.touch_move(0.0, 90.0);
    dashboard.touch_end().await;

    assert!(!dashboard.page().pull_visuals.is_empty());
    assert_eq!(dashboard.page().pull_resets, 1);
    assert_eq!(dashboard.page().stats.len(), 1, "No second load");
}

#[tokio::test]
async fn test_pull_past_threshold_refreshes() {
    let mock_server = MockServer::start().await;
    mount_empty_core(&mock_server, 2).await;

    let mut dashboard = dashboard_for(&mock_server, leader_config());
    dashboard.init().await;

    dashboard.touch_start(0.0, 10.0);
    dashboard.touch_move(0.0, 95.0);
    dashboard.touch_end().await;

    assert_eq!(dashboard.page().pull_resets, 1);
    assert_eq!(dashboard.page().stats.len(), 2, "Refresh pushes stats again");
}

#[tokio::test]
async fn test_pull_ignored_when_scrolled_down() {
    let mock_server = MockServer::start().await;
    mount_empty_core(&mock_server, 1).await;

    let mut dashboard = dashboard_for(&mock_server, leader_config());
    dashboard.init().await;

    dashboard.touch_start(140.0, 10.0);
    dashboard.touch_move(0.0, 300.0);
    dashboard.touch_end().await;

    assert!(dashboard.page().pull_visuals.is_empty());
    assert_eq!(dashboard.page().stats.len(), 1);
}

#[tokio::test]
async fn test_overscroll_suppression_reported() {
    let mock_server = MockServer::start().await;
    mount_empty_core(&mock_server, 1).await;

    let mut dashboard = dashboard_for(&mock_server, leader_config());
    dashboard.init().await;

    dashboard.touch_start(0.0, 50.0);
    assert!(dashboard.touch_move(0.0, 70.0), "Downward at top suppresses");
    assert!(!dashboard.touch_move(5.0, 80.0), "Scrolled content does not");
    assert!(!dashboard.touch_move(0.0, 30.0), "Upward does not");
}

#[tokio::test]
async fn test_missing_container_skips_section_load() {
    let mock_server = MockServer::start().await;
    // Once for startup; the tab switch must not fetch again.
    mount_empty_core(&mock_server, 1).await;

    let mut dashboard = dashboard_for(&mock_server, leader_config());
    dashboard.init().await;
    dashboard.page_mut().remove_container(Container::Posts);
    dashboard.open_tab(Section::Stream).await;

    assert_eq!(dashboard.current_section(), Section::Stream);
    assert!(!dashboard.page().containers.contains_key(&Container::Posts));
}

#[tokio::test]
async fn test_pointer_down_spawns_ripple() {
    let mock_server = MockServer::start().await;

    let mut dashboard = dashboard_for(&mock_server, leader_config());
    dashboard.pointer_down(Rect::new(0.0, 0.0, 100.0, 40.0), 50.0, 20.0);

    let ripple = dashboard.page().ripples[0];
    assert!((ripple.size - 150.0).abs() < f64::EPSILON);
    assert!((ripple.x - (-25.0)).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_delete_post_dispatches_escaped_content() {
    let mock_server = MockServer::start().await;

    let mut dashboard = dashboard_for(&mock_server, leader_config());
    let post = Post {
        id: 9,
        user: PostAuthor {
            username: Some("zara".to_string()),
            display_name: None,
        },
        content: "<b>hi</b>".to_string(),
        content_html: None,
        created_at: "2024-03-01T18:00:00Z".to_string(),
    };
    dashboard.delete_post(&post);

    assert_eq!(
        dashboard.page().delete_dispatches,
        vec![(9, "&lt;b&gt;hi&lt;/b&gt;".to_string())]
    );
    assert_eq!(dashboard.page().removed_posts, vec![9]);
}

#[tokio::test]
async fn test_hackatime_requires_member_selection() {
    let mock_server = MockServer::start().await;

    let mut dashboard = dashboard_for(&mock_server, leader_config());
    dashboard.load_hackatime_projects().await;

    let html = dashboard.page().container_html(Container::HackatimeProjects);
    assert!(html.contains("Select a member"));
    assert!(html.contains("Choose a member to view their coding projects"));
}

#[tokio::test]
async fn test_hackatime_renders_projects() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/hackatime/projects/user-42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "username": "orpheus",
            "projects": [
                {"name": "game", "formatted_time": "3 hrs 2 mins", "total_seconds": 10930, "percent": 61.5},
            ],
        })))
        .mount(&mock_server)
        .await;

    let mut dashboard = dashboard_for(&mock_server, leader_config());
    dashboard.page_mut().select_member("user-42");
    dashboard.load_hackatime_projects().await;

    let html = dashboard.page().container_html(Container::HackatimeProjects);
    assert!(html.contains("orpheus's Hackatime Projects"));
    assert!(html.contains("game"));
    assert!(html.contains("3 hrs 2 mins"));
    assert!(html.contains("10,930"));
    assert!(html.contains("61.5% of total time"));
}

#[tokio::test]
async fn test_hackatime_reports_upstream_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/hackatime/projects/user-42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": "Rate limited",
        })))
        .mount(&mock_server)
        .await;

    let mut dashboard = dashboard_for(&mock_server, leader_config());
    dashboard.page_mut().select_member("user-42");
    dashboard.load_hackatime_projects().await;

    let html = dashboard.page().container_html(Container::HackatimeProjects);
    assert!(html.contains("Unable to load projects"));
    assert!(html.contains("Rate limited"));
}

#[tokio::test]
async fn test_hackatime_empty_projects_message_names_member() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/hackatime/projects/user-42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "username": "finn",
            "projects": [],
        })))
        .mount(&mock_server)
        .await;

    let mut dashboard = dashboard_for(&mock_server, leader_config());
    dashboard.page_mut().select_member("user-42");
    dashboard.load_hackatime_projects().await;

    let html = dashboard.page().container_html(Container::HackatimeProjects);
    assert!(html.contains("No projects found"));
    assert!(html.contains("finn hasn't logged any coding time yet on Hackatime"));
}

#[tokio::test]
async fn test_hackatime_fetch_failure_paints_error_state() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/hackatime/projects/user-42"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("watwat", "text/plain"))
        .mount(&mock_server)
        .await;

    let mut dashboard = dashboard_for(&mock_server, leader_config());
    dashboard.page_mut().select_member("user-42");
    dashboard.load_hackatime_projects().await;

    let html = dashboard.page().container_html(Container::HackatimeProjects);
    assert!(html.contains("Error loading projects"));
    assert!(html.contains("Failed to fetch Hackatime data. Please try again."));
}
