//! Card components for the dashboard collections.
//!
//! One card per entity, plus list wrappers that concatenate cards in fetch
//! order. All user-supplied text goes through maud's auto-escaping; the
//! single exception is a post's backend-sanitized `content_html`, which is
//! inserted verbatim to avoid double-escaping.

use maud::{html, Markup, PreEscaped, Render};

use crate::components::format::{escape_html, format_date, group_thousands};
use crate::model::{Assignment, HackatimeProject, Meeting, Post, Resource, Submission};

/// A post card for the club stream.
///
/// # Example
///
/// ```ignore
/// use crate::components::cards::PostCard;
///
/// let card = PostCard::new(&post).with_delete_button();
/// ```
#[derive(Debug, Clone)]
pub struct PostCard<'a> {
    pub post: &'a Post,
    pub show_delete_button: bool,
}

impl<'a> PostCard<'a> {
    /// Create a new post card.
    #[must_use]
    pub const fn new(post: &'a Post) -> Self {
        Self {
            post,
            show_delete_button: false,
        }
    }

    /// Show the leader-only delete button.
    #[must_use]
    pub const fn with_delete_button(mut self) -> Self {
        self.show_delete_button = true;
        self
    }
}

impl Render for PostCard<'_> {
    fn render(&self) -> Markup {
        let post = self.post;
        let username = post.user.username.as_deref().unwrap_or("Unknown");
        let display_name = post.user.display_name.as_deref().unwrap_or(username);
        let initial = post
            .user
            .username
            .as_deref()
            .and_then(|name| name.chars().next())
            .map_or_else(|| "?".to_string(), |c| c.to_uppercase().to_string());

        // content_html is already sanitized by the backend; raw content is
        // escaped here and only then gets its newlines turned into breaks.
        let body = match &post.content_html {
            Some(pre_rendered) => pre_rendered.clone(),
            None => escape_html(&post.content).replace('\n', "<br>"),
        };

        html! {
            div class="mobile-card post-card" {
                div class="post-header" {
                    div class="post-author" {
                        div class="post-avatar" { (initial) }
                        div {
                            div class="post-author-name" { (display_name) }
                            div class="post-date" { (format_date(&post.created_at)) }
                        }
                    }
                    @if self.show_delete_button {
                        button class="delete-post-btn"
                            data-post-id=(post.id)
                            data-post-content=(post.content) {
                            i class="fas fa-trash" {}
                        }
                    }
                }
                div class="mobile-post-content" { (PreEscaped(body)) }
            }
        }
    }
}

/// An assignment card with an optional due-date badge.
#[derive(Debug, Clone)]
pub struct AssignmentCard<'a> {
    pub assignment: &'a Assignment,
}

impl<'a> AssignmentCard<'a> {
    #[must_use]
    pub const fn new(assignment: &'a Assignment) -> Self {
        Self { assignment }
    }
}

impl Render for AssignmentCard<'_> {
    fn render(&self) -> Markup {
        let assignment = self.assignment;

        html! {
            div class="mobile-card assignment-card" {
                div class="card-heading" {
                    h4 { i class="fas fa-tasks" {} " " (assignment.title) }
                    @if let Some(due) = &assignment.due_date {
                        span class="due-badge" { "Due " (format_date(due)) }
                    }
                }
                @if !assignment.description.is_empty() {
                    p class="card-description" { (assignment.description) }
                }
            }
        }
    }
}

/// A meeting card with date badge and optional location row.
#[derive(Debug, Clone)]
pub struct MeetingCard<'a> {
    pub meeting: &'a Meeting,
}

impl<'a> MeetingCard<'a> {
    #[must_use]
    pub const fn new(meeting: &'a Meeting) -> Self {
        Self { meeting }
    }
}

impl Render for MeetingCard<'_> {
    fn render(&self) -> Markup {
        let meeting = self.meeting;
        let description = meeting
            .description
            .as_deref()
            .unwrap_or("No description provided");

        html! {
            div class="mobile-card meeting-card" {
                div class="card-heading" {
                    h4 { i class="fas fa-calendar" {} " " (meeting.title) }
                    span class="date-badge" { (format_date(&meeting.datetime)) }
                }
                p class="card-description" { (description) }
                @if let Some(location) = &meeting.location {
                    div class="card-location" {
                        i class="fas fa-map-marker-alt" {} " " (location)
                    }
                }
            }
        }
    }
}

/// A resource card linking out to the shared material.
#[derive(Debug, Clone)]
pub struct ResourceCard<'a> {
    pub resource: &'a Resource,
}

impl<'a> ResourceCard<'a> {
    #[must_use]
    pub const fn new(resource: &'a Resource) -> Self {
        Self { resource }
    }
}

impl Render for ResourceCard<'_> {
    fn render(&self) -> Markup {
        let resource = self.resource;
        let description = resource
            .description
            .as_deref()
            .unwrap_or("No description provided");

        html! {
            div class="mobile-card resource-card" {
                div class="card-heading" {
                    h4 { i class="fas fa-book" {} " " (resource.title) }
                }
                p class="card-description" { (description) }
                a class="card-link" href=(resource.url) target="_blank" {
                    i class="fas fa-external-link-alt" {} " Open Resource"
                }
            }
        }
    }
}

/// A submission card for the pizza grant section.
#[derive(Debug, Clone)]
pub struct SubmissionCard<'a> {
    pub submission: &'a Submission,
}

impl<'a> SubmissionCard<'a> {
    #[must_use]
    pub const fn new(submission: &'a Submission) -> Self {
        Self { submission }
    }
}

impl Render for SubmissionCard<'_> {
    fn render(&self) -> Markup {
        let submission = self.submission;

        html! {
            div class="mobile-card submission-card" {
                div class="card-heading" {
                    h4 { i class="fas fa-pizza-slice" {} " " (submission.title) }
                    @if let Some(status) = &submission.status {
                        span class="status-badge" { (status) }
                    }
                }
                @if let Some(description) = &submission.description {
                    p class="card-description" { (description) }
                }
                @if let Some(url) = &submission.url {
                    a class="card-link" href=(url) target="_blank" {
                        i class="fas fa-external-link-alt" {} " View Submission"
                    }
                }
            }
        }
    }
}

/// One Hackatime project with its tracked-time badge.
#[derive(Debug, Clone)]
pub struct HackatimeProjectCard<'a> {
    pub project: &'a HackatimeProject,
}

impl<'a> HackatimeProjectCard<'a> {
    #[must_use]
    pub const fn new(project: &'a HackatimeProject) -> Self {
        Self { project }
    }
}

impl Render for HackatimeProjectCard<'_> {
    fn render(&self) -> Markup {
        let project = self.project;
        // A missing or zero percent hides the share row entirely.
        let percent = project.percent.filter(|p| *p > 0.0);

        html! {
            div class="mobile-card hackatime-project-card" {
                div class="card-heading" {
                    h4 { i class="fas fa-code" {} " " (project.name) }
                    span class="time-badge" { (project.formatted_time) }
                }
                div class="hackatime-meta" {
                    span class="hackatime-seconds" {
                        i class="fas fa-clock" {} " " (group_thousands(project.total_seconds)) " seconds"
                    }
                    @if let Some(percent) = percent {
                        span class="hackatime-percent" {
                            i class="fas fa-chart-pie" {} " " (format!("{percent:.1}")) "% of total time"
                        }
                    }
                }
            }
        }
    }
}

/// Stream posts in fetch order.
#[derive(Debug, Clone)]
pub struct PostList<'a> {
    pub posts: &'a [Post],
    pub show_delete_buttons: bool,
}

impl<'a> PostList<'a> {
    #[must_use]
    pub const fn new(posts: &'a [Post]) -> Self {
        Self {
            posts,
            show_delete_buttons: false,
        }
    }

    /// Show delete buttons on every card.
    #[must_use]
    pub const fn with_delete_buttons(mut self) -> Self {
        self.show_delete_buttons = true;
        self
    }
}

impl Render for PostList<'_> {
    fn render(&self) -> Markup {
        html! {
            @for post in self.posts {
                @if self.show_delete_buttons {
                    (PostCard::new(post).with_delete_button())
                } @else {
                    (PostCard::new(post))
                }
            }
        }
    }
}

/// Assignments in fetch order.
#[derive(Debug, Clone)]
pub struct AssignmentList<'a> {
    pub assignments: &'a [Assignment],
}

impl<'a> AssignmentList<'a> {
    #[must_use]
    pub const fn new(assignments: &'a [Assignment]) -> Self {
        Self { assignments }
    }
}

impl Render for AssignmentList<'_> {
    fn render(&self) -> Markup {
        html! {
            @for assignment in self.assignments {
                (AssignmentCard::new(assignment))
            }
        }
    }
}

/// Meetings in fetch order.
#[derive(Debug, Clone)]
pub struct MeetingList<'a> {
    pub meetings: &'a [Meeting],
}

impl<'a> MeetingList<'a> {
    #[must_use]
    pub const fn new(meetings: &'a [Meeting]) -> Self {
        Self { meetings }
    }
}

impl Render for MeetingList<'_> {
    fn render(&self) -> Markup {
        html! {
            @for meeting in self.meetings {
                (MeetingCard::new(meeting))
            }
        }
    }
}

/// Resources in fetch order.
#[derive(Debug, Clone)]
pub struct ResourceList<'a> {
    pub resources: &'a [Resource],
}

impl<'a> ResourceList<'a> {
    #[must_use]
    pub const fn new(resources: &'a [Resource]) -> Self {
        Self { resources }
    }
}

impl Render for ResourceList<'_> {
    fn render(&self) -> Markup {
        html! {
            @for resource in self.resources {
                (ResourceCard::new(resource))
            }
        }
    }
}

/// Submissions in fetch order.
#[derive(Debug, Clone)]
pub struct SubmissionList<'a> {
    pub submissions: &'a [Submission],
}

impl<'a> SubmissionList<'a> {
    #[must_use]
    pub const fn new(submissions: &'a [Submission]) -> Self {
        Self { submissions }
    }
}

impl Render for SubmissionList<'_> {
    fn render(&self) -> Markup {
        html! {
            @for submission in self.submissions {
                (SubmissionCard::new(submission))
            }
        }
    }
}

/// A member's Hackatime projects under a named heading.
#[derive(Debug, Clone)]
pub struct HackatimeProjectList<'a> {
    pub projects: &'a [HackatimeProject],
    pub username: &'a str,
}

impl<'a> HackatimeProjectList<'a> {
    #[must_use]
    pub const fn new(projects: &'a [HackatimeProject], username: &'a str) -> Self {
        Self { projects, username }
    }
}

impl Render for HackatimeProjectList<'_> {
    fn render(&self) -> Markup {
        html! {
            h4 class="hackatime-heading" { (self.username) "'s Hackatime Projects" }
            @for project in self.projects {
                (HackatimeProjectCard::new(project))
            }
        }
    }
}
