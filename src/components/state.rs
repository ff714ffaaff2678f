//! Empty, error, and loading fragments for collection containers.
//!
//! The three states carry distinct root classes so a container is never
//! ambiguous about which one it shows.

use maud::{html, Markup, Render};

use crate::api::ApiError;

/// Informational fragment for a collection with nothing in it.
#[derive(Debug, Clone)]
pub struct EmptyState<'a> {
    pub icon: &'a str,
    pub headline: &'a str,
    pub subtext: &'a str,
}

impl<'a> EmptyState<'a> {
    #[must_use]
    pub const fn new(icon: &'a str, headline: &'a str, subtext: &'a str) -> Self {
        Self {
            icon,
            headline,
            subtext,
        }
    }

    #[must_use]
    pub const fn no_posts() -> Self {
        Self::new("stream", "No posts yet", "Be the first to share something!")
    }

    #[must_use]
    pub const fn no_assignments() -> Self {
        Self::new(
            "tasks",
            "No assignments yet",
            "Check back for new coding challenges!",
        )
    }

    #[must_use]
    pub const fn no_meetings() -> Self {
        Self::new(
            "calendar-times",
            "No meetings scheduled",
            "Check back for upcoming events!",
        )
    }

    #[must_use]
    pub const fn no_resources() -> Self {
        Self::new("book", "No resources yet", "Add helpful links and materials!")
    }

    #[must_use]
    pub const fn no_submissions() -> Self {
        Self::new(
            "pizza-slice",
            "No submissions yet",
            "Ship a project to earn a pizza grant!",
        )
    }

    /// Shown in the Hackatime container before a member is picked.
    #[must_use]
    pub const fn select_member() -> Self {
        Self::new(
            "user",
            "Select a member",
            "Choose a member to view their coding projects",
        )
    }
}

impl Render for EmptyState<'_> {
    fn render(&self) -> Markup {
        html! {
            div class="empty-state" {
                i class=(format!("fas fa-{}", self.icon)) {}
                h4 class="empty-state-headline" { (self.headline) }
                p class="empty-state-subtext" { (self.subtext) }
            }
        }
    }
}

/// Fragment shown when a load failed.
///
/// Carries only a generic headline and a short hint; full diagnostic
/// detail belongs in the operator log, never here.
#[derive(Debug, Clone)]
pub struct ErrorState {
    headline: String,
    hint: String,
}

impl ErrorState {
    /// Fragment for a failed collection fetch.
    ///
    /// The hint is picked from the error variant: a body that was not
    /// JSON points at the server, everything else gets the generic
    /// retry-later message.
    #[must_use]
    pub fn for_fetch(thing: &str, error: &ApiError) -> Self {
        let hint = match error {
            ApiError::Body { .. } => "Server error - check console for details",
            _ => "Please try again later",
        };
        Self {
            headline: format!("Error loading {thing}"),
            hint: hint.to_string(),
        }
    }

    /// Fragment with an explicit headline and message, for failures the
    /// upstream reports itself.
    #[must_use]
    pub fn with_message(headline: &str, message: &str) -> Self {
        Self {
            headline: headline.to_string(),
            hint: message.to_string(),
        }
    }
}

impl Render for ErrorState {
    fn render(&self) -> Markup {
        html! {
            div class="empty-state error-state" {
                i class="fas fa-exclamation-triangle" {}
                h4 class="empty-state-headline" { (self.headline) }
                p class="empty-state-subtext" { (self.hint) }
            }
        }
    }
}

/// In-container spinner shown while a section's fetch is in flight.
#[derive(Debug, Clone)]
pub struct SectionLoading<'a> {
    pub message: &'a str,
}

impl<'a> SectionLoading<'a> {
    #[must_use]
    pub const fn new(message: &'a str) -> Self {
        Self { message }
    }
}

impl Render for SectionLoading<'_> {
    fn render(&self) -> Markup {
        html! {
            div class="section-loading" {
                div class="loading-spinner" {}
                p class="section-loading-message" { (self.message) }
            }
        }
    }
}
