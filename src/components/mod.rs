//! Maud HTML components for the dashboard fragments.
//!
//! Every component is a pure value implementing [`maud::Render`]: data in,
//! fragment out, no DOM access. The page layer decides which container a
//! rendered fragment lands in. Submodules:
//!
//! - `cards`: per-entity cards and their list wrappers
//! - `state`: empty, error, and loading fragments
//! - `format`: date, thousands, and escaping helpers
//!
//! # Example
//!
//! ```ignore
//! use maud::Render;
//! use crate::components::{PostList, EmptyState};
//!
//! let html = if posts.is_empty() {
//!     EmptyState::no_posts().render().into_string()
//! } else {
//!     PostList::new(&posts).render().into_string()
//! };
//! ```

pub mod cards;
pub mod format;
pub mod state;

// Re-export card components
pub use cards::{
    AssignmentCard, AssignmentList, HackatimeProjectCard, HackatimeProjectList, MeetingCard,
    MeetingList, PostCard, PostList, ResourceCard, ResourceList, SubmissionCard, SubmissionList,
};

// Re-export state fragments
pub use state::{EmptyState, ErrorState, SectionLoading};

// Re-export formatting helpers
pub use format::{escape_html, format_date, group_thousands};
