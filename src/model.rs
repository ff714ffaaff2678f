//! Entity types decoded from backend collection payloads.
//!
//! All lists are transient: they live for the current page session and are
//! rebuilt from scratch on every fetch. Fields the renderer can survive
//! without carry `#[serde(default)]` so one absent field never costs a row;
//! rows that fail to decode entirely are skipped (see [`decode_rows`]).

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

/// Author block nested inside a post payload.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct PostAuthor {
    pub username: Option<String>,
    pub display_name: Option<String>,
}

/// A post in the club stream.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Post {
    /// Backend identity, required for deletion.
    pub id: i64,
    #[serde(default)]
    pub user: PostAuthor,
    /// Raw text content, always escaped at render time.
    #[serde(default)]
    pub content: String,
    /// Backend-sanitized HTML render, inserted verbatim when present.
    #[serde(default)]
    pub content_html: Option<String>,
    #[serde(default)]
    pub created_at: String,
}

/// A coding assignment.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Assignment {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub due_date: Option<String>,
}

/// A scheduled club meeting.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Meeting {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub datetime: String,
    #[serde(default)]
    pub location: Option<String>,
}

/// A shared link or learning material.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Resource {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: String,
}

/// A project submission (pizza grant entries).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Submission {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// One project entry in a member's Hackatime report.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HackatimeProject {
    pub name: String,
    #[serde(default)]
    pub formatted_time: String,
    #[serde(default)]
    pub total_seconds: u64,
    #[serde(default)]
    pub percent: Option<f64>,
}

/// Envelope returned by the Hackatime projects endpoint.
///
/// The upstream API reports its own failures in `error` rather than via
/// HTTP status, so every field is optional.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct HackatimeReport {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub projects: Option<Vec<HackatimeProject>>,
}

/// Decode normalized rows into entities, skipping rows that do not match.
///
/// A malformed row is logged and dropped; it never takes the rest of the
/// list down with it.
pub fn decode_rows<T: DeserializeOwned>(collection: &str, rows: &[Value]) -> Vec<T> {
    rows.iter()
        .enumerate()
        .filter_map(|(index, row)| match serde_json::from_value(row.clone()) {
            Ok(entity) => Some(entity),
            Err(e) => {
                warn!(collection = %collection, index, error = %e, "Skipping malformed row");
                None
            }
        })
        .collect()
}
