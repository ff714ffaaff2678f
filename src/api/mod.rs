//! HTTP client for the club dashboard backend.
//!
//! Collection endpoints live under `/api/clubs/{clubId}/{endpoint}` and
//! answer with one of several envelope shapes (see [`normalize`]); the
//! Hackatime report lives under its own path and reports failures in the
//! body rather than via HTTP status.

pub mod normalize;
pub mod store;

use std::time::Duration;

use serde_json::Value;
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::config::DashboardConfig;
use crate::model::HackatimeReport;

pub use normalize::normalize_collection;
pub use store::{DataStore, LoadToken};

/// Backend collection names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Posts,
    Assignments,
    Meetings,
    Projects,
    Resources,
    Submissions,
}

impl Endpoint {
    /// The four collections fetched together at startup and on refresh.
    pub const CORE: [Self; 4] = [
        Self::Posts,
        Self::Assignments,
        Self::Meetings,
        Self::Projects,
    ];

    /// Path segment and envelope key for this collection.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Posts => "posts",
            Self::Assignments => "assignments",
            Self::Meetings => "meetings",
            Self::Projects => "projects",
            Self::Resources => "resources",
            Self::Submissions => "submissions",
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failures crossing the HTTP boundary, tagged at the failure site.
///
/// `Status` and `Body` are deliberately distinct variants: the renderer
/// picks its diagnostic hint from the variant, never from message text.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid backend origin {origin:?}: {source}")]
    InvalidOrigin {
        origin: String,
        #[source]
        source: url::ParseError,
    },
    #[error("request for {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("request for {endpoint} returned status {status}")]
    Status {
        endpoint: String,
        status: reqwest::StatusCode,
    },
    #[error("response body for {endpoint} is not valid JSON: {source}")]
    Body {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Client for the dashboard backend.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    origin: String,
    club_id: String,
}

impl ApiClient {
    /// Create a client for the backend at `origin`.
    ///
    /// An unset club id degrades to an empty path segment (the request is
    /// still attempted and fails at the backend), matching how the page
    /// behaves when its config element is missing.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidOrigin`] when `origin` is not a valid URL.
    pub fn new(origin: &str, config: &DashboardConfig) -> Result<Self, ApiError> {
        Url::parse(origin).map_err(|source| ApiError::InvalidOrigin {
            origin: origin.to_string(),
            source,
        })?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Ok(Self {
            http,
            origin: origin.trim_end_matches('/').to_string(),
            club_id: config.club_id.clone().unwrap_or_default(),
        })
    }

    /// Fetch one collection and normalize it into a row list.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] on network failure,
    /// [`ApiError::Status`] on a non-success status, and [`ApiError::Body`]
    /// when the body is not valid JSON.
    pub async fn fetch_collection(&self, endpoint: Endpoint) -> Result<Vec<Value>, ApiError> {
        let url = format!(
            "{}/api/clubs/{}/{}",
            self.origin,
            urlencoding::encode(&self.club_id),
            endpoint
        );
        debug!(url = %url, endpoint = %endpoint, "Fetching collection");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                endpoint: endpoint.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                endpoint: endpoint.to_string(),
                status,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| ApiError::Transport {
                endpoint: endpoint.to_string(),
                source,
            })?;

        let payload: Value = serde_json::from_str(&body).map_err(|source| ApiError::Body {
            endpoint: endpoint.to_string(),
            source,
        })?;

        let rows = normalize::normalize_collection(endpoint.as_str(), payload);
        debug!(endpoint = %endpoint, rows = rows.len(), "Fetched collection");

        Ok(rows)
    }

    /// Fetch a member's Hackatime project report.
    ///
    /// The HTTP status is not checked: the upstream reports its own
    /// failures in the body's `error` field, and that body arrives with
    /// non-success statuses too.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] on network failure and
    /// [`ApiError::Body`] when the body does not decode as a report.
    pub async fn fetch_hackatime_projects(
        &self,
        member_id: &str,
    ) -> Result<HackatimeReport, ApiError> {
        const ENDPOINT: &str = "hackatime/projects";

        let url = format!(
            "{}/api/hackatime/projects/{}",
            self.origin,
            urlencoding::encode(member_id)
        );
        debug!(url = %url, member_id = %member_id, "Fetching Hackatime projects");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                endpoint: ENDPOINT.to_string(),
                source,
            })?;

        let body = response
            .text()
            .await
            .map_err(|source| ApiError::Transport {
                endpoint: ENDPOINT.to_string(),
                source,
            })?;

        serde_json::from_str(&body).map_err(|source| ApiError::Body {
            endpoint: ENDPOINT.to_string(),
            source,
        })
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("origin", &self.origin)
            .field("club_id", &self.club_id)
            .finish()
    }
}
