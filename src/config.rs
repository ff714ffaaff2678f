//! Dashboard configuration extracted from the rendered page.
//!
//! The server templates the page with a `#mobileDashboard` host element
//! carrying `data-club-id` / `data-join-code`, and a `window.clubData`
//! script global describing the viewer. Extraction is silent: a page
//! without these simply yields an unset config, never an error.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use serde::Deserialize;
use tracing::{debug, warn};

static DASHBOARD_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("#mobileDashboard").expect("static selector is valid"));

static SCRIPT_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("script").expect("static selector is valid"));

/// Viewer block exposed by the page as `window.clubData`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ClubData {
    is_leader: bool,
}

/// Configuration the dashboard needs from the hosting page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Club identifier used to build collection URLs.
    pub club_id: Option<String>,
    /// Join code shown in the settings section.
    pub join_code: Option<String>,
    /// Whether the viewer leads this club (enables moderation controls).
    pub is_leader: bool,
}

impl DashboardConfig {
    /// Extract the configuration from the page document.
    ///
    /// Missing host element, missing `window.clubData` global, or a global
    /// that is not valid JSON all leave the corresponding fields unset.
    #[must_use]
    pub fn from_page(html: &str) -> Self {
        let document = Html::parse_document(html);

        let mut config = Self::default();

        if let Some(host) = document.select(&DASHBOARD_SELECTOR).next() {
            config.club_id = host.value().attr("data-club-id").map(str::to_string);
            config.join_code = host.value().attr("data-join-code").map(str::to_string);
        }

        for script in document.select(&SCRIPT_SELECTOR) {
            let source = script.text().collect::<String>();
            let Some(literal) = object_after_assignment(&source, "window.clubData") else {
                continue;
            };
            match serde_json::from_str::<ClubData>(literal) {
                Ok(club_data) => {
                    config.is_leader = club_data.is_leader;
                }
                Err(e) => {
                    warn!(error = %e, "window.clubData is not valid JSON, ignoring");
                }
            }
            break;
        }

        debug!(
            club_id = ?config.club_id,
            is_leader = config.is_leader,
            "Extracted dashboard config from page"
        );

        config
    }
}

/// Find the object literal assigned to `target` and return its source text.
///
/// Scans braces with string awareness so nested objects and `}` inside
/// string values do not end the literal early.
fn object_after_assignment<'a>(source: &'a str, target: &str) -> Option<&'a str> {
    let start = source.find(target)?;
    let rest = source[start + target.len()..].trim_start();
    let rest = rest.strip_prefix('=')?.trim_start();
    if !rest.starts_with('{') {
        return None;
    }

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in rest.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&rest[..=i]);
                }
            }
            _ => {}
        }
    }

    None
}
