//! Section routing and tab indicator geometry.

use crate::api::Endpoint;

/// Named sections of the dashboard page.
///
/// Inline sections swap within the main viewport and are tracked as the
/// current section. Detail sections slide in over the whole viewport and
/// never become current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Dashboard,
    Stream,
    Assignments,
    Projects,
    Schedule,
    Resources,
    Pizza,
    Shop,
    Ysws,
    Settings,
}

impl Section {
    /// Page-side name of this section.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Stream => "stream",
            Self::Assignments => "assignments",
            Self::Projects => "projects",
            Self::Schedule => "schedule",
            Self::Resources => "resources",
            Self::Pizza => "pizza",
            Self::Shop => "shop",
            Self::Ysws => "ysws",
            Self::Settings => "settings",
        }
    }

    /// Look a section up by its page-side name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "dashboard" => Some(Self::Dashboard),
            "stream" => Some(Self::Stream),
            "assignments" => Some(Self::Assignments),
            "projects" => Some(Self::Projects),
            "schedule" => Some(Self::Schedule),
            "resources" => Some(Self::Resources),
            "pizza" => Some(Self::Pizza),
            "shop" => Some(Self::Shop),
            "ysws" => Some(Self::Ysws),
            "settings" => Some(Self::Settings),
            _ => None,
        }
    }

    /// Whether this section opens as a full-viewport detail panel.
    #[must_use]
    pub const fn is_detail(self) -> bool {
        matches!(
            self,
            Self::Schedule | Self::Resources | Self::Pizza | Self::Shop | Self::Ysws | Self::Settings
        )
    }

    /// The collection this section paints, when it has one.
    #[must_use]
    pub const fn endpoint(self) -> Option<Endpoint> {
        match self {
            Self::Stream => Some(Endpoint::Posts),
            Self::Assignments => Some(Endpoint::Assignments),
            Self::Projects => Some(Endpoint::Projects),
            Self::Schedule => Some(Endpoint::Meetings),
            Self::Resources => Some(Endpoint::Resources),
            Self::Pizza => Some(Endpoint::Submissions),
            Self::Dashboard | Self::Shop | Self::Ysws | Self::Settings => None,
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bounding box of a page element, in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Largest of width and height.
    #[must_use]
    pub fn max_dimension(&self) -> f64 {
        self.width.max(self.height)
    }
}

/// Where the sliding active-tab indicator should sit within the tab strip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorPlacement {
    /// Horizontal offset from the strip's left edge.
    pub translate_x: f64,
    pub width: f64,
}

impl IndicatorPlacement {
    /// Position the indicator under `tab` within `strip`.
    #[must_use]
    pub fn compute(tab: &Rect, strip: &Rect) -> Self {
        Self {
            translate_x: tab.left - strip.left,
            width: tab.width,
        }
    }
}
