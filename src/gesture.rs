//! Touch gesture state machines.
//!
//! Pure state only: the page layer feeds touch coordinates in and applies
//! the returned visuals, so threshold and easing math stay testable
//! without a browser.

use crate::constants::{PULL_THRESHOLD, PULL_TRANSLATE_FACTOR, RIPPLE_SCALE};
use crate::nav::Rect;

/// Element classes that get a ripple on press.
pub const RIPPLE_TARGETS: [&str; 7] = [
    ".mobile-btn-primary",
    ".quick-action-btn",
    ".stat-card",
    ".mobile-card",
    ".nav-tab",
    ".action-btn",
    ".member-card",
];

/// A transient expanding press highlight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RippleSpec {
    /// Diameter in pixels.
    pub size: f64,
    /// Left edge relative to the pressed element.
    pub x: f64,
    /// Top edge relative to the pressed element.
    pub y: f64,
}

impl RippleSpec {
    /// Size and place a ripple for a press at viewport point `(x, y)`.
    ///
    /// The ripple is centered on the pointer and sized to
    /// [`RIPPLE_SCALE`] times the element's largest dimension.
    #[must_use]
    pub fn for_press(target: &Rect, pointer_x: f64, pointer_y: f64) -> Self {
        let size = target.max_dimension() * RIPPLE_SCALE;
        Self {
            size,
            x: pointer_x - target.left - size / 2.0,
            y: pointer_y - target.top - size / 2.0,
        }
    }
}

/// Content translate and fade applied while pulling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PullVisual {
    pub translate_y: f64,
    pub opacity: f64,
}

/// Pull-to-refresh state machine.
///
/// Arms only while the scroll region sits at its top. Distance keeps
/// accumulating past the visual cap; only the visual stops updating there.
#[derive(Debug, Default)]
pub struct PullToRefresh {
    start_y: Option<f64>,
    distance: f64,
}

impl PullToRefresh {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a touch start. The gesture arms only at scroll-top.
    pub fn touch_start(&mut self, scroll_top: f64, y: f64) {
        if scroll_top == 0.0 {
            self.start_y = Some(y);
        }
    }

    /// Track a move. Returns the visual to apply, when one applies.
    pub fn touch_move(&mut self, scroll_top: f64, y: f64) -> Option<PullVisual> {
        let start_y = self.start_y?;
        if scroll_top != 0.0 {
            return None;
        }

        self.distance = y - start_y;
        if self.distance > 0.0 && self.distance < PULL_THRESHOLD * 2.0 {
            Some(PullVisual {
                translate_y: self.distance * PULL_TRANSLATE_FACTOR,
                opacity: 1.0 - (self.distance / PULL_THRESHOLD) * 0.3,
            })
        } else {
            None
        }
    }

    /// Finish the gesture and report whether a refresh should run.
    ///
    /// Strictly greater than [`PULL_THRESHOLD`]: a release at exactly the
    /// threshold does not refresh. State resets either way.
    pub fn release(&mut self) -> bool {
        let triggered = self.distance > PULL_THRESHOLD;
        self.start_y = None;
        self.distance = 0.0;
        triggered
    }
}

/// Whether a downward move at scroll-top should suppress the browser's
/// default rubber-band overscroll.
#[must_use]
pub fn should_suppress_overscroll(scroll_top: f64, start_y: f64, y: f64) -> bool {
    scroll_top == 0.0 && y > start_y
}
