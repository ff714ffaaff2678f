//! Shared constants used across the controller.

use std::time::Duration;

/// Pull distance (in pixels) that must be exceeded to trigger a refresh.
pub const PULL_THRESHOLD: f64 = 80.0;

/// Factor applied to the pull distance when translating the content down.
pub const PULL_TRANSLATE_FACTOR: f64 = 0.5;

/// How long the full-screen loading overlay takes to fade out.
pub const LOADING_FADE: Duration = Duration::from_millis(300);

/// How long a detail section takes to slide out before it is hidden.
pub const DETAIL_SLIDE: Duration = Duration::from_millis(200);

/// How long a ripple stays in the DOM before removal.
pub const RIPPLE_DURATION: Duration = Duration::from_millis(400);

/// Ripple diameter as a multiple of the pressed element's largest dimension.
pub const RIPPLE_SCALE: f64 = 1.5;

/// Fixed path of the service worker script registered at startup.
pub const SERVICE_WORKER_PATH: &str = "/static/sw.js";
