//! Mobile club dashboard controller library.
//!
//! A headless controller for the mobile club-dashboard page: it extracts
//! page-embedded configuration, fetches club collections from the REST
//! backend, renders them into HTML fragments, and drives tab navigation and
//! touch gestures. All DOM effects flow through the [`page::Page`] trait so
//! the whole controller can run (and be tested) without a browser.

pub mod api;
pub mod components;
pub mod config;
pub mod constants;
pub mod controller;
pub mod gesture;
pub mod model;
pub mod nav;
pub mod page;
