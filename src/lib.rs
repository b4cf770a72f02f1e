//! Horizontal timeline of date-ranged items.
//!
//! The core lays items out into non-overlapping rows ([`layout`]) and drives
//! a debounced hover popup ([`focus`]). Both are plain data in, plain data
//! out; the [`ui`] and [`app`] modules are an egui renderer on top of them.

pub mod app;
pub mod config;
pub mod error;
pub mod focus;
pub mod io;
pub mod layout;
pub mod model;
pub mod ui;

pub use config::TimelineConfig;
pub use error::{Diagnostic, Result, TimelineError};
