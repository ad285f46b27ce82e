//! Content calendar view-model for the automated posting dashboard.
//!
//! Fetches scheduled and published posts for the visible date window,
//! buckets them into month/week/day grids, and tracks the window, filters
//! and detail selection as explicit state. The rendering layer on top of
//! this crate only reads derived views and forwards user events.

pub mod calendar;
pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use calendar::{CalendarController, CalendarView, FetchRequest, ItemFilter, ViewMode};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{MediaKind, Platform, PostSource, PostStatus, ScheduledItem};
pub use services::PostingApiService;
