//! Calendar view-model: pure date bucketing, the view window state machine,
//! display filters, and the stateful controller that ties them to the
//! posting backend.

pub mod controller;
pub mod filter;
pub mod grid;
pub mod view;

pub use self::controller::{CalendarController, FetchOutcome, FetchRequest};
pub use self::filter::ItemFilter;
pub use self::view::{CalendarView, ViewMode};
