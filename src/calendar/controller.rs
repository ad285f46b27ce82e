//! The calendar's stateful core.
//!
//! All state changes are explicit reducer-style methods so the whole layer
//! is testable without a UI harness or a live backend: navigation returns a
//! `FetchRequest` describing the window the host must load, and the host
//! feeds the result back through `apply_fetch`. Async convenience methods
//! own the adapter calls for hosts that don't need overlapping requests.
//!
//! Two pieces of bookkeeping keep the display consistent:
//! - every issued fetch carries a generation number; responses for any
//!   generation but the latest are discarded unrendered (last-window-wins),
//! - cancelled item ids stay in a pending set until the next authoritative
//!   fetch lands, so a slow response can never resurrect a cancelled post.

use std::collections::HashSet;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::calendar::filter::ItemFilter;
use crate::calendar::view::{CalendarView, ViewMode};
use crate::error::{AppError, AppResult};
use crate::models::{PostStatus, ScheduledItem};
use crate::services::api::PostingApiService;

/// A fetch the host must perform for the current window, stamped with the
/// generation that `apply_fetch` checks against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub seq: u64,
    pub user_id: String,
    pub date: NaiveDate,
}

pub type FetchOutcome = AppResult<Vec<ScheduledItem>>;

#[derive(Debug)]
pub struct CalendarController {
    api: PostingApiService,
    user_id: String,
    view: CalendarView,
    filter: ItemFilter,
    items: Vec<ScheduledItem>,
    selected: Option<String>,
    issued_seq: u64,
    pending_removals: HashSet<String>,
}

impl CalendarController {
    /// `today` seeds the anchor; the caller supplies it so the controller
    /// stays deterministic under test.
    pub fn new(api: PostingApiService, user_id: String, today: NaiveDate) -> AppResult<Self> {
        if user_id.is_empty() {
            return Err(AppError::Validation("user id must not be empty".to_string()));
        }

        Ok(Self {
            api,
            user_id,
            view: CalendarView::new(ViewMode::Month, today),
            filter: ItemFilter::new(),
            items: Vec::new(),
            selected: None,
            issued_seq: 0,
            pending_removals: HashSet::new(),
        })
    }

    pub fn view(&self) -> &CalendarView {
        &self.view
    }

    pub fn filter(&self) -> ItemFilter {
        self.filter
    }

    /// Replace the active filter. Filtering derives a view at read time, so
    /// no re-fetch is needed.
    pub fn set_filter(&mut self, filter: ItemFilter) {
        self.filter = filter;
    }

    // ========================================================================
    // Navigation (each transition obligates a re-fetch)
    // ========================================================================

    pub fn next_period(&mut self) -> FetchRequest {
        self.view.next_period();
        self.refresh()
    }

    pub fn prev_period(&mut self) -> FetchRequest {
        self.view.prev_period();
        self.refresh()
    }

    pub fn set_mode(&mut self, mode: ViewMode) -> FetchRequest {
        self.view.set_mode(mode);
        self.refresh()
    }

    pub fn go_today(&mut self, today: NaiveDate) -> FetchRequest {
        self.view.go_today(today);
        self.refresh()
    }

    /// Issue a fetch for the current window. Any previously issued fetch
    /// becomes stale from this point on.
    pub fn refresh(&mut self) -> FetchRequest {
        self.issued_seq += 1;
        FetchRequest {
            seq: self.issued_seq,
            user_id: self.user_id.clone(),
            date: self.view.fetch_anchor(),
        }
    }

    // ========================================================================
    // Reducers
    // ========================================================================

    /// Apply the outcome of the fetch stamped `seq`. Returns whether the
    /// outcome was applied; responses for anything but the latest issued
    /// generation are discarded unrendered.
    pub fn apply_fetch(&mut self, seq: u64, outcome: FetchOutcome) -> bool {
        if seq != self.issued_seq {
            debug!(
                "Discarding stale fetch response (seq {}, latest {})",
                seq, self.issued_seq
            );
            return false;
        }

        match outcome {
            Ok(mut items) => {
                // A response issued after a cancel is authoritative; strip
                // anything still pending and forget the pending set.
                items.retain(|item| !self.pending_removals.contains(&item.id));
                self.pending_removals.clear();
                self.items = items;
            }
            Err(e) => {
                warn!("Failed to fetch calendar window: {:?}", e);
                self.items.clear();
            }
        }

        // Drop a selection that no longer resolves to an item
        let selection_alive = match self.selected.as_deref() {
            Some(id) => self.items.iter().any(|item| item.id == id),
            None => false,
        };
        if !selection_alive {
            self.selected = None;
        }

        true
    }

    /// Optimistically remove a cancelled item and return the reconciling
    /// fetch. `None` when the id is not in the current set.
    pub fn apply_cancel(&mut self, id: &str) -> Option<FetchRequest> {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        if self.items.len() == before {
            return None;
        }

        self.pending_removals.insert(id.to_string());
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }

        Some(self.refresh())
    }

    // ========================================================================
    // Selection (detail modal state)
    // ========================================================================

    /// Select an item for detail display. Unknown ids are ignored.
    pub fn select(&mut self, id: &str) {
        if self.items.iter().any(|item| item.id == id) {
            self.selected = Some(id.to_string());
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected_item(&self) -> Option<&ScheduledItem> {
        let id = self.selected.as_deref()?;
        self.items.iter().find(|item| item.id == id)
    }

    // ========================================================================
    // Derived views
    // ========================================================================

    /// The filtered view of the current item set. Never mutates the
    /// underlying collection.
    pub fn visible_items(&self) -> Vec<&ScheduledItem> {
        self.filter.apply(&self.items)
    }

    /// Visible items bucketed into a single calendar cell.
    pub fn items_for(&self, date: NaiveDate) -> Vec<&ScheduledItem> {
        self.visible_items()
            .into_iter()
            .filter(|item| item.date == date)
            .collect()
    }

    // ========================================================================
    // Async conveniences (single outstanding request per call)
    // ========================================================================

    /// Fetch and apply the current window. Fetch failures degrade to an
    /// empty grid rather than propagating to the render path.
    pub async fn refresh_now(&mut self) {
        let request = self.refresh();
        let outcome = self.api.fetch_weekly(&request.user_id, request.date).await;
        self.apply_fetch(request.seq, outcome);
    }

    /// Cancel a scheduled item: confirm with the backend, remove it locally,
    /// then re-fetch to reconcile with server truth.
    pub async fn cancel(&mut self, id: &str) -> AppResult<()> {
        let item = self
            .items
            .iter()
            .find(|item| item.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("post {}", id)))?;

        if item.status != PostStatus::Scheduled {
            return Err(AppError::Validation(format!(
                "post {} is not scheduled and cannot be cancelled",
                id
            )));
        }

        self.api.cancel_scheduled(&self.user_id, &item).await?;

        let Some(reconcile) = self.apply_cancel(id) else {
            return Ok(());
        };
        let outcome = self
            .api
            .fetch_weekly(&reconcile.user_id, reconcile.date)
            .await;
        self.apply_fetch(reconcile.seq, outcome);
        Ok(())
    }
}
