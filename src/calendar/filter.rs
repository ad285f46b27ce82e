//! AND-composed display filters over the fetched item set.
//!
//! Filtering derives a view each time; it never mutates the underlying
//! collection, so re-applying the same filter is a no-op.

use chrono::NaiveDate;

use crate::models::{Platform, PostSource, PostStatus, ScheduledItem};

/// A filter over scheduled items. `None` in any field means "all".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemFilter {
    pub platform: Option<Platform>,
    pub status: Option<PostStatus>,
    pub date: Option<NaiveDate>,
    pub source: Option<PostSource>,
}

impl ItemFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    pub fn with_status(mut self, status: PostStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_source(mut self, source: PostSource) -> Self {
        self.source = Some(source);
        self
    }

    /// All set predicates must hold.
    pub fn matches(&self, item: &ScheduledItem) -> bool {
        self.platform.map_or(true, |p| item.platform == p)
            && self.status.map_or(true, |s| item.status == s)
            && self.date.map_or(true, |d| item.date == d)
            && self.source.map_or(true, |s| item.source == s)
    }

    /// Derive the filtered view of `items`.
    pub fn apply<'a>(&self, items: &'a [ScheduledItem]) -> Vec<&'a ScheduledItem> {
        items.iter().filter(|item| self.matches(item)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, platform: Platform, day: u32, status: PostStatus, source: PostSource) -> ScheduledItem {
        ScheduledItem {
            id: id.to_string(),
            platform,
            date: NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
            time: None,
            message: None,
            media_url: None,
            media_kind: None,
            status,
            source,
        }
    }

    fn sample() -> Vec<ScheduledItem> {
        vec![
            item("a", Platform::Facebook, 3, PostStatus::Scheduled, PostSource::Manual),
            item("b", Platform::Instagram, 3, PostStatus::Posted, PostSource::Automation),
            item("c", Platform::Facebook, 4, PostStatus::Failed, PostSource::Automation),
            item("d", Platform::Telegram, 5, PostStatus::Scheduled, PostSource::Manual),
        ]
    }

    #[test]
    fn empty_filter_matches_everything() {
        let items = sample();
        assert_eq!(ItemFilter::new().apply(&items).len(), items.len());
    }

    #[test]
    fn predicates_combine_with_and() {
        let items = sample();
        let filter = ItemFilter::new()
            .with_platform(Platform::Facebook)
            .with_source(PostSource::Automation);
        let visible = filter.apply(&items);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "c");
    }

    #[test]
    fn date_filter_is_exact_equality() {
        let items = sample();
        let filter = ItemFilter::new().with_date(NaiveDate::from_ymd_opt(2024, 6, 3).unwrap());
        let visible = filter.apply(&items);
        assert_eq!(visible.len(), 2);
    }

    #[test]
    fn failed_items_are_not_dropped_by_default() {
        let items = sample();
        let visible = ItemFilter::new().apply(&items);
        assert!(visible.iter().any(|i| i.status == PostStatus::Failed));
    }

    #[test]
    fn filtering_is_idempotent() {
        let items = sample();
        let filter = ItemFilter::new().with_source(PostSource::Manual);
        let once: Vec<String> = filter.apply(&items).iter().map(|i| i.id.clone()).collect();

        let once_owned: Vec<ScheduledItem> =
            filter.apply(&items).into_iter().cloned().collect();
        let twice: Vec<String> = filter
            .apply(&once_owned)
            .iter()
            .map(|i| i.id.clone())
            .collect();

        assert_eq!(once, twice);
    }
}
