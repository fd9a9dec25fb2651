/// Infinite-scroll gallery state machine.
///
/// The gallery accumulates pages of the remote collection into one
/// append-only list, de-duplicated by image id. It moves Idle → Loading →
/// Loaded/Failed, and from Loaded back into Loading for the next page while
/// keeping everything already shown. A failed first load shows an empty
/// gallery; a failed later load keeps the accumulated items and leaves
/// `has_more` true so the next proximity trigger retries.

use std::collections::HashSet;

use crate::api::types::{ImageRecord, PageResponse};
use crate::api::ApiError;

use super::pager::{PageRequest, Pager};

/// Pages requested from the backend; its own default
pub const PAGE_SIZE: u32 = 20;

/// A page request tagged with the mount epoch that issued it.
/// Responses carrying a stale epoch are dropped silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageFetch {
    pub epoch: u64,
    pub request: PageRequest,
}

#[derive(Debug)]
pub struct Gallery {
    pager: Pager,
    accumulated: Vec<ImageRecord>,
    seen: HashSet<i64>,
    current_page: u32,
    total: u64,
    started: bool,
    error: Option<String>,
    epoch: u64,
}

impl Gallery {
    pub fn new() -> Self {
        Self::with_page_size(PAGE_SIZE)
    }

    pub fn with_page_size(page_size: u32) -> Self {
        Gallery {
            pager: Pager::new(page_size),
            accumulated: Vec::new(),
            seen: HashSet::new(),
            current_page: 0,
            total: 0,
            started: false,
            error: None,
            epoch: 0,
        }
    }

    /// Start over for a fresh mount of the gallery view.
    /// Bumps the epoch so responses issued before the reset are ignored.
    pub fn reset(&mut self) {
        let page_size = self.pager.page_size();
        self.pager = Pager::new(page_size);
        self.accumulated.clear();
        self.seen.clear();
        self.current_page = 0;
        self.total = 0;
        self.started = false;
        self.error = None;
        self.epoch += 1;
    }

    /// Request page 1. Valid only before any load has been attempted.
    pub fn load_first_page(&mut self) -> Option<PageFetch> {
        if self.started {
            return None;
        }
        let request = self.pager.begin(1)?;
        self.started = true;
        Some(PageFetch {
            epoch: self.epoch,
            request,
        })
    }

    /// Request the next page. No-op while a fetch is outstanding or when
    /// the collection is exhausted, so duplicate scroll triggers are safe.
    pub fn load_next_page(&mut self) -> Option<PageFetch> {
        if !self.started || !self.has_more() {
            return None;
        }
        let request = self.pager.begin(self.current_page + 1)?;
        Some(PageFetch {
            epoch: self.epoch,
            request,
        })
    }

    /// User-initiated retry after a failure: re-issue the first page when
    /// nothing accumulated yet, otherwise fetch the next page.
    pub fn retry(&mut self) -> Option<PageFetch> {
        if self.pager.is_busy() {
            return None;
        }
        if self.accumulated.is_empty() {
            self.started = false;
            self.load_first_page()
        } else {
            self.load_next_page()
        }
    }

    /// Apply a page response. Items whose id was already seen are skipped;
    /// the backend can return overlapping pages while the collection is
    /// being mutated underneath us.
    pub fn apply(&mut self, fetch: PageFetch, result: Result<PageResponse, ApiError>) {
        if fetch.epoch != self.epoch {
            // The view this fetch belonged to is gone
            return;
        }
        self.pager.finish();

        match result {
            Ok(page) => {
                self.error = None;
                self.current_page = fetch.request.page;
                self.total = page.total;
                for item in page.items {
                    if self.seen.insert(item.id) {
                        self.accumulated.push(item);
                    }
                }
            }
            Err(err) => {
                self.error = Some(err.to_string());
            }
        }
    }

    pub fn images(&self) -> &[ImageRecord] {
        &self.accumulated
    }

    pub fn has_more(&self) -> bool {
        u64::from(self.current_page) * u64::from(self.pager.page_size()) < self.total
    }

    pub fn is_loading(&self) -> bool {
        self.pager.is_busy()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True once a page has come back reporting an empty collection.
    /// Distinct from "still loading" and from "failed to load".
    pub fn known_empty(&self) -> bool {
        self.started
            && !self.pager.is_busy()
            && self.error.is_none()
            && self.total == 0
            && self.accumulated.is_empty()
    }
}

impl Default for Gallery {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64) -> ImageRecord {
        ImageRecord {
            id,
            filename: format!("img_{id}.jpg"),
            caption: None,
            s3_url: format!("/static/{id}.jpg"),
            uploaded_at: None,
        }
    }

    fn page(ids: std::ops::Range<i64>, total: u64) -> PageResponse {
        PageResponse {
            items: ids.map(record).collect(),
            page: 0,
            total,
        }
    }

    #[test]
    fn test_walks_a_45_item_collection_in_pages_of_20() {
        let mut gallery = Gallery::new();

        let fetch = gallery.load_first_page().unwrap();
        assert_eq!(fetch.request.page, 1);
        gallery.apply(fetch, Ok(page(0..20, 45)));
        assert_eq!(gallery.images().len(), 20);
        assert!(gallery.has_more());

        let fetch = gallery.load_next_page().unwrap();
        assert_eq!(fetch.request.page, 2);
        gallery.apply(fetch, Ok(page(20..40, 45)));
        assert_eq!(gallery.images().len(), 40);
        assert!(gallery.has_more());

        let fetch = gallery.load_next_page().unwrap();
        assert_eq!(fetch.request.page, 3);
        gallery.apply(fetch, Ok(page(40..45, 45)));
        assert_eq!(gallery.images().len(), 45);
        assert!(!gallery.has_more());

        // Exhausted: further triggers are no-ops
        assert!(gallery.load_next_page().is_none());
    }

    #[test]
    fn test_first_load_is_only_valid_once() {
        let mut gallery = Gallery::new();
        assert!(gallery.load_first_page().is_some());
        assert!(gallery.load_first_page().is_none());
    }

    #[test]
    fn test_next_page_is_a_noop_while_loading() {
        let mut gallery = Gallery::new();
        let fetch = gallery.load_first_page().unwrap();
        gallery.apply(fetch, Ok(page(0..20, 45)));

        assert!(gallery.load_next_page().is_some());
        // The previous fetch has not resolved yet
        assert!(gallery.load_next_page().is_none());
    }

    #[test]
    fn test_overlapping_pages_are_deduplicated_in_first_seen_order() {
        let mut gallery = Gallery::new();
        let fetch = gallery.load_first_page().unwrap();
        gallery.apply(fetch, Ok(page(0..20, 40)));

        // The collection shifted server-side; page 2 overlaps page 1
        let fetch = gallery.load_next_page().unwrap();
        gallery.apply(fetch, Ok(page(15..35, 40)));

        let ids: Vec<i64> = gallery.images().iter().map(|img| img.id).collect();
        assert_eq!(ids.len(), 35);
        let expected: Vec<i64> = (0..35).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_failed_first_load_shows_an_empty_gallery() {
        let mut gallery = Gallery::new();
        let fetch = gallery.load_first_page().unwrap();
        gallery.apply(fetch, Err(ApiError::Transport("connection refused".into())));

        assert!(gallery.images().is_empty());
        assert!(gallery.error().is_some());
        assert!(!gallery.is_loading());
        assert!(!gallery.known_empty());
    }

    #[test]
    fn test_failed_next_load_keeps_accumulated_items_and_has_more() {
        let mut gallery = Gallery::new();
        let fetch = gallery.load_first_page().unwrap();
        gallery.apply(fetch, Ok(page(0..20, 45)));

        let fetch = gallery.load_next_page().unwrap();
        gallery.apply(fetch, Err(ApiError::Transport("timeout".into())));

        assert_eq!(gallery.images().len(), 20);
        assert!(gallery.error().is_some());
        // The next proximity trigger may retry
        assert!(gallery.has_more());
        assert!(gallery.load_next_page().is_some());
    }

    #[test]
    fn test_success_clears_a_previous_error() {
        let mut gallery = Gallery::new();
        let fetch = gallery.load_first_page().unwrap();
        gallery.apply(fetch, Ok(page(0..20, 45)));

        let fetch = gallery.load_next_page().unwrap();
        gallery.apply(fetch, Err(ApiError::Transport("timeout".into())));
        assert!(gallery.error().is_some());

        let fetch = gallery.load_next_page().unwrap();
        gallery.apply(fetch, Ok(page(20..40, 45)));
        assert!(gallery.error().is_none());
        assert_eq!(gallery.images().len(), 40);
    }

    #[test]
    fn test_stale_epoch_responses_are_dropped() {
        let mut gallery = Gallery::new();
        let fetch = gallery.load_first_page().unwrap();

        // The user navigated away and back before the response landed
        gallery.reset();
        gallery.apply(fetch, Ok(page(0..20, 45)));

        assert!(gallery.images().is_empty());
        assert!(gallery.error().is_none());
        assert!(!gallery.is_loading());
    }

    #[test]
    fn test_retry_reissues_first_page_when_nothing_accumulated() {
        let mut gallery = Gallery::new();
        let fetch = gallery.load_first_page().unwrap();
        gallery.apply(fetch, Err(ApiError::Transport("down".into())));

        let fetch = gallery.retry().unwrap();
        assert_eq!(fetch.request.page, 1);
        gallery.apply(fetch, Ok(page(0..20, 45)));
        assert_eq!(gallery.images().len(), 20);
    }

    #[test]
    fn test_retry_continues_from_current_page_otherwise() {
        let mut gallery = Gallery::new();
        let fetch = gallery.load_first_page().unwrap();
        gallery.apply(fetch, Ok(page(0..20, 45)));

        let fetch = gallery.load_next_page().unwrap();
        gallery.apply(fetch, Err(ApiError::Transport("down".into())));

        let fetch = gallery.retry().unwrap();
        assert_eq!(fetch.request.page, 2);
    }

    #[test]
    fn test_empty_collection_is_distinguishable_from_loading_and_failure() {
        let mut gallery = Gallery::new();
        assert!(!gallery.known_empty());

        let fetch = gallery.load_first_page().unwrap();
        assert!(gallery.is_loading());
        assert!(!gallery.known_empty());

        gallery.apply(fetch, Ok(page(0..0, 0)));
        assert!(gallery.known_empty());
        assert!(gallery.error().is_none());
        assert!(!gallery.has_more());
    }
}
