/// Semantic search state.
///
/// At most one search result set is ever live. Submitting while a request
/// is in flight supersedes it: the new request goes out immediately and
/// each request carries a sequence number, so a response is applied only if
/// it belongs to the most recently issued request. A stale response can
/// never overwrite a newer one, regardless of arrival order.

use crate::api::types::ImageRecord;
use crate::api::ApiError;

/// Quick search suggestions shown under the search bar
pub const QUICK_TERMS: [&str; 5] = ["sunset", "mountains", "ocean", "city", "nature"];

/// A search request tagged with its sequence number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub seq: u64,
    pub query: String,
}

#[derive(Debug, Default)]
pub struct Search {
    query: String,
    results: Vec<ImageRecord>,
    loading: bool,
    error: Option<String>,
    issued: u64,
    completed: bool,
}

impl Search {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: String) {
        self.query = query;
    }

    /// Issue a new search for the current query.
    /// An empty (or all-whitespace) query fails fast without a request.
    pub fn submit(&mut self) -> Option<SearchRequest> {
        let trimmed = self.query.trim();
        if trimmed.is_empty() {
            self.error = Some("Type something to search.".to_string());
            return None;
        }

        self.issued += 1;
        self.loading = true;
        Some(SearchRequest {
            seq: self.issued,
            query: trimmed.to_string(),
        })
    }

    /// Selecting a quick term is the same as typing it and submitting
    pub fn submit_term(&mut self, term: &str) -> Option<SearchRequest> {
        self.query = term.to_string();
        self.submit()
    }

    /// Apply a response for request `seq`. Responses that were superseded
    /// by a later submission are dropped.
    pub fn apply(&mut self, seq: u64, result: Result<Vec<ImageRecord>, ApiError>) {
        if seq != self.issued {
            return;
        }
        self.loading = false;

        match result {
            Ok(results) => {
                // Wholesale replacement, in the order the backend ranked them
                self.results = results;
                self.error = None;
                self.completed = true;
            }
            Err(err) => {
                // Previous results stay visible under the error line
                self.error = Some(err.to_string());
            }
        }
    }

    pub fn results(&self) -> &[ImageRecord] {
        &self.results
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether any search has completed; tells "no search yet" apart from
    /// "the last search returned nothing"
    pub fn has_searched(&self) -> bool {
        self.completed
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
            s3_url: String::new(),
            uploaded_at: None,
        }
    }

    #[test]
    fn test_empty_query_fails_fast() {
        let mut search = Search::new();
        search.set_query("   ".to_string());
        assert!(search.submit().is_none());
        assert!(search.error().is_some());
        assert!(!search.is_loading());
    }

    #[test]
    fn test_query_is_trimmed_before_sending() {
        let mut search = Search::new();
        search.set_query("  sunset  ".to_string());
        let request = search.submit().unwrap();
        assert_eq!(request.query, "sunset");
    }

    #[test]
    fn test_results_are_replaced_wholesale() {
        let mut search = Search::new();
        search.set_query("sunset".to_string());
        let first = search.submit().unwrap();
        search.apply(first.seq, Ok(vec![record(1), record(2)]));

        let second = search.submit().unwrap();
        search.apply(second.seq, Ok(vec![record(9)]));

        let ids: Vec<i64> = search.results().iter().map(|img| img.id).collect();
        assert_eq!(ids, vec![9]);
    }

    #[test]
    fn test_newer_submission_supersedes_older_response() {
        let mut search = Search::new();

        search.set_query("sunset".to_string());
        let sunset = search.submit().unwrap();

        // Submitted before the first request resolved
        search.set_query("ocean".to_string());
        let ocean = search.submit().unwrap();

        // "ocean" resolves first and wins; the late "sunset" reply is dropped
        search.apply(ocean.seq, Ok(vec![record(7)]));
        search.apply(sunset.seq, Ok(vec![record(1), record(2), record(3)]));

        let ids: Vec<i64> = search.results().iter().map(|img| img.id).collect();
        assert_eq!(ids, vec![7]);
        assert!(!search.is_loading());
    }

    #[test]
    fn test_stale_failure_cannot_clobber_newer_result() {
        let mut search = Search::new();

        search.set_query("sunset".to_string());
        let sunset = search.submit().unwrap();
        search.set_query("ocean".to_string());
        let ocean = search.submit().unwrap();

        search.apply(ocean.seq, Ok(vec![record(7)]));
        search.apply(sunset.seq, Err(ApiError::Transport("timeout".into())));

        assert!(search.error().is_none());
        assert_eq!(search.results().len(), 1);
    }

    #[test]
    fn test_failure_keeps_previous_results_visible() {
        let mut search = Search::new();
        search.set_query("sunset".to_string());
        let first = search.submit().unwrap();
        search.apply(first.seq, Ok(vec![record(1), record(2)]));

        let second = search.submit().unwrap();
        search.apply(second.seq, Err(ApiError::Backend("Search temporarily unavailable".into())));

        assert_eq!(search.results().len(), 2);
        assert_eq!(search.error(), Some("Search temporarily unavailable"));
        assert!(!search.is_loading());
    }

    #[test]
    fn test_quick_term_goes_through_the_same_contract() {
        let mut search = Search::new();
        let request = search.submit_term("mountains").unwrap();
        assert_eq!(request.query, "mountains");
        assert_eq!(search.query(), "mountains");
        assert!(search.is_loading());
    }

    #[test]
    fn test_zero_results_is_distinct_from_no_search_yet() {
        let mut search = Search::new();
        assert!(!search.has_searched());

        search.set_query("sunset".to_string());
        let request = search.submit().unwrap();
        search.apply(request.seq, Ok(vec![]));

        assert!(search.has_searched());
        assert!(search.results().is_empty());
        assert!(search.error().is_none());
    }

    #[test]
    fn test_success_clears_a_previous_error() {
        let mut search = Search::new();
        search.set_query("sunset".to_string());
        let first = search.submit().unwrap();
        search.apply(first.seq, Err(ApiError::Transport("down".into())));
        assert!(search.error().is_some());

        let second = search.submit().unwrap();
        search.apply(second.seq, Ok(vec![record(1)]));
        assert!(search.error().is_none());
    }
}
