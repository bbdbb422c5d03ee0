//! Address search box behaviour.
//!
//! The box owns no timers. The caller reports each edit with the time it
//! happened and polls with the current time; a lookup is issued once the
//! query has been quiet for [`DEBOUNCE`]. Responses carry the ticket they
//! were issued with and only the latest one is shown.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::models::AddressCandidate;
use crate::requests::{LatestRequest, Ticket};

/// Quiet period after the last keystroke before a lookup is issued.
pub const DEBOUNCE: Duration = Duration::from_millis(300);

/// Shorter queries never reach the address service.
pub const MIN_QUERY_CHARS: usize = 3;

/// Most suggestions shown at once.
pub const MAX_RESULTS: usize = 7;

/// A lookup the caller should run against the address service.
pub type SearchTicket = Ticket<String>;

#[derive(Debug, Clone, Default)]
pub struct AddressSearchInput {
    query: String,
    last_edit: Option<Instant>,
    results: Vec<AddressCandidate>,
    selected: Option<AddressCandidate>,
    loading: bool,
    error: Option<String>,
    requests: LatestRequest<String>,
}

impl AddressSearchInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[AddressCandidate] {
        &self.results
    }

    pub fn selected(&self) -> Option<&AddressCandidate> {
        self.selected.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Suggestions are shown only while nothing is selected.
    pub fn shows_results(&self) -> bool {
        self.selected.is_none() && !self.results.is_empty()
    }

    /// Records an edit of the query at `now`.
    ///
    /// The box is read-only while a candidate is selected, so edits are
    /// ignored until the selection is cleared. Clearing the query removes
    /// any shown suggestions straight away.
    pub fn on_query_changed(
        &mut self,
        query: impl Into<String>,
        now: Instant,
    ) {
        if self.selected.is_some() {
            debug!("query edit ignored while an address is selected");
            return;
        }
        self.query = query.into();
        self.error = None;
        if self.query.is_empty() {
            self.last_edit = None;
            self.results.clear();
            self.loading = false;
            self.requests.invalidate();
        } else {
            self.last_edit = Some(now);
        }
    }

    /// Returns a lookup to run if the query has been quiet long enough.
    ///
    /// Each edit yields at most one lookup. Nothing is issued for queries
    /// shorter than [`MIN_QUERY_CHARS`] or while a candidate is selected.
    pub fn poll(
        &mut self,
        now: Instant,
    ) -> Option<SearchTicket> {
        let last_edit = self.last_edit?;
        if now.saturating_duration_since(last_edit) < DEBOUNCE {
            return None;
        }
        self.last_edit = None;

        if self.selected.is_some() || self.query.chars().count() < MIN_QUERY_CHARS {
            return None;
        }

        self.loading = true;
        let ticket = self.requests.issue(self.query.clone());
        debug!(%ticket, "address lookup issued");
        Some(ticket)
    }

    /// Time until the pending edit is due, if one is pending.
    pub fn time_until_due(
        &self,
        now: Instant,
    ) -> Option<Duration> {
        self.last_edit
            .map(|edit| DEBOUNCE.saturating_sub(now.saturating_duration_since(edit)))
    }

    /// Shows the suggestions for `ticket` unless a newer lookup was issued.
    /// Returns whether they were applied.
    pub fn apply_results(
        &mut self,
        ticket: &SearchTicket,
        mut results: Vec<AddressCandidate>,
    ) -> bool {
        if !self.requests.is_current(ticket) {
            debug!(%ticket, "stale address results dropped");
            return false;
        }
        self.loading = false;
        self.error = None;
        results.truncate(MAX_RESULTS);
        self.results = results;
        true
    }

    /// Records a failed lookup for `ticket` unless it was superseded.
    pub fn apply_failure(
        &mut self,
        ticket: &SearchTicket,
        message: impl Into<String>,
    ) -> bool {
        if !self.requests.is_current(ticket) {
            return false;
        }
        self.loading = false;
        self.error = Some(message.into());
        true
    }

    /// Picks suggestion `index`. The query shows the chosen text and no
    /// further lookups run until [`clear_selection`](Self::clear_selection).
    pub fn select(
        &mut self,
        index: usize,
    ) -> Option<&AddressCandidate> {
        let candidate = self.results.get(index)?.clone();
        self.query = candidate.text.clone();
        self.last_edit = None;
        self.loading = false;
        self.requests.invalidate();
        self.selected = Some(candidate);
        self.selected.as_ref()
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.query.clear();
        self.results.clear();
        self.last_edit = None;
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_support;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn candidates(n: usize) -> Vec<AddressCandidate> {
        (0..n)
            .map(|i| test_support::candidate(&format!("{i} High Street"), "Leeds LS1 4AP"))
            .collect()
    }

    #[test]
    fn nothing_issued_before_quiet_period() {
        let t0 = Instant::now();
        let mut input = AddressSearchInput::new();

        input.on_query_changed("NR32", t0);

        assert_eq!(input.poll(t0 + ms(299)), None);
        assert!(input.poll(t0 + ms(300)).is_some());
    }

    #[test]
    fn each_edit_restarts_the_quiet_period() {
        let t0 = Instant::now();
        let mut input = AddressSearchInput::new();

        input.on_query_changed("NR3", t0);
        input.on_query_changed("NR32", t0 + ms(200));

        assert_eq!(input.poll(t0 + ms(400)), None);
        let ticket = input.poll(t0 + ms(500)).unwrap();
        assert_eq!(ticket.key(), "NR32");
    }

    #[test]
    fn one_lookup_per_edit() {
        let t0 = Instant::now();
        let mut input = AddressSearchInput::new();
        input.on_query_changed("LS1 4", t0);

        assert!(input.poll(t0 + ms(300)).is_some());
        assert_eq!(input.poll(t0 + ms(900)), None);
    }

    #[test]
    fn short_query_never_issues_lookup() {
        let t0 = Instant::now();
        let mut input = AddressSearchInput::new();

        input.on_query_changed("LS", t0);

        assert_eq!(input.poll(t0 + ms(1_000)), None);
        assert!(!input.is_loading());
    }

    #[test]
    fn clearing_query_clears_results() {
        let t0 = Instant::now();
        let mut input = AddressSearchInput::new();
        input.on_query_changed("Leeds", t0);
        let ticket = input.poll(t0 + ms(300)).unwrap();
        input.apply_results(&ticket, candidates(2));

        input.on_query_changed("", t0 + ms(400));

        assert!(input.results().is_empty());
        assert_eq!(input.poll(t0 + ms(1_000)), None);
    }

    #[test]
    fn stale_response_is_dropped() {
        let t0 = Instant::now();
        let mut input = AddressSearchInput::new();
        input.on_query_changed("Lee", t0);
        let old = input.poll(t0 + ms(300)).unwrap();
        input.on_query_changed("Leeds", t0 + ms(350));
        let new = input.poll(t0 + ms(650)).unwrap();

        assert!(input.apply_results(&new, candidates(1)));
        assert!(!input.apply_results(&old, candidates(3)));
        assert_eq!(input.results().len(), 1);
    }

    #[test]
    fn results_capped_to_display_limit() {
        let t0 = Instant::now();
        let mut input = AddressSearchInput::new();
        input.on_query_changed("High Street", t0);
        let ticket = input.poll(t0 + ms(300)).unwrap();

        input.apply_results(&ticket, candidates(12));

        assert_eq!(input.results().len(), MAX_RESULTS);
    }

    #[test]
    fn selection_suppresses_lookups() {
        let t0 = Instant::now();
        let mut input = AddressSearchInput::new();
        input.on_query_changed("High", t0);
        let ticket = input.poll(t0 + ms(300)).unwrap();
        input.apply_results(&ticket, candidates(3));

        let selected = input.select(1).cloned().unwrap();
        input.on_query_changed("Something else", t0 + ms(400));

        assert_eq!(input.query(), selected.text);
        assert_eq!(input.poll(t0 + ms(2_000)), None);
        assert!(!input.shows_results());
    }

    #[test]
    fn clear_selection_allows_new_search() {
        let t0 = Instant::now();
        let mut input = AddressSearchInput::new();
        input.on_query_changed("High", t0);
        let ticket = input.poll(t0 + ms(300)).unwrap();
        input.apply_results(&ticket, candidates(3));
        input.select(0);

        input.clear_selection();
        input.on_query_changed("Park Lane", t0 + ms(500));

        assert_eq!(input.query(), "Park Lane");
        assert!(input.poll(t0 + ms(800)).is_some());
    }

    #[test]
    fn select_out_of_range_is_ignored() {
        let mut input = AddressSearchInput::new();

        assert_eq!(input.select(3), None);
        assert_eq!(input.selected(), None);
    }

    #[test]
    fn failure_is_recorded_for_current_ticket() {
        let t0 = Instant::now();
        let mut input = AddressSearchInput::new();
        input.on_query_changed("Leeds", t0);
        let ticket = input.poll(t0 + ms(300)).unwrap();

        assert!(input.apply_failure(&ticket, "timed out"));

        assert_eq!(input.error(), Some("timed out"));
        assert!(!input.is_loading());
    }

    #[test]
    fn time_until_due_counts_down() {
        let t0 = Instant::now();
        let mut input = AddressSearchInput::new();
        input.on_query_changed("Leeds", t0);

        assert_eq!(input.time_until_due(t0 + ms(100)), Some(ms(200)));
        assert_eq!(input.time_until_due(t0 + ms(400)), Some(Duration::ZERO));
    }
}
