//! Live search overlay state.

use crate::domain::PostSummary;

/// Which of the overlay's mutually exclusive panels is visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Show {
    /// Empty or whitespace-only term: nothing below the input.
    #[default]
    Neither,
    /// A term is pending or in flight.
    Loading,
    /// The latest accepted response.
    Results,
}

/// State owned by one mounted search overlay.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    /// Raw input as typed.
    pub search_term: String,

    /// Results of the most recent accepted request.
    pub results: Vec<PostSummary>,

    pub show: Show,

    /// Number of debounce firings so far. Each firing issues one request and
    /// this value is that request's sequence number.
    pub request_count: u64,
}

impl SearchState {
    /// Whether a completed search came back empty.
    #[must_use]
    pub fn is_empty_result(&self) -> bool {
        self.show == Show::Results && self.results.is_empty()
    }
}
