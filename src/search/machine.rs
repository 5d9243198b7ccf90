//! Pure live search state machine.
//!
//! [`SearchMachine`] owns the [`SearchState`] and decides what the overlay
//! does next; it never touches a clock or the network. Every input returns the
//! [`SearchCommand`]s the driver must run, in order. A command that starts a
//! timer or a request is always preceded by the command that invalidates the
//! previous one, so there is at most one pending debounce and one in-flight
//! request at any time.
//!
//! # Transitions
//!
//! ```text
//! input(non-empty)   → show = Loading,  restart debounce
//! input(empty)       → show = Neither,  cancel debounce + request
//! debounce elapsed   → request_count += 1, cancel request, issue request
//! response(current)  → results, show = Results
//! response(stale)    → ignored
//! failure/cancelled  → ignored
//! Escape             → close overlay
//! ```

use super::state::{SearchState, Show};
use crate::domain::error::Result;
use crate::domain::PostSummary;
use crate::input::Key;

/// Side effects requested by the machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchCommand {
    /// Starts (or restarts) the debounce timer.
    ScheduleDebounce,
    /// Drops the pending debounce timer.
    CancelDebounce,
    /// Queries the backend for `term`; the reply must be fed back with `seq`.
    IssueRequest { seq: u64, term: String },
    /// Cancels the in-flight request.
    CancelRequest,
    /// Asks the state container to close the overlay.
    CloseOverlay,
}

/// Live search transition logic.
#[derive(Debug, Default)]
pub struct SearchMachine {
    state: SearchState,
    debounce_pending: bool,
    in_flight: Option<u64>,
}

impl SearchMachine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn state(&self) -> &SearchState {
        &self.state
    }

    /// Sequence number of the request whose reply would be accepted.
    #[must_use]
    pub const fn in_flight(&self) -> Option<u64> {
        self.in_flight
    }

    #[must_use]
    pub const fn debounce_pending(&self) -> bool {
        self.debounce_pending
    }

    /// Handles a change of the input field.
    pub fn on_input(&mut self, term: impl Into<String>) -> Vec<SearchCommand> {
        self.state.search_term = term.into();
        let mut commands = Vec::new();

        if self.debounce_pending {
            commands.push(SearchCommand::CancelDebounce);
            self.debounce_pending = false;
        }

        if self.state.search_term.trim().is_empty() {
            self.state.show = Show::Neither;
            if self.in_flight.take().is_some() {
                commands.push(SearchCommand::CancelRequest);
            }
        } else {
            self.state.show = Show::Loading;
            self.debounce_pending = true;
            commands.push(SearchCommand::ScheduleDebounce);
        }

        tracing::debug!(show = ?self.state.show, commands = commands.len(), "search input");
        commands
    }

    /// Handles the debounce timer firing.
    pub fn on_debounce_elapsed(&mut self) -> Vec<SearchCommand> {
        if !self.debounce_pending {
            return Vec::new();
        }
        self.debounce_pending = false;
        self.state.request_count += 1;

        let seq = self.state.request_count;
        let mut commands = Vec::with_capacity(2);
        if self.in_flight.replace(seq).is_some() {
            commands.push(SearchCommand::CancelRequest);
        }
        commands.push(SearchCommand::IssueRequest {
            seq,
            term: self.state.search_term.clone(),
        });

        tracing::debug!(seq, term = %self.state.search_term, "search request triggered");
        commands
    }

    /// Handles the reply to request `seq`. Returns whether state changed.
    ///
    /// Replies to superseded requests, failures and cancellations leave the
    /// state untouched.
    pub fn on_response(&mut self, seq: u64, result: Result<Vec<PostSummary>>) -> bool {
        if self.in_flight != Some(seq) {
            tracing::debug!(seq, current = ?self.in_flight, "discarding stale search response");
            return false;
        }
        self.in_flight = None;

        match result {
            Ok(results) => {
                tracing::debug!(seq, count = results.len(), "search results applied");
                self.state.results = results;
                self.state.show = Show::Results;
                true
            }
            Err(e) if e.is_cancelled() => {
                tracing::debug!(seq, "search request cancelled");
                false
            }
            Err(e) => {
                tracing::warn!(seq, error = %e, "search request failed");
                false
            }
        }
    }

    /// Handles a global key press.
    #[must_use]
    pub fn on_key(&self, key: Key) -> Vec<SearchCommand> {
        match key {
            Key::Escape => vec![SearchCommand::CloseOverlay],
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::AppError;
    use crate::domain::Author;
    use chrono::{TimeZone, Utc};

    fn summary(id: &str, title: &str) -> PostSummary {
        PostSummary {
            id: id.to_string(),
            title: title.to_string(),
            author: Author {
                username: "alice".to_string(),
                avatar: "a.png".to_string(),
            },
            created_date: Utc.with_ymd_and_hms(2024, 3, 9, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn typing_restarts_the_debounce() {
        let mut machine = SearchMachine::new();

        assert_eq!(machine.on_input("a"), vec![SearchCommand::ScheduleDebounce]);
        assert_eq!(
            machine.on_input("ab"),
            vec![SearchCommand::CancelDebounce, SearchCommand::ScheduleDebounce]
        );
        assert_eq!(machine.state().show, Show::Loading);

        assert_eq!(
            machine.on_debounce_elapsed(),
            vec![SearchCommand::IssueRequest {
                seq: 1,
                term: "ab".to_string()
            }]
        );
        assert_eq!(machine.state().request_count, 1);
    }

    #[test]
    fn blank_input_cancels_everything_and_issues_nothing() {
        let mut machine = SearchMachine::new();
        machine.on_input("rust");
        machine.on_debounce_elapsed();
        machine.on_input("again");

        let commands = machine.on_input("   ");

        assert_eq!(
            commands,
            vec![SearchCommand::CancelDebounce, SearchCommand::CancelRequest]
        );
        assert_eq!(machine.state().show, Show::Neither);
        assert!(machine.on_debounce_elapsed().is_empty());
        assert_eq!(machine.state().request_count, 1);
    }

    #[test]
    fn a_new_request_supersedes_the_previous_one() {
        let mut machine = SearchMachine::new();
        machine.on_input("ru");
        machine.on_debounce_elapsed();
        machine.on_input("rust");

        let commands = machine.on_debounce_elapsed();

        assert_eq!(commands[0], SearchCommand::CancelRequest);
        assert!(!machine.on_response(1, Ok(vec![summary("1", "stale")])));
        assert!(machine.on_response(2, Ok(vec![summary("2", "fresh")])));
        assert_eq!(machine.state().results[0].title, "fresh");
        assert_eq!(machine.state().show, Show::Results);
    }

    #[test]
    fn failures_do_not_mutate_state() {
        let mut machine = SearchMachine::new();
        machine.on_input("rust");
        machine.on_debounce_elapsed();
        let before = machine.state().clone();

        assert!(!machine.on_response(1, Err(AppError::Cancelled)));
        assert_eq!(machine.state(), &before);

        machine.on_input("rust!");
        machine.on_debounce_elapsed();
        assert!(!machine.on_response(2, Err(AppError::Unexpected("boom".to_string()))));
        assert_eq!(machine.state().show, Show::Loading);
        assert!(machine.state().results.is_empty());
    }

    #[test]
    fn empty_response_is_a_completed_search() {
        let mut machine = SearchMachine::new();
        machine.on_input("react");
        machine.on_debounce_elapsed();

        assert!(machine.on_response(1, Ok(Vec::new())));
        assert!(machine.state().is_empty_result());
    }

    #[test]
    fn escape_closes_the_overlay() {
        let machine = SearchMachine::new();

        assert_eq!(machine.on_key(Key::Escape), vec![SearchCommand::CloseOverlay]);
        assert!(machine.on_key(Key::Char('x')).is_empty());
    }
}
