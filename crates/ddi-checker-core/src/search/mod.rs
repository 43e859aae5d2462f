//! Incremental drug search.
//!
//! Pipeline: input change → debounce → search request → suggestion list → pick

mod debounce;

pub use debounce::*;

use std::time::Duration;

use crate::error::ServiceResult;
use crate::labels;
use crate::models::Drug;
use crate::scheduler::TimerId;
use crate::sequence::{Sequencer, Ticket};

/// Contents of the suggestion dropdown.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SuggestionList {
    /// Nothing shown
    #[default]
    Hidden,
    /// Selectable candidates, in service order
    Candidates(Vec<Drug>),
    /// Search succeeded with zero matches
    NoResults,
    /// Search failed
    Failed,
}

/// One rendered row of the suggestion list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionEntry {
    pub label: String,
    pub selectable: bool,
}

impl SuggestionList {
    /// Rows to display. Placeholders are a single non-selectable row.
    pub fn entries(&self) -> Vec<SuggestionEntry> {
        let placeholder = |label: &str| {
            vec![SuggestionEntry {
                label: label.to_string(),
                selectable: false,
            }]
        };
        match self {
            SuggestionList::Hidden => Vec::new(),
            SuggestionList::Candidates(drugs) => drugs
                .iter()
                .map(|d| SuggestionEntry {
                    label: d.name.clone(),
                    selectable: true,
                })
                .collect(),
            SuggestionList::NoResults => placeholder(labels::NO_DRUGS_FOUND),
            SuggestionList::Failed => placeholder(labels::SEARCH_FAILED),
        }
    }

    pub fn is_hidden(&self) -> bool {
        matches!(self, SuggestionList::Hidden)
    }
}

/// Debounced search state for one input box.
#[derive(Debug)]
pub struct SuggestionController {
    debouncer: Debouncer,
    searches: Sequencer,
    list: SuggestionList,
}

impl SuggestionController {
    pub fn new(debounce: Duration) -> Self {
        Self {
            debouncer: Debouncer::new(debounce),
            searches: Sequencer::new(),
            list: SuggestionList::Hidden,
        }
    }

    pub fn debounce(&self) -> Duration {
        self.debouncer.delay()
    }

    pub fn list(&self) -> &SuggestionList {
        &self.list
    }

    /// Handle an input change.
    ///
    /// Blank input hides the list at once and supersedes any in-flight search.
    pub fn input(&mut self, raw: &str) -> DebounceStep {
        let step = self.debouncer.input(raw);
        if let DebounceStep::Cleared { .. } = step {
            self.searches.invalidate();
            self.list = SuggestionList::Hidden;
        }
        step
    }

    /// Handle a timer expiry. Returns the search to send, if the timer was live.
    pub fn timer_fired(&mut self, timer: TimerId) -> Option<(Ticket, String)> {
        let query = self.debouncer.fire(timer)?;
        Some((self.searches.issue(), query))
    }

    /// Apply a search response. Returns `false` if it was stale and dropped.
    pub fn apply_response(&mut self, ticket: Ticket, result: ServiceResult<Vec<Drug>>) -> bool {
        if !self.searches.is_latest(ticket) {
            return false;
        }
        self.list = match result {
            Ok(drugs) if drugs.is_empty() => SuggestionList::NoResults,
            Ok(drugs) => SuggestionList::Candidates(drugs),
            Err(_) => SuggestionList::Failed,
        };
        true
    }

    /// Take the candidate at `index` and reset the search.
    ///
    /// Returns `None` (and changes nothing) if there is no such candidate.
    pub fn pick(&mut self, index: usize) -> Option<(Drug, Option<TimerId>)> {
        let drug = match &self.list {
            SuggestionList::Candidates(drugs) => drugs.get(index)?.clone(),
            _ => return None,
        };
        Some((drug, self.reset()))
    }

    /// Forget the pending query, drop in-flight results and hide the list.
    /// Returns the timer to cancel, if one was armed.
    pub fn reset(&mut self) -> Option<TimerId> {
        self.searches.invalidate();
        self.list = SuggestionList::Hidden;
        self.debouncer.cancel()
    }
}

impl Default for SuggestionController {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;

    fn armed(step: DebounceStep) -> TimerId {
        match step {
            DebounceStep::Armed { timer, .. } => timer,
            other => panic!("expected armed, got {:?}", other),
        }
    }

    #[test]
    fn test_response_renders_candidates() {
        let mut suggest = SuggestionController::default();
        let timer = armed(suggest.input("asp"));
        let (ticket, query) = suggest.timer_fired(timer).unwrap();
        assert_eq!(query, "asp");

        assert!(suggest.apply_response(ticket, Ok(vec![Drug::new("aspirin")])));
        let entries = suggest.list().entries();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].selectable);
        assert_eq!(entries[0].label, "aspirin");
    }

    #[test]
    fn test_empty_response_is_placeholder() {
        let mut suggest = SuggestionController::default();
        let timer = armed(suggest.input("zzz"));
        let (ticket, _) = suggest.timer_fired(timer).unwrap();

        suggest.apply_response(ticket, Ok(vec![]));
        assert_eq!(suggest.list(), &SuggestionList::NoResults);
        let entries = suggest.list().entries();
        assert_eq!(entries.len(), 1);
        assert!(!entries[0].selectable);
        assert_eq!(entries[0].label, labels::NO_DRUGS_FOUND);
    }

    #[test]
    fn test_failure_is_placeholder() {
        let mut suggest = SuggestionController::default();
        let timer = armed(suggest.input("asp"));
        let (ticket, _) = suggest.timer_fired(timer).unwrap();

        suggest.apply_response(ticket, Err(ServiceError::Network("refused".into())));
        assert_eq!(suggest.list().entries()[0].label, labels::SEARCH_FAILED);
    }

    #[test]
    fn test_stale_response_dropped() {
        let mut suggest = SuggestionController::default();
        let timer = armed(suggest.input("a"));
        let (old, _) = suggest.timer_fired(timer).unwrap();
        let timer = armed(suggest.input("ab"));
        let (new, _) = suggest.timer_fired(timer).unwrap();

        assert!(suggest.apply_response(new, Ok(vec![Drug::new("abacavir")])));
        assert!(!suggest.apply_response(old, Ok(vec![Drug::new("aspirin")])));
        assert_eq!(
            suggest.list(),
            &SuggestionList::Candidates(vec![Drug::new("abacavir")])
        );
    }

    #[test]
    fn test_blank_input_hides_list_and_drops_in_flight() {
        let mut suggest = SuggestionController::default();
        let timer = armed(suggest.input("asp"));
        let (ticket, _) = suggest.timer_fired(timer).unwrap();

        suggest.input("");
        assert!(suggest.list().is_hidden());
        assert!(!suggest.apply_response(ticket, Ok(vec![Drug::new("aspirin")])));
        assert!(suggest.list().is_hidden());
    }

    #[test]
    fn test_pick_resets() {
        let mut suggest = SuggestionController::default();
        let timer = armed(suggest.input("war"));
        let (ticket, _) = suggest.timer_fired(timer).unwrap();
        suggest.apply_response(ticket, Ok(vec![Drug::new("warfarin"), Drug::new("warfarin sodium")]));

        let (drug, cancelled) = suggest.pick(1).unwrap();
        assert_eq!(drug.name, "warfarin sodium");
        assert_eq!(cancelled, None);
        assert!(suggest.list().is_hidden());
    }

    #[test]
    fn test_pick_out_of_range_changes_nothing() {
        let mut suggest = SuggestionController::default();
        let timer = armed(suggest.input("war"));
        let (ticket, _) = suggest.timer_fired(timer).unwrap();
        suggest.apply_response(ticket, Ok(vec![Drug::new("warfarin")]));

        assert!(suggest.pick(3).is_none());
        assert!(!suggest.list().is_hidden());
    }

    #[test]
    fn test_placeholder_is_not_pickable() {
        let mut suggest = SuggestionController::default();
        let timer = armed(suggest.input("zzz"));
        let (ticket, _) = suggest.timer_fired(timer).unwrap();
        suggest.apply_response(ticket, Ok(vec![]));

        assert!(suggest.pick(0).is_none());
    }
}
