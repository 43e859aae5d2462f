//! Rendering surface.
//!
//! The controller pushes every state change through [`View`]; nothing in the
//! state machine reads back from it.

use crate::checker::ResultsPanel;
use crate::health::StatusIndicator;
use crate::models::{ConnectivityState, Drug};
use crate::search::SuggestionList;

/// Observer for controller state changes.
pub trait View {
    /// Selected-drug tags, in display order.
    fn render_selection(&mut self, drugs: &[Drug]);

    fn set_check_enabled(&mut self, enabled: bool);

    fn render_suggestions(&mut self, list: &SuggestionList);

    /// Empty the query input box.
    fn clear_input(&mut self);

    fn set_loading(&mut self, visible: bool);

    fn render_results(&mut self, results: &ResultsPanel);

    fn render_status(&mut self, status: &StatusIndicator);
}

/// Headless view holding the last rendered projection of each widget.
#[derive(Debug, Clone, PartialEq)]
pub struct PageState {
    pub selected: Vec<String>,
    pub check_enabled: bool,
    pub suggestions: SuggestionList,
    /// Number of times the input box was cleared
    pub input_clears: usize,
    pub loading: bool,
    pub results: ResultsPanel,
    pub status: StatusIndicator,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            selected: Vec::new(),
            check_enabled: false,
            suggestions: SuggestionList::Hidden,
            input_clears: 0,
            loading: false,
            results: ResultsPanel::Empty,
            status: ConnectivityState::Unknown.into(),
        }
    }
}

impl View for PageState {
    fn render_selection(&mut self, drugs: &[Drug]) {
        self.selected = drugs.iter().map(|d| d.name.clone()).collect();
    }

    fn set_check_enabled(&mut self, enabled: bool) {
        self.check_enabled = enabled;
    }

    fn render_suggestions(&mut self, list: &SuggestionList) {
        self.suggestions = list.clone();
    }

    fn clear_input(&mut self) {
        self.input_clears += 1;
    }

    fn set_loading(&mut self, visible: bool) {
        self.loading = visible;
    }

    fn render_results(&mut self, results: &ResultsPanel) {
        self.results = results.clone();
    }

    fn render_status(&mut self, status: &StatusIndicator) {
        self.status = status.clone();
    }
}
