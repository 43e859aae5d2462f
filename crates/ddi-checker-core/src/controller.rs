//! The per-session controller.
//!
//! Owns the selection, search, check and health state. Every public method is
//! synchronous and finishes all dependent rendering before it returns.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::checker::{CheckCompletion, InteractionChecker};
use crate::error::ServiceResult;
use crate::health::HealthMonitor;
use crate::models::{ConnectivityState, Drug, InteractionResult};
use crate::scheduler::{Request, Response, Scheduler, TimerId};
use crate::search::{DebounceStep, SuggestionController, DEFAULT_DEBOUNCE};
use crate::selection::SelectionStore;
use crate::sequence::Ticket;
use crate::service::HealthReport;
use crate::view::View;

/// Controller tunables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Quiet period after the last keystroke before searching
    pub debounce: Duration,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

/// Search-and-selection state machine bound to a view and a scheduler.
pub struct Controller<V, S> {
    selection: SelectionStore,
    suggest: SuggestionController,
    checker: InteractionChecker,
    health: HealthMonitor,
    view: V,
    scheduler: S,
}

impl<V: View, S: Scheduler> Controller<V, S> {
    /// Create a controller and render its initial state.
    pub fn new(config: ControllerConfig, view: V, scheduler: S) -> Self {
        let mut controller = Self {
            selection: SelectionStore::new(),
            suggest: SuggestionController::new(config.debounce),
            checker: InteractionChecker::new(),
            health: HealthMonitor::new(),
            view,
            scheduler,
        };
        controller.render_all();
        controller
    }

    /// Page start: probe the service once.
    pub fn start(&mut self) {
        self.probe();
    }

    // =========================================================================
    // Search
    // =========================================================================

    /// The query input changed.
    pub fn input(&mut self, raw: &str) {
        let step = self.suggest.input(raw);
        if let Some(timer) = step.cancelled() {
            self.scheduler.cancel_timer(timer);
        }
        match step {
            DebounceStep::Armed { timer, .. } => {
                self.scheduler.arm_timer(timer, self.suggest.debounce());
            }
            DebounceStep::Cleared { .. } => {
                self.view.render_suggestions(self.suggest.list());
            }
        }
    }

    /// A debounce timer expired.
    pub fn timer_fired(&mut self, timer: TimerId) {
        match self.suggest.timer_fired(timer) {
            Some((ticket, query)) => {
                debug!(%ticket, query = %query, "Sending drug search");
                self.scheduler.dispatch(Request::Search { ticket, query });
            }
            None => debug!(%timer, "Ignoring superseded debounce timer"),
        }
    }

    pub fn search_completed(&mut self, ticket: Ticket, result: ServiceResult<Vec<Drug>>) {
        if let Err(e) = &result {
            warn!(%ticket, error = %e, "Drug search failed");
        }
        if self.suggest.apply_response(ticket, result) {
            self.view.render_suggestions(self.suggest.list());
        } else {
            debug!(%ticket, "Dropping stale search response");
        }
    }

    /// Select the suggestion at `index`. Returns `false` if there is no such
    /// selectable entry.
    pub fn pick(&mut self, index: usize) -> bool {
        let Some((drug, cancelled)) = self.suggest.pick(index) else {
            return false;
        };
        if let Some(timer) = cancelled {
            self.scheduler.cancel_timer(timer);
        }
        self.add(drug);
        self.view.clear_input();
        self.view.render_suggestions(self.suggest.list());
        true
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Add a drug unless one with the same name is selected.
    pub fn add(&mut self, drug: Drug) -> bool {
        let added = self.selection.add(drug);
        if added {
            self.refresh_selection();
        }
        added
    }

    /// Remove the drug with this name, clearing results below two drugs.
    pub fn remove(&mut self, name: &str) -> bool {
        let removed = self.selection.remove(name);
        if removed {
            self.refresh_selection();
        }
        removed
    }

    /// Empty the selection, results and search box.
    pub fn clear(&mut self) {
        self.selection.clear();
        if let Some(timer) = self.suggest.reset() {
            self.scheduler.cancel_timer(timer);
        }
        self.view.clear_input();
        self.view.render_suggestions(self.suggest.list());
        self.refresh_selection();
    }

    pub fn selection(&self) -> &[Drug] {
        self.selection.list()
    }

    pub fn can_check(&self) -> bool {
        self.selection.can_check()
    }

    // =========================================================================
    // Interaction check
    // =========================================================================

    /// Check the current selection. Returns `false` if fewer than two drugs
    /// are selected; the check control should have been disabled.
    pub fn check(&mut self) -> bool {
        let Some((ticket, drugs)) = self.checker.begin(&self.selection) else {
            warn!(selected = self.selection.len(), "Check requested with fewer than two drugs");
            return false;
        };
        self.view.set_loading(true);
        self.view.render_results(self.checker.results());
        info!(%ticket, drugs = drugs.len(), "Checking interactions");
        self.scheduler.dispatch(Request::Check { ticket, drugs });
        true
    }

    pub fn check_completed(
        &mut self,
        ticket: Ticket,
        result: ServiceResult<Vec<InteractionResult>>,
    ) {
        if let Err(e) = &result {
            warn!(%ticket, error = %e, "Interaction check failed");
        }
        match self.checker.complete(ticket, &self.selection, result) {
            CheckCompletion::Applied => {
                self.view.set_loading(false);
                self.view.render_results(self.checker.results());
            }
            CheckCompletion::Outdated => {
                debug!(%ticket, "Selection changed during check; discarding result");
                self.view.set_loading(false);
                self.view.render_results(self.checker.results());
            }
            CheckCompletion::Superseded => {
                debug!(%ticket, "Dropping superseded check response");
            }
        }
    }

    // =========================================================================
    // Health
    // =========================================================================

    pub fn probe(&mut self) {
        let ticket = self.health.begin_probe();
        self.scheduler.dispatch(Request::Probe { ticket });
    }

    pub fn probe_completed(&mut self, ticket: Ticket, result: ServiceResult<HealthReport>) {
        if let Err(e) = &result {
            warn!(%ticket, error = %e, "Health probe failed");
        }
        if let Some(state) = self.health.complete(ticket, result) {
            if state != ConnectivityState::Connected || self.health.data_loaded() == Some(false) {
                info!(?state, data_loaded = ?self.health.data_loaded(), "Service status");
            }
            self.view.render_status(&self.health.indicator());
        }
    }

    pub fn connectivity(&self) -> ConnectivityState {
        self.health.state()
    }

    pub fn health(&self) -> &HealthMonitor {
        &self.health
    }

    // =========================================================================
    // Plumbing
    // =========================================================================

    /// Route a completed request to its handler.
    pub fn deliver(&mut self, response: Response) {
        match response {
            Response::Search { ticket, result } => self.search_completed(ticket, result),
            Response::Check { ticket, result } => self.check_completed(ticket, result),
            Response::Probe { ticket, result } => self.probe_completed(ticket, result),
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn into_view(self) -> V {
        self.view
    }

    /// Re-render everything that depends on the selection.
    fn refresh_selection(&mut self) {
        self.view.render_selection(self.selection.list());
        self.view.set_check_enabled(self.selection.can_check());
        if !self.selection.can_check() {
            self.checker.reset();
            self.view.set_loading(false);
            self.view.render_results(self.checker.results());
        }
    }

    fn render_all(&mut self) {
        self.view.render_selection(self.selection.list());
        self.view.set_check_enabled(self.selection.can_check());
        self.view.render_suggestions(self.suggest.list());
        self.view.set_loading(self.checker.is_loading());
        self.view.render_results(self.checker.results());
        self.view.render_status(&self.health.indicator());
    }
}
