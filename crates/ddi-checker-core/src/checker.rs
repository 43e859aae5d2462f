//! Interaction check orchestration.

use crate::error::ServiceResult;
use crate::labels;
use crate::models::{InteractionResult, Severity};
use crate::selection::SelectionStore;
use crate::sequence::{Sequencer, Ticket};

/// A rendered interaction card.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionCard {
    pub drug1: String,
    pub drug2: String,
    pub severity: Severity,
    /// Localized severity label shown in the title
    pub severity_label: String,
    pub description: String,
    pub description_th: String,
    /// Style class, e.g. `severity-high`
    pub css_class: String,
}

impl InteractionCard {
    /// `"<drug1> + <drug2> (<severity label>)"`
    pub fn title(&self) -> String {
        format!("{} + {} ({})", self.drug1, self.drug2, self.severity_label)
    }
}

impl From<InteractionResult> for InteractionCard {
    fn from(result: InteractionResult) -> Self {
        let severity_label = result.severity_label().to_string();
        let css_class = result.severity.css_class();
        Self {
            drug1: result.drug1,
            drug2: result.drug2,
            severity: result.severity,
            severity_label,
            description: result.description,
            description_th: result.description_th,
            css_class,
        }
    }
}

/// Contents of the results container.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ResultsPanel {
    #[default]
    Empty,
    Cards(Vec<InteractionCard>),
    /// Check succeeded with no interactions
    NoInteractions,
    /// Check failed
    Failed,
}

impl ResultsPanel {
    pub fn is_empty(&self) -> bool {
        matches!(self, ResultsPanel::Empty)
    }

    /// Placeholder text and class for the non-card states.
    pub fn placeholder(&self) -> Option<(&'static str, &'static str)> {
        match self {
            ResultsPanel::NoInteractions => Some((labels::NO_INTERACTIONS, "severity-none")),
            ResultsPanel::Failed => Some((labels::CHECK_FAILED, "severity-error")),
            _ => None,
        }
    }
}

/// How a check completion was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckCompletion {
    /// Results replaced
    Applied,
    /// Latest check, but the selection changed while it was in flight
    Outdated,
    /// A newer check was started or the check was cancelled
    Superseded,
}

#[derive(Debug, Clone, Copy)]
struct InFlight {
    ticket: Ticket,
    selection_version: u64,
}

/// Sends the selection to the check endpoint and holds the rendered outcome.
#[derive(Debug, Default)]
pub struct InteractionChecker {
    checks: Sequencer,
    in_flight: Option<InFlight>,
    results: ResultsPanel,
}

impl InteractionChecker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn results(&self) -> &ResultsPanel {
        &self.results
    }

    /// Whether the loading indicator should be visible.
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Start a check of the current selection.
    ///
    /// Clears prior results. Returns `None` if fewer than two drugs are
    /// selected, leaving state untouched.
    pub fn begin(&mut self, selection: &SelectionStore) -> Option<(Ticket, Vec<String>)> {
        if !selection.can_check() {
            return None;
        }
        let ticket = self.checks.issue();
        self.in_flight = Some(InFlight {
            ticket,
            selection_version: selection.version(),
        });
        self.results = ResultsPanel::Empty;
        Some((ticket, selection.names()))
    }

    /// Apply a check response.
    ///
    /// The loading state ends whenever the latest check completes, whether or
    /// not its payload is still usable.
    pub fn complete(
        &mut self,
        ticket: Ticket,
        selection: &SelectionStore,
        result: ServiceResult<Vec<InteractionResult>>,
    ) -> CheckCompletion {
        let in_flight = match self.in_flight {
            Some(f) if f.ticket == ticket && self.checks.is_latest(ticket) => f,
            _ => return CheckCompletion::Superseded,
        };
        self.in_flight = None;

        if in_flight.selection_version != selection.version() {
            return CheckCompletion::Outdated;
        }

        self.results = match result {
            Ok(interactions) if interactions.is_empty() => ResultsPanel::NoInteractions,
            Ok(interactions) => {
                ResultsPanel::Cards(interactions.into_iter().map(InteractionCard::from).collect())
            }
            Err(_) => ResultsPanel::Failed,
        };
        CheckCompletion::Applied
    }

    /// Drop displayed results and abandon any in-flight check.
    pub fn reset(&mut self) {
        self.checks.invalidate();
        self.in_flight = None;
        self.results = ResultsPanel::Empty;
    }
}
