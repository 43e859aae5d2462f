//! Service availability probe.

use chrono::{DateTime, Utc};

use crate::error::ServiceResult;
use crate::labels;
use crate::models::ConnectivityState;
use crate::sequence::{Sequencer, Ticket};
use crate::service::HealthReport;

/// Rendered connectivity indicator (dot + text).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusIndicator {
    pub state: ConnectivityState,
    /// Class for the dot; `None` before the first probe
    pub dot_class: Option<&'static str>,
    pub text: &'static str,
}

impl From<ConnectivityState> for StatusIndicator {
    fn from(state: ConnectivityState) -> Self {
        let (dot_class, text) = match state {
            ConnectivityState::Connected => (Some("status-connected"), labels::STATUS_CONNECTED),
            ConnectivityState::Error => (Some("status-error"), labels::STATUS_ERROR),
            ConnectivityState::Unknown => (None, labels::STATUS_UNKNOWN),
        };
        Self {
            state,
            dot_class,
            text,
        }
    }
}

/// Tracks the outcome of health probes.
///
/// No retries: a failed probe leaves the state at `Error` until the next
/// `begin_probe`.
#[derive(Debug, Default)]
pub struct HealthMonitor {
    probes: Sequencer,
    state: ConnectivityState,
    last_checked: Option<DateTime<Utc>>,
    data_loaded: Option<bool>,
}

impl HealthMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ConnectivityState {
        self.state
    }

    pub fn indicator(&self) -> StatusIndicator {
        self.state.into()
    }

    /// When the last applied probe completed.
    pub fn last_checked(&self) -> Option<DateTime<Utc>> {
        self.last_checked
    }

    /// Whether the service reported its drug data as loaded.
    pub fn data_loaded(&self) -> Option<bool> {
        self.data_loaded
    }

    pub fn begin_probe(&mut self) -> Ticket {
        self.probes.issue()
    }

    /// Apply a probe outcome. Returns the new state, or `None` if a newer
    /// probe has been started since.
    pub fn complete(
        &mut self,
        ticket: Ticket,
        result: ServiceResult<HealthReport>,
    ) -> Option<ConnectivityState> {
        if !self.probes.is_latest(ticket) {
            return None;
        }
        self.last_checked = Some(Utc::now());
        match result {
            Ok(report) => {
                self.state = ConnectivityState::Connected;
                self.data_loaded = report.data_loaded;
            }
            Err(_) => {
                self.state = ConnectivityState::Error;
                self.data_loaded = None;
            }
        }
        Some(self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;

    #[test]
    fn test_starts_unknown() {
        let monitor = HealthMonitor::new();
        assert_eq!(monitor.state(), ConnectivityState::Unknown);
        assert_eq!(monitor.indicator().dot_class, None);
        assert!(monitor.last_checked().is_none());
    }

    #[test]
    fn test_success_connects() {
        let mut monitor = HealthMonitor::new();
        let ticket = monitor.begin_probe();
        let report = HealthReport {
            status: Some("healthy".into()),
            data_loaded: Some(true),
        };

        assert_eq!(monitor.complete(ticket, Ok(report)), Some(ConnectivityState::Connected));
        assert_eq!(monitor.indicator().dot_class, Some("status-connected"));
        assert_eq!(monitor.data_loaded(), Some(true));
        assert!(monitor.last_checked().is_some());
    }

    #[test]
    fn test_bad_status_is_error() {
        let mut monitor = HealthMonitor::new();
        let ticket = monitor.begin_probe();

        monitor.complete(ticket, Err(ServiceError::Status { status: 503 }));
        assert_eq!(monitor.state(), ConnectivityState::Error);
        assert_eq!(monitor.indicator().text, labels::STATUS_ERROR);
    }

    #[test]
    fn test_late_probe_ignored() {
        let mut monitor = HealthMonitor::new();
        let old = monitor.begin_probe();
        let new = monitor.begin_probe();

        monitor.complete(new, Err(ServiceError::Network("refused".into())));
        assert_eq!(monitor.complete(old, Ok(HealthReport::default())), None);
        assert_eq!(monitor.state(), ConnectivityState::Error);
    }
}
