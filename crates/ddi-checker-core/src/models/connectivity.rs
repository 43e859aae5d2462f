//! Service connectivity state.

use serde::{Deserialize, Serialize};

/// Availability of the backing service as last observed by a health probe.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConnectivityState {
    /// No probe has completed yet
    #[default]
    Unknown,
    /// Last probe got a success status
    Connected,
    /// Last probe failed or got a non-success status
    Error,
}

impl ConnectivityState {
    pub fn is_connected(self) -> bool {
        matches!(self, ConnectivityState::Connected)
    }
}
