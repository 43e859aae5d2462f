//! Runtime for the drug interaction checker.
//!
//! Binds the core controller to the real world: a `reqwest` client for the
//! drug service, a tokio session loop for timers and responses, and a
//! terminal front end.

pub mod client;
pub mod config;
pub mod session;
pub mod terminal;

pub use client::HttpDrugService;
pub use config::{Config, ConfigError};
pub use session::{Session, SessionClosed, SessionHandle, TokioScheduler, UiEvent};
pub use terminal::{CliError, Command, TerminalView, USAGE};

/// Log filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,ddi_checker_core=info,ddi_checker_app=info";
