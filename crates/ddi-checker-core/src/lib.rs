//! DDI Checker Core Library
//!
//! Client-side controller for a drug-drug interaction lookup: incremental
//! drug search, a deduplicated selection set, and interaction checks against a
//! remote service.
//!
//! # Architecture
//!
//! ```text
//! keystrokes ──► SuggestionController ──► Scheduler ──► POST /search_drugs/
//!                 (debounce, tickets)        ▲                 │
//!                        │ pick               │   search_completed(ticket)
//!                        ▼                    │                 │
//!                  SelectionStore ◄───────────┼─────────────────┘
//!                        │ ≥ 2 drugs          │
//!                        ▼                    │
//!                InteractionChecker ──────────┴──► POST /check_interactions/
//!                        │
//!                        ▼
//!                      View  ◄──── HealthMonitor ◄──── GET /health
//! ```
//!
//! # Core Principle
//!
//! **Only current answers are shown.** Every request carries a ticket; a
//! response is rendered only if it belongs to the latest request of its kind
//! and, for checks, the selection has not changed since it was sent.
//!
//! # Modules
//!
//! - [`models`]: Domain types (Drug, InteractionResult, Severity, ConnectivityState)
//! - [`selection`]: Ordered, deduplicated selection set
//! - [`search`]: Debounced search and suggestion list
//! - [`checker`]: Interaction check and result cards
//! - [`health`]: Service availability probe
//! - [`controller`]: The per-session controller wiring it all together
//! - [`scheduler`]: Timer and request side effects
//! - [`service`]: Drug service contract and wire types
//! - [`view`]: Rendering observer

pub mod checker;
pub mod controller;
pub mod error;
pub mod health;
pub mod labels;
pub mod models;
pub mod scheduler;
pub mod search;
pub mod selection;
pub mod sequence;
pub mod service;
pub mod view;

// Re-export commonly used types
pub use checker::{CheckCompletion, InteractionCard, InteractionChecker, ResultsPanel};
pub use controller::{Controller, ControllerConfig};
pub use error::{ServiceError, ServiceResult};
pub use health::{HealthMonitor, StatusIndicator};
pub use models::{ConnectivityState, Drug, InteractionResult, Severity};
pub use scheduler::{ManualScheduler, Request, Response, Scheduler, TimerId};
pub use search::{SuggestionController, SuggestionEntry, SuggestionList};
pub use selection::SelectionStore;
pub use sequence::{Sequencer, Ticket};
pub use service::{DrugService, HealthReport};
pub use view::{PageState, View};
