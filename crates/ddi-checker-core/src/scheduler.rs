//! Timers and outbound requests, as seen by the controller.
//!
//! The controller never sleeps or awaits. It asks a [`Scheduler`] to arm a
//! timer or send a request, and is told later, through its own methods, that
//! the timer fired or the response arrived.

use std::fmt;
use std::time::Duration;

use crate::error::ServiceResult;
use crate::models::{Drug, InteractionResult};
use crate::sequence::Ticket;
use crate::service::HealthReport;

/// Identity of one armed debounce timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(pub(crate) u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer-{}", self.0)
    }
}

/// An outbound call to the drug service.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Search { ticket: Ticket, query: String },
    Check { ticket: Ticket, drugs: Vec<String> },
    Probe { ticket: Ticket },
}

impl Request {
    pub fn ticket(&self) -> Ticket {
        match self {
            Request::Search { ticket, .. }
            | Request::Check { ticket, .. }
            | Request::Probe { ticket } => *ticket,
        }
    }
}

/// Completion of a [`Request`], tagged with the same ticket.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Search {
        ticket: Ticket,
        result: ServiceResult<Vec<Drug>>,
    },
    Check {
        ticket: Ticket,
        result: ServiceResult<Vec<InteractionResult>>,
    },
    Probe {
        ticket: Ticket,
        result: ServiceResult<HealthReport>,
    },
}

/// Side-effect sink for the controller's asynchronous work.
pub trait Scheduler {
    /// Arm `timer` to fire after `delay`.
    fn arm_timer(&mut self, timer: TimerId, delay: Duration);

    /// Cancel `timer` if it has not fired yet.
    fn cancel_timer(&mut self, timer: TimerId);

    /// Send a request; its completion is reported back to the controller.
    fn dispatch(&mut self, request: Request);
}

/// Scheduler that only records what it was asked to do.
///
/// Tests fire timers and deliver responses by hand, so behaviour does not
/// depend on wall-clock time.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    armed: Option<(TimerId, Duration)>,
    cancelled: Vec<TimerId>,
    requests: Vec<Request>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// The timer currently armed, if any.
    pub fn armed(&self) -> Option<TimerId> {
        self.armed.map(|(timer, _)| timer)
    }

    pub fn armed_delay(&self) -> Option<Duration> {
        self.armed.map(|(_, delay)| delay)
    }

    pub fn cancelled(&self) -> &[TimerId] {
        &self.cancelled
    }

    /// Every request dispatched and not yet taken.
    pub fn requests(&self) -> &[Request] {
        &self.requests
    }

    pub fn take_requests(&mut self) -> Vec<Request> {
        std::mem::take(&mut self.requests)
    }

    /// Consume the armed timer as if it expired.
    pub fn expire(&mut self) -> Option<TimerId> {
        self.armed.take().map(|(timer, _)| timer)
    }
}

impl Scheduler for ManualScheduler {
    fn arm_timer(&mut self, timer: TimerId, delay: Duration) {
        self.armed = Some((timer, delay));
    }

    fn cancel_timer(&mut self, timer: TimerId) {
        if self.armed() == Some(timer) {
            self.armed = None;
        }
        self.cancelled.push(timer);
    }

    fn dispatch(&mut self, request: Request) {
        self.requests.push(request);
    }
}
