//! Tokio event loop that owns a controller.
//!
//! One task owns the [`Controller`]; timers and network calls run as separate
//! tasks and report back over a channel, so controller state is only ever
//! touched from the loop.
//!
//! Dropping every [`SessionHandle`] lets the pending debounce timer and any
//! requests already sent finish before the loop returns. [`UiEvent::Quit`]
//! stops at once.

use std::ops::ControlFlow;
use std::sync::Arc;
use std::time::Duration;

use ddi_checker_core::{
    Controller, DrugService, Request, Response, Scheduler, TimerId, View,
};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info};

use crate::config::Config;

/// User actions fed into a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// The query input now holds this text
    Input(String),
    /// Select the suggestion at this zero-based index
    Pick(usize),
    Remove(String),
    Clear,
    Check,
    Probe,
    /// Stop without waiting for pending work
    Quit,
}

#[derive(Error, Debug)]
#[error("Session has stopped")]
pub struct SessionClosed;

/// Cloneable sender for [`UiEvent`]s. Once every handle is dropped the session
/// finishes pending work and stops.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    tx: mpsc::UnboundedSender<UiEvent>,
}

impl SessionHandle {
    pub fn send(&self, event: UiEvent) -> Result<(), SessionClosed> {
        self.tx.send(event).map_err(|_| SessionClosed)
    }

    pub fn input(&self, text: impl Into<String>) -> Result<(), SessionClosed> {
        self.send(UiEvent::Input(text.into()))
    }

    pub fn pick(&self, index: usize) -> Result<(), SessionClosed> {
        self.send(UiEvent::Pick(index))
    }

    pub fn remove(&self, name: impl Into<String>) -> Result<(), SessionClosed> {
        self.send(UiEvent::Remove(name.into()))
    }

    pub fn clear(&self) -> Result<(), SessionClosed> {
        self.send(UiEvent::Clear)
    }

    pub fn check(&self) -> Result<(), SessionClosed> {
        self.send(UiEvent::Check)
    }

    pub fn probe(&self) -> Result<(), SessionClosed> {
        self.send(UiEvent::Probe)
    }

    pub fn quit(&self) -> Result<(), SessionClosed> {
        self.send(UiEvent::Quit)
    }
}

#[derive(Debug)]
enum Internal {
    TimerFired(TimerId),
    Completed(Response),
}

/// [`Scheduler`] backed by tokio tasks.
///
/// Holds a single timer slot; arming aborts whatever was armed before.
pub struct TokioScheduler<S> {
    service: Arc<S>,
    tx: mpsc::UnboundedSender<Internal>,
    timer: Option<(TimerId, JoinHandle<()>)>,
    /// Requests dispatched whose response has not reached the loop yet
    outstanding: usize,
}

impl<S> TokioScheduler<S> {
    fn new(service: Arc<S>, tx: mpsc::UnboundedSender<Internal>) -> Self {
        Self {
            service,
            tx,
            timer: None,
            outstanding: 0,
        }
    }

    /// No timer armed and no request awaiting its response.
    pub fn is_idle(&self) -> bool {
        self.timer.is_none() && self.outstanding == 0
    }

    fn timer_elapsed(&mut self, timer: TimerId) {
        if matches!(&self.timer, Some((armed, _)) if *armed == timer) {
            self.timer = None;
        }
    }

    fn response_arrived(&mut self) {
        self.outstanding = self.outstanding.saturating_sub(1);
    }
}

impl<S: DrugService + 'static> Scheduler for TokioScheduler<S> {
    fn arm_timer(&mut self, timer: TimerId, delay: Duration) {
        if let Some((_, previous)) = self.timer.take() {
            previous.abort();
        }
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            time::sleep(delay).await;
            // Loop gone means the session ended; nothing to deliver to
            let _ = tx.send(Internal::TimerFired(timer));
        });
        self.timer = Some((timer, handle));
    }

    fn cancel_timer(&mut self, timer: TimerId) {
        if matches!(&self.timer, Some((armed, _)) if *armed == timer) {
            if let Some((_, handle)) = self.timer.take() {
                handle.abort();
            }
        }
    }

    fn dispatch(&mut self, request: Request) {
        self.outstanding += 1;
        let service = Arc::clone(&self.service);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let response = match request {
                Request::Search { ticket, query } => Response::Search {
                    ticket,
                    result: service.search_drugs(&query).await,
                },
                Request::Check { ticket, drugs } => Response::Check {
                    ticket,
                    result: service.check_interactions(&drugs).await,
                },
                Request::Probe { ticket } => Response::Probe {
                    ticket,
                    result: service.health().await,
                },
            };
            if tx.send(Internal::Completed(response)).is_err() {
                debug!("Session ended before response arrived");
            }
        });
    }
}

/// A running page session: controller, its channels and the optional health poll.
pub struct Session<S: DrugService + 'static, V: View> {
    controller: Controller<V, TokioScheduler<S>>,
    ui: mpsc::UnboundedReceiver<UiEvent>,
    internal: mpsc::UnboundedReceiver<Internal>,
    health_poll: Option<Duration>,
}

impl<S: DrugService + 'static, V: View> Session<S, V> {
    pub fn new(config: &Config, service: Arc<S>, view: V) -> (Self, SessionHandle) {
        let (ui_tx, ui_rx) = mpsc::unbounded_channel();
        let (internal_tx, internal_rx) = mpsc::unbounded_channel();
        let scheduler = TokioScheduler::new(service, internal_tx);

        let session = Self {
            controller: Controller::new(config.controller(), view, scheduler),
            ui: ui_rx,
            internal: internal_rx,
            health_poll: config.health_poll,
        };
        (session, SessionHandle { tx: ui_tx })
    }

    /// Run until [`UiEvent::Quit`], or until every [`SessionHandle`] is dropped
    /// and pending work has settled, then hand back the view.
    pub async fn run(mut self) -> V {
        info!("Session started");
        self.controller.start();

        let mut poll = self.health_poll.map(|period| {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            interval
        });

        let mut draining = false;
        loop {
            if draining && self.controller.scheduler().is_idle() {
                break;
            }
            tokio::select! {
                event = self.ui.recv(), if !draining => match event {
                    Some(event) => {
                        if self.handle(event).is_break() {
                            info!("Quit requested");
                            break;
                        }
                    }
                    None => {
                        debug!("All handles dropped; finishing pending work");
                        draining = true;
                    }
                },
                Some(internal) = self.internal.recv() => self.handle_internal(internal),
                _ = next_tick(&mut poll), if !draining => self.controller.probe(),
                else => break,
            }
        }

        info!("Session ended");
        self.controller.into_view()
    }

    fn handle(&mut self, event: UiEvent) -> ControlFlow<()> {
        match event {
            UiEvent::Input(text) => self.controller.input(&text),
            UiEvent::Pick(index) => {
                if !self.controller.pick(index) {
                    debug!(index, "No selectable suggestion at index");
                }
            }
            UiEvent::Remove(name) => {
                self.controller.remove(&name);
            }
            UiEvent::Clear => self.controller.clear(),
            UiEvent::Check => {
                self.controller.check();
            }
            UiEvent::Probe => self.controller.probe(),
            UiEvent::Quit => return ControlFlow::Break(()),
        }
        ControlFlow::Continue(())
    }

    fn handle_internal(&mut self, internal: Internal) {
        match internal {
            Internal::TimerFired(timer) => {
                self.controller.scheduler_mut().timer_elapsed(timer);
                self.controller.timer_fired(timer);
            }
            Internal::Completed(response) => {
                self.controller.scheduler_mut().response_arrived();
                self.controller.deliver(response);
            }
        }
    }
}

async fn next_tick(poll: &mut Option<Interval>) {
    match poll {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}
