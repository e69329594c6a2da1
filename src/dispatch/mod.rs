//! Command dispatch: routes each inbound event to at most one registered
//! handler and drives the shared resonance counter.

pub mod handlers;
pub mod registry;
pub mod sink;

pub use handlers::default_registry;
pub use registry::{CommandRegistration, CommandRegistry, HandlerFn, ReplyContext, Trigger};
pub use sink::{BusReplySink, ReplySink};

use crate::bus::{EventKind, InboundEvent, Reply};
use crate::resonance::ResonanceState;
use anyhow::{Context, Result};
use chrono::Local;
use tokio::sync::{Mutex, mpsc};
use tracing::{debug, error, info, warn};

/// Result of handling one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// No registration matched; nothing was sent and nothing changed.
    Ignored,
    Command {
        interaction_count: u64,
        report_emitted: bool,
    },
    Callback {
        replied: bool,
    },
}

pub struct Dispatcher {
    registry: CommandRegistry,
    state: Mutex<ResonanceState>,
}

impl Dispatcher {
    pub fn new(registry: CommandRegistry, state: ResonanceState) -> Self {
        Self {
            registry,
            state: Mutex::new(state),
        }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub async fn interaction_count(&self) -> u64 {
        self.state.lock().await.interaction_count()
    }

    /// Handle one inbound event, replying through `sink`.
    pub async fn dispatch(
        &self,
        event: &InboundEvent,
        sink: &dyn ReplySink,
    ) -> Result<DispatchOutcome> {
        let trigger = Trigger::for_event(&event.kind);
        let Some(handler) = self.registry.lookup(&trigger) else {
            debug!("no handler for {} from {}", trigger, event.session_key());
            return Ok(DispatchOutcome::Ignored);
        };

        match &event.kind {
            EventKind::Command { .. } => self.run_command(event, handler, sink).await,
            EventKind::Callback { id, .. } => self.run_callback(event, id, handler, sink).await,
        }
    }

    /// send reply → count → reflect, all under the state lock.
    async fn run_command(
        &self,
        event: &InboundEvent,
        handler: HandlerFn,
        sink: &dyn ReplySink,
    ) -> Result<DispatchOutcome> {
        let mut state = self.state.lock().await;
        let now = Local::now();
        let reply = handler(&ReplyContext {
            interaction_count: state.interaction_count(),
            now,
        });

        let chat_id = event.chat_id.as_deref();
        match chat_id {
            Some(chat_id) => sink
                .send(chat_id, &reply)
                .await
                .with_context(|| format!("Failed to send reply to {}", event.session_key()))?,
            None => warn!(
                "command from {} has no reply context, skipping reply",
                event.sender_id
            ),
        }

        let interaction_count = state.record_interaction();
        debug!("interaction_count={}", interaction_count);

        let report = state.reflect(now);
        let report_emitted = report.is_some();
        if let Some(report) = report {
            info!(
                "resonance loop closed at {} interactions",
                report.interaction_count
            );
            if let Some(chat_id) = chat_id {
                sink.send(chat_id, &Reply::text(report.render()))
                    .await
                    .with_context(|| {
                        format!("Failed to send Resonance Log to {}", event.session_key())
                    })?;
            }
        }

        Ok(DispatchOutcome::Command {
            interaction_count,
            report_emitted,
        })
    }

    /// Reply if the originating message still exists, then always acknowledge.
    async fn run_callback(
        &self,
        event: &InboundEvent,
        callback_id: &str,
        handler: HandlerFn,
        sink: &dyn ReplySink,
    ) -> Result<DispatchOutcome> {
        let mut replied = false;
        if let Some(chat_id) = event.chat_id.as_deref() {
            let reply = handler(&ReplyContext {
                interaction_count: self.interaction_count().await,
                now: Local::now(),
            });
            match sink.send(chat_id, &reply).await {
                Ok(()) => replied = true,
                Err(e) => warn!(
                    "callback reply to {} failed: {:#}",
                    event.session_key(),
                    e
                ),
            }
        } else {
            debug!("callback {} has no message context, skipping reply", callback_id);
        }

        sink.ack_callback(callback_id)
            .await
            .with_context(|| format!("Failed to acknowledge callback {callback_id}"))?;

        Ok(DispatchOutcome::Callback { replied })
    }

    /// Consume events in arrival order until the inbound queue closes.
    pub async fn run(&self, mut inbound_rx: mpsc::Receiver<InboundEvent>, sink: BusReplySink) {
        info!(
            "dispatch loop running with {} registered triggers",
            self.registry.len()
        );
        while let Some(event) = inbound_rx.recv().await {
            let sink = sink.for_channel(&event.channel);
            match self.dispatch(&event, &sink).await {
                Ok(outcome) => debug!("dispatched {}: {:?}", event.session_key(), outcome),
                Err(e) => error!("dispatch failed for {}: {:#}", event.session_key(), e),
            }
        }
        warn!("inbound event receiver closed, dispatch loop exiting");
    }
}
