use crate::bus::{InboundEvent, OutboundEvent};
use anyhow::{Context, Result};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, warn};

const DEFAULT_INBOUND_CAPACITY: usize = 1000;
const DEFAULT_OUTBOUND_CAPACITY: usize = 1000;
/// Timeout for channel send operations to prevent indefinite blocking
/// when the consumer is slow or stalled.
pub const SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Inbound queue (channel → dispatch loop) and outbound queue
/// (dispatch loop → channel delivery).
pub struct EventBus {
    pub inbound_tx: mpsc::Sender<InboundEvent>,
    inbound_rx: Option<mpsc::Receiver<InboundEvent>>,
    pub outbound_tx: mpsc::Sender<OutboundEvent>,
    outbound_rx: Option<mpsc::Receiver<OutboundEvent>>,
}

impl EventBus {
    pub fn new(inbound_capacity: usize, outbound_capacity: usize) -> Self {
        let (inbound_tx, inbound_rx) = mpsc::channel(inbound_capacity);
        let (outbound_tx, outbound_rx) = mpsc::channel(outbound_capacity);
        Self {
            inbound_tx,
            inbound_rx: Some(inbound_rx),
            outbound_tx,
            outbound_rx: Some(outbound_rx),
        }
    }

    /// Extract the inbound receiver; the dispatch loop owns it.
    pub fn take_inbound_rx(&mut self) -> Option<mpsc::Receiver<InboundEvent>> {
        self.inbound_rx.take()
    }

    /// Extract the outbound receiver; the channel loop owns it.
    pub fn take_outbound_rx(&mut self) -> Option<mpsc::Receiver<OutboundEvent>> {
        self.outbound_rx.take()
    }

    pub async fn publish_inbound(&self, event: InboundEvent) -> Result<()> {
        publish_inbound(&self.inbound_tx, event).await
    }

    pub async fn publish_outbound(&self, event: OutboundEvent) -> Result<()> {
        publish_outbound(&self.outbound_tx, event).await
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_INBOUND_CAPACITY, DEFAULT_OUTBOUND_CAPACITY)
    }
}

/// Queue an inbound event, giving up after `SEND_TIMEOUT`.
pub async fn publish_inbound(tx: &mpsc::Sender<InboundEvent>, event: InboundEvent) -> Result<()> {
    let key = event.session_key();
    tokio::time::timeout(SEND_TIMEOUT, tx.send(event))
        .await
        .map_err(|_| {
            warn!(
                "inbound send timed out after {}s: queue full or dispatch loop stalled",
                SEND_TIMEOUT.as_secs()
            );
            anyhow::anyhow!("inbound send timed out: queue full")
        })?
        .context("Failed to send inbound event - receiver closed")?;
    debug!("inbound event queued: {}", key);
    Ok(())
}

/// Queue an outbound event, giving up after `SEND_TIMEOUT`.
pub async fn publish_outbound(
    tx: &mpsc::Sender<OutboundEvent>,
    event: OutboundEvent,
) -> Result<()> {
    let channel = event.channel().to_string();
    tokio::time::timeout(SEND_TIMEOUT, tx.send(event))
        .await
        .map_err(|_| {
            warn!(
                "outbound send timed out after {}s: queue full",
                SEND_TIMEOUT.as_secs()
            );
            anyhow::anyhow!("outbound send timed out: queue full")
        })?
        .context("Failed to send outbound event - receiver closed")?;
    debug!("outbound event queued: channel={}", channel);
    Ok(())
}

#[cfg(test)]
mod tests;
