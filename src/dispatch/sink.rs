use crate::bus::queue::publish_outbound;
use crate::bus::{OutboundEvent, OutboundMessage, Reply};
use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;

/// Reply capability handed to the dispatcher together with each event.
#[async_trait]
pub trait ReplySink: Send + Sync {
    /// Send a reply into the conversation `chat_id`.
    async fn send(&self, chat_id: &str, reply: &Reply) -> Result<()>;

    /// Acknowledge a callback so the client clears its loading state.
    async fn ack_callback(&self, callback_id: &str) -> Result<()>;
}

/// Publishes replies on the outbound bus for the channel loop to deliver.
#[derive(Clone)]
pub struct BusReplySink {
    channel: String,
    outbound_tx: mpsc::Sender<OutboundEvent>,
}

impl BusReplySink {
    pub fn new(channel: &str, outbound_tx: mpsc::Sender<OutboundEvent>) -> Self {
        Self {
            channel: channel.to_string(),
            outbound_tx,
        }
    }

    /// Same bus, different channel tag.
    #[must_use]
    pub fn for_channel(&self, channel: &str) -> Self {
        Self::new(channel, self.outbound_tx.clone())
    }
}

#[async_trait]
impl ReplySink for BusReplySink {
    async fn send(&self, chat_id: &str, reply: &Reply) -> Result<()> {
        publish_outbound(
            &self.outbound_tx,
            OutboundEvent::Message(OutboundMessage {
                channel: self.channel.clone(),
                chat_id: chat_id.to_string(),
                content: reply.text.clone(),
                buttons: reply.buttons.clone(),
            }),
        )
        .await
    }

    async fn ack_callback(&self, callback_id: &str) -> Result<()> {
        publish_outbound(
            &self.outbound_tx,
            OutboundEvent::CallbackAck {
                channel: self.channel.clone(),
                callback_id: callback_id.to_string(),
            },
        )
        .await
    }
}
