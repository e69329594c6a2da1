use crate::bus::{OutboundEvent, OutboundMessage};
use crate::channels::base::BaseChannel;
use crate::errors::NavigatorError;
use anyhow::Result;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

const MAX_SEND_ATTEMPTS: u32 = 3;

/// Owns the started channels and delivers outbound events to them.
pub struct ChannelManager {
    channels: Vec<Box<dyn BaseChannel>>,
    retry_base: Duration,
}

impl ChannelManager {
    pub fn new(channels: Vec<Box<dyn BaseChannel>>) -> Self {
        Self {
            channels,
            retry_base: Duration::from_secs(1),
        }
    }

    /// Shorter retry spacing (tests).
    #[must_use]
    pub fn with_retry_base(mut self, retry_base: Duration) -> Self {
        self.retry_base = retry_base;
        self
    }

    pub fn enabled_channels(&self) -> Vec<String> {
        self.channels.iter().map(|c| c.name().to_string()).collect()
    }

    pub async fn start_all(&mut self) -> Result<()> {
        for channel in &mut self.channels {
            let name = channel.name().to_string();
            info!("Starting channel: {}", name);
            if let Err(e) = channel.start().await {
                error!("Failed to start channel {}: {}", name, e);
                return Err(anyhow::anyhow!("Failed to start channel {}: {}", name, e));
            }
            info!("Channel {} started successfully", name);
        }
        Ok(())
    }

    pub async fn stop_all(&mut self) -> Result<()> {
        for channel in &mut self.channels {
            channel.stop().await?;
        }
        Ok(())
    }

    fn find(&self, name: &str) -> Option<&dyn BaseChannel> {
        self.channels
            .iter()
            .find(|c| c.name() == name)
            .map(|c| &**c)
    }

    /// Send with up to `MAX_SEND_ATTEMPTS` tries. Returns whether delivery succeeded.
    pub async fn send(&self, msg: &OutboundMessage) -> bool {
        let Some(channel) = self.find(&msg.channel) else {
            error!(
                "No channel found for: {} (available channels: {:?})",
                msg.channel,
                self.enabled_channels()
            );
            return false;
        };

        for attempt in 1..=MAX_SEND_ATTEMPTS {
            let err = match channel.send(msg).await {
                Ok(()) => {
                    debug!(
                        "sent message to {}:{} ({} bytes)",
                        msg.channel,
                        msg.chat_id,
                        msg.content.len()
                    );
                    return true;
                }
                Err(e) => classify_send_error(&msg.channel, e),
            };
            if !err.is_retryable() {
                error!("Dropping message to {}: {}", msg.channel, err);
                return false;
            }
            if attempt == MAX_SEND_ATTEMPTS {
                error!(
                    "Error sending message to {} channel after {} attempts: {}",
                    msg.channel, MAX_SEND_ATTEMPTS, err
                );
                return false;
            }
            warn!(
                "Send to {} failed (attempt {}/{}): {}, retrying...",
                msg.channel, attempt, MAX_SEND_ATTEMPTS, err
            );
            tokio::time::sleep(self.retry_base * attempt).await;
        }
        false
    }

    pub async fn answer_callback(&self, channel: &str, callback_id: &str) -> bool {
        let Some(ch) = self.find(channel) else {
            error!("No channel found for callback ack: {}", channel);
            return false;
        };
        match ch.answer_callback(callback_id).await {
            Ok(()) => true,
            Err(e) => {
                warn!("Callback ack failed for {}:{}: {}", channel, callback_id, e);
                false
            }
        }
    }

    pub async fn deliver(&self, event: &OutboundEvent) -> bool {
        match event {
            OutboundEvent::Message(msg) => self.send(msg).await,
            OutboundEvent::CallbackAck {
                channel,
                callback_id,
            } => self.answer_callback(channel, callback_id).await,
        }
    }

    /// Deliver outbound events until the queue closes, then stop all channels.
    pub async fn run(mut self, mut outbound_rx: mpsc::Receiver<OutboundEvent>) {
        while let Some(event) = outbound_rx.recv().await {
            self.deliver(&event).await;
        }
        warn!("Outbound event receiver closed");
        if let Err(e) = self.stop_all().await {
            error!("Error stopping channels during shutdown: {}", e);
        }
    }
}

/// Typed errors raised by a channel keep their kind; anything else is a transport failure.
fn classify_send_error(channel: &str, err: anyhow::Error) -> NavigatorError {
    match err.downcast::<NavigatorError>() {
        Ok(typed) => typed,
        Err(other) => NavigatorError::Channel {
            channel: channel.to_string(),
            message: format!("{:#}", other),
        },
    }
}
