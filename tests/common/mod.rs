// Shared test helpers; not every test binary uses every item.
#![allow(unused)]

use async_trait::async_trait;
use navigator::bus::{InboundEvent, Reply};
use navigator::dispatch::{Dispatcher, ReplySink, default_registry};
use navigator::resonance::ResonanceState;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recorded {
    Reply { chat_id: String, reply: Reply },
    Ack(String),
}

/// Sink that records everything the dispatcher emits.
#[derive(Clone, Default)]
pub struct RecordingSink {
    pub events: Arc<Mutex<Vec<Recorded>>>,
}

impl RecordingSink {
    pub fn take(&self) -> Vec<Recorded> {
        std::mem::take(&mut *self.events.lock().unwrap())
    }

    pub fn texts(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|e| match e {
                Recorded::Reply { reply, .. } => Some(reply.text.clone()),
                Recorded::Ack(_) => None,
            })
            .collect()
    }
}

#[async_trait]
impl ReplySink for RecordingSink {
    async fn send(&self, chat_id: &str, reply: &Reply) -> anyhow::Result<()> {
        self.events.lock().unwrap().push(Recorded::Reply {
            chat_id: chat_id.to_string(),
            reply: reply.clone(),
        });
        Ok(())
    }

    async fn ack_callback(&self, callback_id: &str) -> anyhow::Result<()> {
        self.events
            .lock()
            .unwrap()
            .push(Recorded::Ack(callback_id.to_string()));
        Ok(())
    }
}

pub fn fresh_dispatcher() -> Dispatcher {
    Dispatcher::new(
        default_registry().expect("default registry"),
        ResonanceState::default(),
    )
}

pub fn command(chat_id: &str, text: &str) -> InboundEvent {
    InboundEvent::command("telegram", "tester", chat_id, text)
}

pub fn callback(chat_id: Option<&str>, id: &str, data: &str) -> InboundEvent {
    InboundEvent::callback("telegram", "tester", chat_id, id, data)
}
