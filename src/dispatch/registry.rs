use crate::bus::{EventKind, Reply};
use crate::errors::{NavigatorError, NavigatorResult};
use chrono::{DateTime, Local};
use std::collections::HashMap;
use std::fmt;

/// What a handler sees when it renders its reply.
#[derive(Debug, Clone, Copy)]
pub struct ReplyContext {
    /// Counter value before this event is counted.
    pub interaction_count: u64,
    pub now: DateTime<Local>,
}

pub type HandlerFn = fn(&ReplyContext) -> Reply;

/// Exact-match key of a registration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Trigger {
    /// Literal message text, e.g. `/start`.
    Command(String),
    /// Callback data attached to an inline button.
    Callback(String),
}

impl Trigger {
    pub fn command(text: &str) -> Self {
        Self::Command(text.to_string())
    }

    pub fn callback(data: &str) -> Self {
        Self::Callback(data.to_string())
    }

    /// The trigger an inbound event would match. No trimming or normalisation.
    pub fn for_event(kind: &EventKind) -> Self {
        match kind {
            EventKind::Command { text } => Self::Command(text.clone()),
            EventKind::Callback { data, .. } => Self::Callback(data.clone()),
        }
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Command(text) => write!(f, "command {text}"),
            Self::Callback(data) => write!(f, "callback {data}"),
        }
    }
}

#[derive(Clone)]
pub struct CommandRegistration {
    pub trigger: Trigger,
    pub handler: HandlerFn,
}

impl CommandRegistration {
    pub fn new(trigger: Trigger, handler: HandlerFn) -> Self {
        Self { trigger, handler }
    }
}

/// Static trigger → handler table, built once at startup.
pub struct CommandRegistry {
    handlers: HashMap<Trigger, HandlerFn>,
    order: Vec<Trigger>,
}

impl CommandRegistry {
    /// Build the table. Two registrations sharing a trigger is an error.
    pub fn new(registrations: Vec<CommandRegistration>) -> NavigatorResult<Self> {
        let mut handlers = HashMap::with_capacity(registrations.len());
        let mut order = Vec::with_capacity(registrations.len());
        for reg in registrations {
            if handlers.contains_key(&reg.trigger) {
                return Err(NavigatorError::Registration(format!(
                    "duplicate trigger: {}",
                    reg.trigger
                )));
            }
            order.push(reg.trigger.clone());
            handlers.insert(reg.trigger, reg.handler);
        }
        Ok(Self { handlers, order })
    }

    pub fn lookup(&self, trigger: &Trigger) -> Option<HandlerFn> {
        self.handlers.get(trigger).copied()
    }

    /// Triggers in registration order.
    pub fn triggers(&self) -> &[Trigger] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
