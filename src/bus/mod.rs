pub mod events;
pub mod queue;

pub use events::{
    Button, ButtonAction, EventKind, InboundEvent, OutboundEvent, OutboundMessage, Reply,
};
pub use queue::EventBus;
