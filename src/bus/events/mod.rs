use serde::{Deserialize, Serialize};

/// What the user did: typed a command, or pressed an inline button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventKind {
    Command {
        text: String,
    },
    Callback {
        /// Provider id of the callback query, needed to acknowledge it.
        id: String,
        data: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundEvent {
    pub channel: String,
    pub sender_id: String,
    /// Conversation to reply into. `None` for inline-mode callbacks,
    /// which carry no originating message.
    pub chat_id: Option<String>,
    pub kind: EventKind,
}

impl InboundEvent {
    pub fn command(channel: &str, sender_id: &str, chat_id: &str, text: &str) -> Self {
        Self {
            channel: channel.to_string(),
            sender_id: sender_id.to_string(),
            chat_id: Some(chat_id.to_string()),
            kind: EventKind::Command {
                text: text.to_string(),
            },
        }
    }

    pub fn callback(
        channel: &str,
        sender_id: &str,
        chat_id: Option<&str>,
        id: &str,
        data: &str,
    ) -> Self {
        Self {
            channel: channel.to_string(),
            sender_id: sender_id.to_string(),
            chat_id: chat_id.map(str::to_string),
            kind: EventKind::Callback {
                id: id.to_string(),
                data: data.to_string(),
            },
        }
    }

    pub fn session_key(&self) -> String {
        format!(
            "{}:{}",
            self.channel,
            self.chat_id.as_deref().unwrap_or("-")
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ButtonAction {
    Url(String),
    Callback(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    pub label: String,
    pub action: ButtonAction,
}

impl Button {
    pub fn url(label: &str, url: &str) -> Self {
        Self {
            label: label.to_string(),
            action: ButtonAction::Url(url.to_string()),
        }
    }

    pub fn callback(label: &str, data: &str) -> Self {
        Self {
            label: label.to_string(),
            action: ButtonAction::Callback(data.to_string()),
        }
    }
}

/// Reply body plus an optional inline keyboard (rows of buttons).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub text: String,
    pub buttons: Vec<Vec<Button>>,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            buttons: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_buttons(mut self, buttons: Vec<Vec<Button>>) -> Self {
        self.buttons = buttons;
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub channel: String,
    pub chat_id: String,
    pub content: String,
    pub buttons: Vec<Vec<Button>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutboundEvent {
    Message(OutboundMessage),
    CallbackAck {
        channel: String,
        callback_id: String,
    },
}

impl OutboundEvent {
    pub fn channel(&self) -> &str {
        match self {
            Self::Message(msg) => &msg.channel,
            Self::CallbackAck { channel, .. } => channel,
        }
    }
}

#[cfg(test)]
mod tests;
