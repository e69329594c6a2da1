use serde::{Deserialize, Serialize};

#[derive(Clone, Default, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Bot API token. Usually injected through `TELEGRAM_BOT_TOKEN`.
    #[serde(default)]
    pub token: String,
}

redact_debug!(TelegramConfig, redact(token),);
