use crate::bus::queue::publish_inbound;
use crate::bus::{Button, ButtonAction, InboundEvent, OutboundMessage};
use crate::channels::base::{BaseChannel, TELEGRAM_MESSAGE_LIMIT, split_message};
use crate::config::TelegramConfig;
use crate::errors::{NavigatorError, NavigatorResult};
use anyhow::Result;
use async_trait::async_trait;
use teloxide::RequestError;
use teloxide::prelude::*;
use teloxide::types::{
    CallbackQuery, CallbackQueryId, InlineKeyboardButton, InlineKeyboardMarkup,
    Message as TgMessage, ParseMode, Update,
};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub const CHANNEL_NAME: &str = "telegram";

/// Long-polling Telegram transport: updates in, HTML messages and callback answers out.
pub struct TelegramChannel {
    inbound_tx: mpsc::Sender<InboundEvent>,
    bot: Bot,
    dispatcher_task: Option<JoinHandle<()>>,
}

impl TelegramChannel {
    pub fn new(config: &TelegramConfig, inbound_tx: mpsc::Sender<InboundEvent>) -> Self {
        let bot = Bot::new(&config.token);
        Self {
            inbound_tx,
            bot,
            dispatcher_task: None,
        }
    }
}

fn message_event(msg: &TgMessage) -> Option<InboundEvent> {
    let text = msg.text()?;
    let sender_id = msg
        .from
        .as_ref()
        .map(|u| u.id.to_string())
        .unwrap_or_default();
    Some(InboundEvent::command(
        CHANNEL_NAME,
        &sender_id,
        &msg.chat.id.to_string(),
        text,
    ))
}

fn callback_event(q: &CallbackQuery) -> Option<InboundEvent> {
    let data = q.data.as_deref()?;
    // Inline-mode callbacks have no message, only an inline_message_id.
    let chat_id = q.message.as_ref().map(|m| m.chat().id.to_string());
    Some(InboundEvent::callback(
        CHANNEL_NAME,
        &q.from.id.to_string(),
        chat_id.as_deref(),
        &q.id.0,
        data,
    ))
}

fn rejected(message: String) -> NavigatorError {
    NavigatorError::Rejected {
        channel: CHANNEL_NAME.to_string(),
        message,
    }
}

/// API errors mean Telegram refused this message; everything else is transport.
fn delivery_error(err: RequestError) -> NavigatorError {
    let message = err.to_string();
    match err {
        RequestError::Api(_) => rejected(message),
        _ => NavigatorError::Channel {
            channel: CHANNEL_NAME.to_string(),
            message,
        },
    }
}

/// Convert reply buttons into a Telegram inline keyboard.
pub(crate) fn build_keyboard(
    rows: &[Vec<Button>],
) -> NavigatorResult<Option<InlineKeyboardMarkup>> {
    if rows.is_empty() {
        return Ok(None);
    }
    let mut keyboard = Vec::with_capacity(rows.len());
    for row in rows {
        let mut buttons = Vec::with_capacity(row.len());
        for button in row {
            buttons.push(match &button.action {
                ButtonAction::Url(raw) => {
                    let url = url::Url::parse(raw)
                        .map_err(|e| rejected(format!("invalid button url {}: {}", raw, e)))?;
                    InlineKeyboardButton::url(button.label.clone(), url)
                }
                ButtonAction::Callback(data) => {
                    InlineKeyboardButton::callback(button.label.clone(), data.clone())
                }
            });
        }
        keyboard.push(buttons);
    }
    Ok(Some(InlineKeyboardMarkup::new(keyboard)))
}

#[async_trait]
impl BaseChannel for TelegramChannel {
    fn name(&self) -> &str {
        CHANNEL_NAME
    }

    async fn start(&mut self) -> Result<()> {
        tracing::info!("Initializing Telegram bot...");

        let message_tx = self.inbound_tx.clone();
        let callback_tx = self.inbound_tx.clone();

        let handler = dptree::entry()
            .branch(Update::filter_message().endpoint(move |msg: TgMessage| {
                let inbound_tx = message_tx.clone();
                async move {
                    if let Some(event) = message_event(&msg) {
                        if let Err(e) = publish_inbound(&inbound_tx, event).await {
                            tracing::warn!("dropping telegram message: {}", e);
                        }
                    }
                    Ok::<(), anyhow::Error>(())
                }
            }))
            .branch(
                Update::filter_callback_query().endpoint(move |q: CallbackQuery| {
                    let inbound_tx = callback_tx.clone();
                    async move {
                        if let Some(event) = callback_event(&q) {
                            if let Err(e) = publish_inbound(&inbound_tx, event).await {
                                tracing::warn!("dropping telegram callback: {}", e);
                            }
                        } else {
                            tracing::debug!("callback query {} without data ignored", q.id.0);
                        }
                        Ok::<(), anyhow::Error>(())
                    }
                }),
            );

        tracing::info!("Starting Telegram dispatcher...");
        let mut dispatcher = Dispatcher::builder(self.bot.clone(), handler).build();

        // Spawn dispatcher in background task so it doesn't block
        self.dispatcher_task = Some(tokio::spawn(async move {
            dispatcher.dispatch().await;
        }));

        tracing::info!("Telegram channel started successfully");
        Ok(())
    }

    async fn stop(&mut self) -> Result<()> {
        if let Some(task) = self.dispatcher_task.take() {
            task.abort();
            tracing::info!("Telegram dispatcher stopped");
        }
        Ok(())
    }

    async fn send(&self, msg: &OutboundMessage) -> Result<()> {
        if msg.channel != CHANNEL_NAME {
            return Ok(());
        }

        let chat_id = msg
            .chat_id
            .parse::<i64>()
            .map_err(|_| rejected(format!("invalid telegram chat id: {}", msg.chat_id)))?;
        let mut keyboard = build_keyboard(&msg.buttons)?;
        let chunks = split_message(&msg.content, TELEGRAM_MESSAGE_LIMIT);
        let last = chunks.len().saturating_sub(1);

        for (idx, chunk) in chunks.into_iter().enumerate() {
            // Bodies already carry their HTML markup
            let request = self
                .bot
                .send_message(ChatId(chat_id), chunk)
                .parse_mode(ParseMode::Html);
            if idx == last
                && let Some(markup) = keyboard.take()
            {
                request.reply_markup(markup).await.map_err(delivery_error)?;
            } else {
                request.await.map_err(delivery_error)?;
            }
        }

        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str) -> Result<()> {
        self.bot
            .answer_callback_query(CallbackQueryId(callback_id.to_string()))
            .await
            .map_err(delivery_error)?;
        Ok(())
    }
}
