pub mod base;
pub mod manager;
pub mod telegram;

pub use base::BaseChannel;
pub use manager::ChannelManager;
pub use telegram::TelegramChannel;
