pub mod service;

pub use service::{KEEPALIVE_MESSAGE, KeepAliveService};
