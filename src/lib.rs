#![warn(clippy::pedantic)]
// Noisy doc/signature lints
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
// format!("{}", x) is kept over format!("{x}")
#![allow(clippy::uninlined_format_args)]
// bus::EventBus, dispatch::Dispatcher
#![allow(clippy::module_name_repetitions)]

pub mod bus;
pub mod channels;
pub mod cli;
pub mod config;
pub mod dispatch;
pub(crate) mod errors;
pub mod gateway;
pub mod heartbeat;
pub mod resonance;
pub(crate) mod utils;

pub use errors::{NavigatorError, NavigatorResult};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
