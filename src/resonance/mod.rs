//! Shared interaction counter and the reflective loop monitor that watches it.

pub mod monitor;
pub mod state;

pub use monitor::{DiagnosticReport, check_loop};
pub use state::ResonanceState;
