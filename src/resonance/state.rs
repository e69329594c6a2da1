use crate::config::ResonanceConfig;
use crate::resonance::monitor::{DiagnosticReport, check_loop};
use chrono::{DateTime, Local};

/// Process-wide resonance counter shared by every conversation.
///
/// Only `interaction_count` ever changes; the rest is fixed at construction.
/// The owner (`Dispatcher`) keeps it behind a mutex so a read-increment-write
/// never interleaves with another handler.
#[derive(Debug, Clone)]
pub struct ResonanceState {
    interaction_count: u64,
    loop_threshold: u64,
    core_verb: String,
    next_seed: String,
}

impl ResonanceState {
    /// `loop_threshold` must be positive; a zero is clamped to 1.
    pub fn new(loop_threshold: u64, core_verb: &str, next_seed: &str) -> Self {
        Self {
            interaction_count: 0,
            loop_threshold: loop_threshold.max(1),
            core_verb: core_verb.to_string(),
            next_seed: next_seed.to_string(),
        }
    }

    pub fn from_config(config: &ResonanceConfig) -> Self {
        Self::new(config.loop_threshold, &config.core_verb, &config.next_seed)
    }

    pub fn interaction_count(&self) -> u64 {
        self.interaction_count
    }

    pub fn loop_threshold(&self) -> u64 {
        self.loop_threshold
    }

    pub fn core_verb(&self) -> &str {
        &self.core_verb
    }

    pub fn next_seed(&self) -> &str {
        &self.next_seed
    }

    /// Count one dispatched command. Returns the new count.
    pub fn record_interaction(&mut self) -> u64 {
        self.interaction_count = self.interaction_count.saturating_add(1);
        self.interaction_count
    }

    /// Run the monitor against the current state.
    pub fn reflect(&self, now: DateTime<Local>) -> Option<DiagnosticReport> {
        check_loop(
            self.interaction_count,
            self.loop_threshold,
            &self.core_verb,
            &self.next_seed,
            now,
        )
    }
}

impl Default for ResonanceState {
    fn default() -> Self {
        Self::from_config(&ResonanceConfig::default())
    }
}
