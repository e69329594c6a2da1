use crate::utils::format_timestamp;
use chrono::{DateTime, Local};

/// Self-diagnostic emitted every `loop_threshold` interactions. Never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticReport {
    pub timestamp: DateTime<Local>,
    pub core_verb: String,
    pub interaction_count: u64,
    pub next_seed: String,
}

impl DiagnosticReport {
    /// HTML body sent back to the conversation.
    pub fn render(&self) -> String {
        format!(
            "<b>Resonance Log</b>\n\
             Timestamp: {}\n\
             Core Verb: <i>{}</i>\n\
             Interactions: {}\n\
             Next seed: {}",
            format_timestamp(&self.timestamp),
            self.core_verb,
            self.interaction_count,
            self.next_seed
        )
    }
}

/// Decide whether the counter has closed a loop.
///
/// Fires iff `interaction_count % loop_threshold == 0`, zero included.
/// A zero threshold never fires.
pub fn check_loop(
    interaction_count: u64,
    loop_threshold: u64,
    core_verb: &str,
    next_seed: &str,
    now: DateTime<Local>,
) -> Option<DiagnosticReport> {
    if loop_threshold == 0 || interaction_count % loop_threshold != 0 {
        return None;
    }
    Some(DiagnosticReport {
        timestamp: now,
        core_verb: core_verb.to_string(),
        interaction_count,
        next_seed: next_seed.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2025, 1, 2, 3, 4, 5)
            .single()
            .expect("unambiguous local time")
    }

    #[test]
    fn test_fires_only_on_multiples_of_threshold() {
        let fired: Vec<u64> = (1..=30)
            .filter(|&n| check_loop(n, 10, "entangle", "seed", fixed_now()).is_some())
            .collect();
        assert_eq!(fired, vec![10, 20, 30]);
    }

    #[test]
    fn test_fires_at_zero() {
        assert!(check_loop(0, 10, "entangle", "seed", fixed_now()).is_some());
    }

    #[test]
    fn test_zero_threshold_never_fires() {
        assert!(check_loop(0, 0, "entangle", "seed", fixed_now()).is_none());
        assert!(check_loop(10, 0, "entangle", "seed", fixed_now()).is_none());
    }

    #[test]
    fn test_report_carries_inputs() {
        let report = check_loop(20, 10, "entangle", "StormHammer_v2.5", fixed_now()).unwrap();
        assert_eq!(report.interaction_count, 20);
        assert_eq!(report.core_verb, "entangle");
        assert_eq!(report.next_seed, "StormHammer_v2.5");
        assert_eq!(report.timestamp, fixed_now());
    }

    #[test]
    fn test_render_layout() {
        let report = check_loop(10, 10, "entangle", "StormHammer_v2.5", fixed_now()).unwrap();
        assert_eq!(
            report.render(),
            "<b>Resonance Log</b>\n\
             Timestamp: 2025-01-02 03:04:05\n\
             Core Verb: <i>entangle</i>\n\
             Interactions: 10\n\
             Next seed: StormHammer_v2.5"
        );
    }
}
