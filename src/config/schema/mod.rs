use serde::{Deserialize, Serialize};
use tracing::warn;

/// Generates a `Debug` impl that redacts secret fields.
///
/// Field specifiers:
/// - `field_name`            : printed normally via `&self.field_name`
/// - `redact(field_name)`    : `String` field: shows `[empty]` or `[REDACTED]`
macro_rules! redact_debug {
    // Internal: emit a single .field() call
    (@field $builder:ident, $self:ident, redact($field:ident)) => {
        $builder.field(
            stringify!($field),
            &if $self.$field.is_empty() {
                "[empty]"
            } else {
                "[REDACTED]"
            },
        );
    };
    (@field $builder:ident, $self:ident, $field:ident) => {
        $builder.field(stringify!($field), &$self.$field);
    };

    // Internal: recursive TT muncher
    (@fields $builder:ident, $self:ident,) => {};
    (@fields $builder:ident, $self:ident, redact($field:ident), $($rest:tt)*) => {
        redact_debug!(@field $builder, $self, redact($field));
        redact_debug!(@fields $builder, $self, $($rest)*);
    };
    (@fields $builder:ident, $self:ident, $field:ident, $($rest:tt)*) => {
        redact_debug!(@field $builder, $self, $field);
        redact_debug!(@fields $builder, $self, $($rest)*);
    };

    // Entry point
    ($struct_name:ident, $($fields:tt)*) => {
        impl std::fmt::Debug for $struct_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let mut builder = f.debug_struct(stringify!($struct_name));
                redact_debug!(@fields builder, self, $($fields)*);
                builder.finish()
            }
        }
    };
}

// Submodules are declared after the macro so they can use `redact_debug!`
mod channels;

pub use channels::*;

fn default_true() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Gateway (liveness endpoint)
// ---------------------------------------------------------------------------

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            host: default_host(),
            port: default_port(),
        }
    }
}

// ---------------------------------------------------------------------------
// Resonance counter
// ---------------------------------------------------------------------------

fn default_loop_threshold() -> u64 {
    10
}

fn default_core_verb() -> String {
    "entangle".to_string()
}

fn default_next_seed() -> String {
    "StormHammer_v2.5".to_string()
}

/// Parameters of the shared interaction counter and its diagnostic report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResonanceConfig {
    /// A Resonance Log is emitted every `loop_threshold` interactions.
    #[serde(default = "default_loop_threshold", rename = "loopThreshold")]
    pub loop_threshold: u64,
    #[serde(default = "default_core_verb", rename = "coreVerb")]
    pub core_verb: String,
    #[serde(default = "default_next_seed", rename = "nextSeed")]
    pub next_seed: String,
}

impl Default for ResonanceConfig {
    fn default() -> Self {
        Self {
            loop_threshold: default_loop_threshold(),
            core_verb: default_core_verb(),
            next_seed: default_next_seed(),
        }
    }
}

// ---------------------------------------------------------------------------
// Keep-alive pinger
// ---------------------------------------------------------------------------

fn default_keepalive_interval() -> u64 {
    600
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeepAliveConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_keepalive_interval", rename = "intervalSecs")]
    pub interval_secs: u64,
}

impl Default for KeepAliveConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: default_keepalive_interval(),
        }
    }
}

// ---------------------------------------------------------------------------
// Root
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub resonance: ResonanceConfig,
    #[serde(default)]
    pub keepalive: KeepAliveConfig,
}

impl Config {
    /// Validate configuration values
    pub fn validate(&self) -> Result<(), crate::errors::NavigatorError> {
        self.validate_telegram()?;
        self.validate_gateway()?;
        self.validate_resonance()?;
        self.validate_keepalive()?;
        Ok(())
    }

    fn validate_telegram(&self) -> Result<(), crate::errors::NavigatorError> {
        use crate::errors::NavigatorError;

        if self.telegram.token.trim().is_empty() {
            return Err(NavigatorError::Config(
                "No TELEGRAM_BOT_TOKEN found in environment variables".into(),
            ));
        }
        Ok(())
    }

    fn validate_gateway(&self) -> Result<(), crate::errors::NavigatorError> {
        use crate::errors::NavigatorError;

        if self.gateway.port == 0 {
            return Err(NavigatorError::Config("gateway.port must be > 0".into()));
        }
        if self.gateway.port < 1024 {
            warn!(
                "gateway.port {} is a privileged port (< 1024), may require elevated permissions",
                self.gateway.port
            );
        }
        Ok(())
    }

    fn validate_resonance(&self) -> Result<(), crate::errors::NavigatorError> {
        use crate::errors::NavigatorError;

        if self.resonance.loop_threshold == 0 {
            return Err(NavigatorError::Config(
                "resonance.loopThreshold must be > 0".into(),
            ));
        }
        if self.resonance.core_verb.is_empty() {
            warn!("resonance.coreVerb is empty, Resonance Log will show a blank verb");
        }
        Ok(())
    }

    fn validate_keepalive(&self) -> Result<(), crate::errors::NavigatorError> {
        use crate::errors::NavigatorError;

        if self.keepalive.interval_secs == 0 {
            return Err(NavigatorError::Config(
                "keepalive.intervalSecs must be > 0".into(),
            ));
        }
        Ok(())
    }
}
