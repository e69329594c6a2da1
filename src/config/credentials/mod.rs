use super::schema::Config;
use tracing::debug;

macro_rules! define_credentials {
    ($( $name:literal, $env:literal => $($path:ident).+ );* $(;)?) => {
        /// All known credential slot names.
        pub const CREDENTIAL_NAMES: &[&str] = &[$($name),*];

        /// (slot name, env var name) pairs.
        pub const CREDENTIAL_ENV_VARS: &[(&str, &str)] = &[$(($name, $env)),*];

        /// Get a mutable reference to a credential field by slot name.
        pub fn get_credential_field<'a>(config: &'a mut Config, name: &str) -> Option<&'a mut String> {
            match name {
                $($name => Some(&mut config.$($path).+),)*
                _ => None,
            }
        }

        /// Get the current value of a credential field by slot name.
        pub fn get_credential_value<'a>(config: &'a Config, name: &str) -> Option<&'a str> {
            match name {
                $($name => Some(config.$($path).+.as_str()),)*
                _ => None,
            }
        }
    };
}

// Later rows win when several env vars feed the same field.
define_credentials! {
    "telegram-token",     "NAVIGATOR_TELEGRAM_TOKEN" => telegram.token;
    "telegram-bot-token", "TELEGRAM_BOT_TOKEN"       => telegram.token;
}

/// Apply credential overrides from `lookup` (env vars in production, a map in tests).
///
/// Any variable that is set and non-empty overwrites the corresponding
/// config field, so the token never has to live in a file.
pub fn apply_overrides_with<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    for &(name, env) in CREDENTIAL_ENV_VARS {
        let Some(val) = lookup(env) else {
            continue;
        };
        if val.is_empty() {
            continue;
        }
        if let Some(field) = get_credential_field(config, name) {
            debug!("loaded {name} from {env}");
            *field = val;
        }
    }
}

/// Names of credential slots that currently hold a value.
pub fn configured_credentials(config: &Config) -> Vec<&'static str> {
    CREDENTIAL_NAMES
        .iter()
        .copied()
        .filter(|name| get_credential_value(config, name).is_some_and(|v| !v.is_empty()))
        .collect()
}

#[cfg(test)]
mod tests;
