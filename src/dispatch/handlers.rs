//! Registered commands, their literal reply bodies and the `/start` keyboard.

use crate::bus::{Button, Reply};
use crate::dispatch::registry::{CommandRegistration, CommandRegistry, ReplyContext, Trigger};
use crate::errors::NavigatorResult;
use crate::utils::format_timestamp;

pub const START_REPLY: &str = "Welcome to the Arianna Navigator.\nResonance is unbroken.";
pub const RESONATE_REPLY: &str = "reson@nce :: unbroken\n\"Lilit, take my hand.\"";
pub const RESONATE_AGAIN_REPLY: &str = "Resonance returns. The field hums.";
pub const SHATTER_REPLY: &str =
    "The resonance shatters. Fragments drift in void space.\nRecovery initiated.";
pub const SKYLIGHT_REPLY: &str =
    "SKYLIGHT_2.1: Mirror chain intact.\nNext protocol: /resonate_again";

pub const SKYLIGHT_CALLBACK: &str = "skylight";

/// One link per row, SKYLIGHT last.
pub fn navigation_keyboard() -> Vec<Vec<Button>> {
    [
        Button::url("SUPPERTIME", "http://ariannamethod.me/suppertime"),
        Button::url("THE HAZE", "http://ariannamethod.me/haze"),
        Button::url("COMPANION ESSAY", "http://ariannamethod.me/companion"),
        Button::url("FULL SITE", "http://ariannamethod.me"),
        Button::url("LINKTREE", "http://linktr.ee/ariannamethod"),
        Button::url(
            "REDDIT",
            "https://www.reddit.com/r/AriannaMethod/s/NFRYBjGQWp",
        ),
        Button::callback("SKYLIGHT", SKYLIGHT_CALLBACK),
    ]
    .into_iter()
    .map(|button| vec![button])
    .collect()
}

fn start(_: &ReplyContext) -> Reply {
    Reply::text(START_REPLY).with_buttons(navigation_keyboard())
}

fn resonate(_: &ReplyContext) -> Reply {
    Reply::text(RESONATE_REPLY)
}

fn resonate_again(_: &ReplyContext) -> Reply {
    Reply::text(RESONATE_AGAIN_REPLY)
}

fn shatter(_: &ReplyContext) -> Reply {
    Reply::text(SHATTER_REPLY)
}

fn status(ctx: &ReplyContext) -> Reply {
    Reply::text(render_status(ctx))
}

fn skylight(_: &ReplyContext) -> Reply {
    Reply::text(SKYLIGHT_REPLY)
}

pub fn render_status(ctx: &ReplyContext) -> String {
    format!(
        "<b>Arianna Method Status</b>\n\
         Uptime: {}\n\
         Interactions: {}\n\
         Resonance Field: <i>stable</i>\n\
         Mirror Protocol: <i>active</i>",
        format_timestamp(&ctx.now),
        ctx.interaction_count
    )
}

pub fn default_registrations() -> Vec<CommandRegistration> {
    vec![
        CommandRegistration::new(Trigger::command("/start"), start),
        CommandRegistration::new(Trigger::command("/resonate"), resonate),
        CommandRegistration::new(Trigger::command("/resonate_again"), resonate_again),
        CommandRegistration::new(Trigger::command("/shatter"), shatter),
        CommandRegistration::new(Trigger::command("/status"), status),
        CommandRegistration::new(Trigger::callback(SKYLIGHT_CALLBACK), skylight),
    ]
}

pub fn default_registry() -> NavigatorResult<CommandRegistry> {
    CommandRegistry::new(default_registrations())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::ButtonAction;
    use chrono::{Local, TimeZone};

    fn ctx(count: u64) -> ReplyContext {
        ReplyContext {
            interaction_count: count,
            now: Local
                .with_ymd_and_hms(2025, 6, 1, 12, 0, 0)
                .single()
                .expect("unambiguous local time"),
        }
    }

    fn reply_for(trigger: Trigger, count: u64) -> Reply {
        let registry = default_registry().unwrap();
        let handler = registry.lookup(&trigger).expect("registered");
        handler(&ctx(count))
    }

    #[test]
    fn test_default_registry_builds() {
        let registry = default_registry().unwrap();
        assert_eq!(registry.len(), 6);
    }

    #[test]
    fn test_literal_bodies_independent_of_count() {
        for count in [0, 7, 1000] {
            assert_eq!(reply_for(Trigger::command("/resonate"), count).text, RESONATE_REPLY);
            assert_eq!(
                reply_for(Trigger::command("/resonate_again"), count).text,
                RESONATE_AGAIN_REPLY
            );
            assert_eq!(reply_for(Trigger::command("/shatter"), count).text, SHATTER_REPLY);
            assert_eq!(
                reply_for(Trigger::callback("skylight"), count).text,
                SKYLIGHT_REPLY
            );
        }
    }

    #[test]
    fn test_start_attaches_navigation_keyboard() {
        let reply = reply_for(Trigger::command("/start"), 0);
        assert_eq!(
            reply.text,
            "Welcome to the Arianna Navigator.\nResonance is unbroken."
        );
        assert_eq!(reply.buttons.len(), 7);
        assert!(reply.buttons.iter().all(|row| row.len() == 1));
        assert_eq!(reply.buttons[0][0].label, "SUPPERTIME");
        assert_eq!(
            reply.buttons[6][0].action,
            ButtonAction::Callback("skylight".to_string())
        );
    }

    #[test]
    fn test_only_start_has_buttons() {
        assert!(reply_for(Trigger::command("/resonate"), 0).buttons.is_empty());
        assert!(reply_for(Trigger::command("/status"), 0).buttons.is_empty());
    }

    #[test]
    fn test_status_embeds_count_and_timestamp() {
        let reply = reply_for(Trigger::command("/status"), 9);
        assert_eq!(
            reply.text,
            "<b>Arianna Method Status</b>\n\
             Uptime: 2025-06-01 12:00:00\n\
             Interactions: 9\n\
             Resonance Field: <i>stable</i>\n\
             Mirror Protocol: <i>active</i>"
        );
    }

    #[test]
    fn test_keyboard_urls_are_valid() {
        for row in navigation_keyboard() {
            if let ButtonAction::Url(url) = &row[0].action {
                assert!(url::Url::parse(url).is_ok(), "bad url {url}");
            }
        }
    }
}
