use super::*;

#[test]
fn test_command_event_has_reply_context() {
    let event = InboundEvent::command("telegram", "user1", "chat42", "/start");
    assert_eq!(event.chat_id.as_deref(), Some("chat42"));
    assert_eq!(
        event.kind,
        EventKind::Command {
            text: "/start".to_string()
        }
    );
    assert_eq!(event.session_key(), "telegram:chat42");
}

#[test]
fn test_callback_without_context_session_key() {
    let event = InboundEvent::callback("telegram", "user1", None, "cb-1", "skylight");
    assert!(event.chat_id.is_none());
    assert_eq!(event.session_key(), "telegram:-");
}

#[test]
fn test_event_kind_serializes_tagged() {
    let kind = EventKind::Callback {
        id: "cb-9".to_string(),
        data: "skylight".to_string(),
    };
    let json = serde_json::to_value(&kind).unwrap();
    assert_eq!(json["kind"], "callback");
    assert_eq!(json["data"], "skylight");
}

#[test]
fn test_reply_with_buttons() {
    let reply = Reply::text("hello").with_buttons(vec![vec![Button::callback("GO", "go")]]);
    assert_eq!(reply.text, "hello");
    assert_eq!(
        reply.buttons[0][0].action,
        ButtonAction::Callback("go".to_string())
    );
}

#[test]
fn test_outbound_event_channel() {
    let ack = OutboundEvent::CallbackAck {
        channel: "telegram".to_string(),
        callback_id: "cb".to_string(),
    };
    assert_eq!(ack.channel(), "telegram");
}
