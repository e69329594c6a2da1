use super::*;
use crate::bus::OutboundMessage;

fn make_outbound(chat_id: &str, content: &str) -> OutboundEvent {
    OutboundEvent::Message(OutboundMessage {
        channel: "telegram".to_string(),
        chat_id: chat_id.to_string(),
        content: content.to_string(),
        buttons: vec![],
    })
}

#[tokio::test]
async fn test_publish_inbound_succeeds() {
    let mut bus = EventBus::default();
    let mut rx = bus.take_inbound_rx().unwrap();

    let event = InboundEvent::command("telegram", "user1", "chat1", "/resonate");
    bus.publish_inbound(event).await.unwrap();

    let received = rx.try_recv().unwrap();
    assert_eq!(received.channel, "telegram");
    assert_eq!(received.sender_id, "user1");
}

#[tokio::test]
async fn test_publish_outbound_succeeds() {
    let mut bus = EventBus::default();
    let mut rx = bus.take_outbound_rx().unwrap();

    bus.publish_outbound(make_outbound("chat1", "hi"))
        .await
        .unwrap();

    match rx.try_recv().unwrap() {
        OutboundEvent::Message(msg) => {
            assert_eq!(msg.chat_id, "chat1");
            assert_eq!(msg.content, "hi");
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn test_receivers_can_only_be_taken_once() {
    let mut bus = EventBus::default();
    assert!(bus.take_inbound_rx().is_some());
    assert!(bus.take_inbound_rx().is_none());
    assert!(bus.take_outbound_rx().is_some());
    assert!(bus.take_outbound_rx().is_none());
}

#[tokio::test]
async fn test_publish_inbound_fails_when_receiver_dropped() {
    let mut bus = EventBus::default();
    drop(bus.take_inbound_rx());

    let event = InboundEvent::command("telegram", "u", "c", "/start");
    let result = bus.publish_inbound(event).await;
    assert!(result.is_err());
    assert!(
        format!("{:#}", result.unwrap_err()).contains("receiver closed"),
        "error should mention closed receiver"
    );
}

#[tokio::test(start_paused = true)]
async fn test_publish_outbound_times_out_when_queue_full() {
    let mut bus = EventBus::new(1, 1);
    let _rx = bus.take_outbound_rx().unwrap();

    bus.publish_outbound(make_outbound("c", "first"))
        .await
        .unwrap();
    // Capacity 1 and nobody reading: the second send waits until the timeout fires.
    let result = bus.publish_outbound(make_outbound("c", "second")).await;
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("timed out"));
}
