use castellan_event_bus::*;
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Eq)]
struct Submitted(pub usize);

#[derive(Clone, Debug, PartialEq, Eq)]
struct Delivered(pub &'static str);

#[tokio::test]
async fn broadcast_reaches_subscriber() {
    let bus = EventBus::new();
    let mut rx = bus.subscribe::<Submitted>().unwrap();

    assert_eq!(bus.publish(Submitted(42)).unwrap(), 1);

    let received = rx.next_event().await.unwrap();
    assert_eq!(*received, Submitted(42));
}

#[tokio::test]
async fn publish_without_subscribers_is_not_an_error() {
    let bus = EventBus::new();
    assert_eq!(bus.publish(Submitted(1)).unwrap(), 0);
    assert_eq!(bus.kind_of::<Submitted>(), Some(ChannelKind::Broadcast { capacity: DEFAULT_CAPACITY }));
}

#[tokio::test]
async fn lagging_receiver_skips_to_retained_events() {
    let bus = EventBus::with_capacity(2).unwrap();
    let mut rx = bus.subscribe::<Submitted>().unwrap();

    for i in 0..10 {
        bus.publish(Submitted(i)).unwrap();
    }

    let first = rx.next_event().await.unwrap();
    assert_eq!(first.0, 8);
    let second = rx.next_event().await.unwrap();
    assert_eq!(second.0, 9);
}

#[tokio::test]
async fn every_subscriber_gets_its_copy() {
    let bus = EventBus::new();
    let mut rx1 = bus.subscribe::<Submitted>().unwrap();
    let mut rx2 = bus.subscribe::<Submitted>().unwrap();

    bus.publish(Submitted(100)).unwrap();

    assert_eq!(rx1.next_event().await.unwrap().0, 100);
    assert_eq!(rx2.next_event().await.unwrap().0, 100);
}

#[tokio::test]
async fn event_types_are_isolated() {
    let bus = EventBus::new();
    let mut submitted = bus.subscribe::<Submitted>().unwrap();
    let mut delivered = bus.subscribe::<Delivered>().unwrap();

    bus.publish(Delivered("events")).unwrap();
    bus.publish(Submitted(7)).unwrap();

    assert_eq!(submitted.next_event().await.unwrap().0, 7);
    assert_eq!(delivered.next_event().await.unwrap().0, "events");
}

#[tokio::test]
async fn queue_has_a_single_consumer() {
    let bus = EventBus::with_capacity(4).unwrap();
    let mut rx = bus.subscribe_queue::<Submitted>().unwrap();

    bus.enqueue(Submitted(1)).unwrap();
    bus.enqueue(Submitted(2)).unwrap();

    assert_eq!(rx.next_event().await.unwrap().0, 1);
    assert_eq!(rx.next_event().await.unwrap().0, 2);
    assert!(matches!(bus.subscribe_queue::<Submitted>(), Err(EventBusError::ReceiverTaken { .. })));
}

#[tokio::test]
async fn full_queue_reports_backpressure() {
    let bus = EventBus::with_capacity(1).unwrap();
    let _rx = bus.subscribe_queue::<Submitted>().unwrap();

    bus.enqueue(Submitted(1)).unwrap();
    let err = bus.enqueue(Submitted(2)).unwrap_err();
    assert!(matches!(err, EventBusError::ChannelFull { .. }));
    assert_eq!(err.code(), "channel_full");
}

#[tokio::test]
async fn queue_without_consumer_is_closed() {
    let bus = EventBus::new();
    drop(bus.subscribe_queue::<Submitted>().unwrap());

    assert!(matches!(bus.enqueue(Submitted(1)), Err(EventBusError::ChannelClosed { .. })));
}

#[tokio::test]
async fn kinds_cannot_be_mixed() {
    let bus = EventBus::new();
    let _rx = bus.subscribe::<Submitted>().unwrap();

    assert!(matches!(bus.enqueue(Submitted(1)), Err(EventBusError::ChannelKindMismatch { .. })));
    assert!(matches!(bus.subscribe_queue::<Submitted>(), Err(EventBusError::ChannelKindMismatch { .. })));
}

#[test]
fn zero_capacity_is_rejected() {
    assert!(matches!(EventBus::with_capacity(0), Err(EventBusError::InvalidCapacity { .. })));
}

#[tokio::test]
async fn shutdown_closes_receivers() {
    let bus = EventBus::new();
    let mut rx = bus.subscribe::<Submitted>().unwrap();

    assert_eq!(bus.shutdown(), 1);

    let closed = tokio::time::timeout(Duration::from_secs(1), rx.next_event()).await.unwrap();
    assert!(closed.is_none());
}
