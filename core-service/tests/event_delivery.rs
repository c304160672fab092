//! End-to-end event delivery through the public service API.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use bridge_memory::MemoryBridge;
use bridge_traits::Platform;
use core_runtime::config::CoreConfig;
use core_service::{EventKind, Notification, PushService};

fn service_with_bridge() -> (Arc<MemoryBridge>, PushService) {
    let bridge = Arc::new(MemoryBridge::new());
    let config = CoreConfig::builder()
        .platform(Platform::Android)
        .registrar(bridge.clone())
        .identity(bridge.clone())
        .audience(bridge.clone())
        .notifications(bridge.clone())
        .analytics(bridge.clone())
        .tokens(bridge.clone())
        .broadcasts(bridge.clone())
        .build()
        .expect("config");
    let service = PushService::new(config).expect("service");
    (bridge, service)
}

#[derive(Default)]
struct Collected {
    items: Mutex<Vec<Notification>>,
}

impl Collected {
    fn push(&self, notification: Notification) {
        self.items.lock().unwrap().push(notification);
    }

    fn all(&self) -> Vec<Notification> {
        self.items.lock().unwrap().clone()
    }
}

async fn settle() {
    tokio::time::sleep(Duration::from_millis(50)).await;
}

#[tokio::test]
async fn broadcast_before_listener_is_delivered_once_on_registration() {
    let (bridge, service) = service_with_bridge();

    let payload = Notification::new().with_content("A");
    bridge.emit(EventKind::Clicked.channel(), payload.clone());
    settle().await;

    // Nothing delivered yet; the payload waits in the cache.
    assert_eq!(service.relay().pending(EventKind::Clicked), Some(payload.clone()));

    let collected = Arc::new(Collected::default());
    let sink = Arc::clone(&collected);
    service.add_event_listener(EventKind::Clicked, move |n| sink.push(n));

    assert_eq!(collected.all(), vec![payload]);
    assert_eq!(service.relay().pending(EventKind::Clicked), None);

    settle().await;
    assert_eq!(collected.all().len(), 1);
}

#[tokio::test]
async fn only_the_last_missed_broadcast_survives() {
    let (bridge, service) = service_with_bridge();

    bridge.emit(
        EventKind::Received.channel(),
        Notification::new().with_content("first"),
    );
    bridge.emit(
        EventKind::Received.channel(),
        Notification::new().with_content("second"),
    );
    settle().await;

    let collected = Arc::new(Collected::default());
    let sink = Arc::clone(&collected);
    service.add_event_listener(EventKind::Received, move |n| sink.push(n));

    let delivered = collected.all();
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].content.as_deref(), Some("second"));
}

#[tokio::test]
async fn active_listener_receives_broadcasts_directly() {
    let (bridge, service) = service_with_bridge();

    let collected = Arc::new(Collected::default());
    let sink = Arc::clone(&collected);
    service.add_event_listener(EventKind::ButtonClicked, move |n| sink.push(n));

    bridge.emit(
        EventKind::ButtonClicked.channel(),
        Notification::new().with_title("action"),
    );
    settle().await;

    let delivered = collected.all();
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].title.as_deref(), Some("action"));
    assert_eq!(service.relay().pending(EventKind::ButtonClicked), None);
}

#[tokio::test]
async fn removed_listener_falls_back_to_caching() {
    let (bridge, service) = service_with_bridge();

    let collected = Arc::new(Collected::default());
    let sink = Arc::clone(&collected);
    service.add_event_listener(EventKind::Dismissed, move |n| sink.push(n));
    service.remove_event_listener(EventKind::Dismissed);

    let payload = Notification::new().with_content("kept");
    bridge.emit(EventKind::Dismissed.channel(), payload.clone());
    settle().await;

    assert!(collected.all().is_empty());
    assert_eq!(service.relay().pending(EventKind::Dismissed), Some(payload));
}

#[tokio::test]
async fn clear_listeners_stops_delivery_and_drops_state() {
    let (bridge, service) = service_with_bridge();

    let collected = Arc::new(Collected::default());
    let sink = Arc::clone(&collected);
    service.add_event_listener(EventKind::Clicked, move |n| sink.push(n));

    service.clear_listeners();

    bridge.emit(EventKind::Clicked.channel(), Notification::new());
    settle().await;

    assert!(collected.all().is_empty());
    assert_eq!(service.relay().pending(EventKind::Clicked), None);
    assert!(!service.relay().is_bound(EventKind::Clicked));
}

#[tokio::test]
async fn each_kind_keeps_its_own_listener_and_cache() {
    let (bridge, service) = service_with_bridge();

    let clicked = Arc::new(Collected::default());
    let sink = Arc::clone(&clicked);
    service.add_event_listener(EventKind::Clicked, move |n| sink.push(n));

    bridge.emit(
        EventKind::Clicked.channel(),
        Notification::new().with_content("clicked"),
    );
    bridge.emit(
        EventKind::CustomContentReceived.channel(),
        Notification::new().with_extra("json", serde_json::json!({"k": 1})),
    );
    settle().await;

    assert_eq!(clicked.all().len(), 1);
    let cached = service
        .relay()
        .pending(EventKind::CustomContentReceived)
        .expect("custom content cached");
    assert_eq!(cached.extra["json"]["k"], 1);
}
