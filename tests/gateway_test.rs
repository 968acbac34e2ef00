use chrono::{Duration, Utc};
use live_gate::config::Config;
use live_gate::gateway::{GatewayError, InMemoryEventStore};
use live_gate::lifecycle::EventSystem;
use live_gate::model::{EventId, EventRecord, EventStatus, FailureReason};
use std::sync::Arc;

const WATCH: &str = "watch-key";
const BROADCAST: &str = "broadcast-key";

async fn paid_event(store: &InMemoryEventStore, id: &str, limit: u32) -> EventId {
    let event_id = EventId::from(id);
    store
        .insert(EventRecord::new(id, "Test event", limit, WATCH, BROADCAST))
        .await;
    store.mark_paid(&event_id).await;
    event_id
}

fn start(store: &Arc<InMemoryEventStore>) -> EventSystem {
    EventSystem::new(&Config::default(), store.clone())
}

#[tokio::test]
async fn test_unknown_event_is_not_found() {
    let store = Arc::new(InMemoryEventStore::new());
    let system = start(&store);
    let missing = EventId::from("nope");

    assert_eq!(
        system.gateway.view_session(&missing, WATCH).await,
        Err(GatewayError::NotFound(missing.clone()))
    );
    assert_eq!(
        system.gateway.broadcast_status(&missing, BROADCAST).await,
        Err(GatewayError::NotFound(missing))
    );
}

#[tokio::test]
async fn test_keys_are_not_interchangeable() {
    let store = Arc::new(InMemoryEventStore::new());
    let event = paid_event(&store, "evt_keys", 5).await;
    let system = start(&store);
    let gateway = &system.gateway;

    assert_eq!(
        gateway.view_session(&event, BROADCAST).await,
        Err(GatewayError::Unauthorized)
    );
    assert_eq!(
        gateway.view_session(&event, "").await,
        Err(GatewayError::Unauthorized)
    );
    assert_eq!(
        gateway.claim_broadcast(&event, WATCH).await,
        Err(GatewayError::Unauthorized)
    );
    assert_eq!(
        gateway.stats(&event, "guess").await,
        Err(GatewayError::Unauthorized)
    );
    assert_eq!(
        gateway.release_broadcast(&event, WATCH, "lease").await,
        Err(GatewayError::Unauthorized)
    );
    // Prefixes and extensions of the real key don't match either.
    assert_eq!(
        gateway.stats(&event, &WATCH[..4]).await,
        Err(GatewayError::Unauthorized)
    );
    assert_eq!(
        gateway.event_info(&event, &format!("{WATCH}x")).await,
        Err(GatewayError::Unauthorized)
    );

    // Rejected calls never reach the actors.
    assert_eq!(system.seats.instance_count().await.unwrap(), 0);
    assert_eq!(system.locks.instance_count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_unpaid_event_refuses_admission_and_claim() {
    let store = Arc::new(InMemoryEventStore::new());
    let event = EventId::from("evt_unpaid");
    store
        .insert(EventRecord::new("evt_unpaid", "Unpaid", 5, WATCH, BROADCAST))
        .await;
    let system = start(&store);

    assert_eq!(
        system.gateway.view_session(&event, WATCH).await,
        Err(GatewayError::NotPaid(event.clone()))
    );
    assert_eq!(
        system.gateway.claim_broadcast(&event, BROADCAST).await,
        Err(GatewayError::NotPaid(event.clone()))
    );
    // Read-only calls don't care about payment.
    assert_eq!(system.gateway.stats(&event, WATCH).await.unwrap().active, 0);
}

#[tokio::test]
async fn test_expired_event_refuses_admission() {
    let store = Arc::new(InMemoryEventStore::new());
    let event = paid_event(&store, "evt_old", 5).await;
    store
        .set_expires_at(&event, Utc::now() - Duration::minutes(5))
        .await;
    let system = start(&store);

    assert_eq!(
        system.gateway.view_session(&event, WATCH).await,
        Err(GatewayError::Expired(event.clone()))
    );
    assert_eq!(
        system.gateway.claim_broadcast(&event, BROADCAST).await,
        Err(GatewayError::Expired(event))
    );
}

#[tokio::test]
async fn test_viewer_limit_comes_from_record() {
    let store = Arc::new(InMemoryEventStore::new());
    let event = paid_event(&store, "evt_small", 3).await;
    let system = start(&store);

    for expected in 1..=3 {
        let seat = system.gateway.view_session(&event, WATCH).await.unwrap();
        assert!(seat.granted);
        assert_eq!(seat.active, expected);
        assert_eq!(seat.limit, 3);
    }
    let full = system.gateway.view_session(&event, WATCH).await.unwrap();
    assert!(!full.granted);
    assert_eq!(full.limit, 3);
}

#[tokio::test]
async fn test_sweep_expires_and_retires() {
    let store = Arc::new(InMemoryEventStore::new());
    let event = paid_event(&store, "evt_ending", 5).await;
    let system = start(&store);

    system.gateway.view_session(&event, WATCH).await.unwrap();
    system.gateway.claim_broadcast(&event, BROADCAST).await.unwrap();
    assert_eq!(system.seats.instance_count().await.unwrap(), 1);

    let now = Utc::now();
    store.set_expires_at(&event, now - Duration::seconds(1)).await;

    let swept = system.gateway.sweep_expired(now).await.unwrap();
    assert_eq!(swept, vec![event.clone()]);
    assert_eq!(system.seats.instance_count().await.unwrap(), 0);
    assert_eq!(system.locks.instance_count().await.unwrap(), 0);

    assert_eq!(
        system.gateway.view_session(&event, WATCH).await,
        Err(GatewayError::Expired(event))
    );
}

#[tokio::test]
async fn test_event_info_for_key_holders() {
    let store = Arc::new(InMemoryEventStore::new());
    let event = paid_event(&store, "evt_info", 5).await;
    let system = start(&store);

    let info = system.gateway.event_info(&event, WATCH).await.unwrap();
    assert_eq!(info.id, event);
    assert_eq!(info.title, "Test event");
    assert_eq!(info.status, EventStatus::Paid);
    assert!(!info.expired);

    assert_eq!(
        system.gateway.event_info(&event, BROADCAST).await,
        Err(GatewayError::Unauthorized)
    );

    store
        .set_expires_at(&event, Utc::now() - Duration::seconds(1))
        .await;
    assert!(system.gateway.event_info(&event, WATCH).await.unwrap().expired);
    // Reading info never starts an actor.
    assert_eq!(system.seats.instance_count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_swept_event_stays_retired() {
    let store = Arc::new(InMemoryEventStore::new());
    let event = paid_event(&store, "evt_done", 5).await;
    let system = start(&store);
    let gateway = &system.gateway;

    let seat = gateway.view_session(&event, WATCH).await.unwrap();
    let lease = gateway.claim_broadcast(&event, BROADCAST).await.unwrap();

    let now = Utc::now();
    store.set_expires_at(&event, now - Duration::seconds(1)).await;
    gateway.sweep_expired(now).await.unwrap();

    // Every call still allowed on an expired event answers without spawning.
    let stats = gateway.stats(&event, WATCH).await.unwrap();
    assert_eq!(stats.active, 0);
    assert_eq!(stats.limit, 5);

    let session_id = seat.session_id.unwrap();
    let beat = gateway
        .viewer_heartbeat(&event, WATCH, &session_id)
        .await
        .unwrap();
    assert!(!beat.ok);
    assert_eq!(beat.reason, Some(FailureReason::InvalidSession));
    assert!(gateway.leave(&event, WATCH, &session_id).await.unwrap().ok);

    let status = gateway.broadcast_status(&event, BROADCAST).await.unwrap();
    assert!(!status.has_owner);
    assert!(status.stale);
    let lease_beat = gateway
        .broadcast_heartbeat(&event, BROADCAST, &lease.lease_id)
        .await
        .unwrap();
    assert!(!lease_beat.ok);
    assert_eq!(lease_beat.reason, Some(FailureReason::StaleLock));
    let empty_beat = gateway
        .broadcast_heartbeat(&event, BROADCAST, "")
        .await
        .unwrap();
    assert_eq!(empty_beat.reason, Some(FailureReason::MissingSession));
    assert!(
        gateway
            .release_broadcast(&event, BROADCAST, &lease.lease_id)
            .await
            .unwrap()
            .ok
    );

    assert_eq!(system.seats.instance_count().await.unwrap(), 0);
    assert_eq!(system.locks.instance_count().await.unwrap(), 0);
    assert_eq!(gateway.sweep_expired(Utc::now()).await, Ok(vec![]));
}

#[tokio::test]
async fn test_expired_event_still_reaches_running_actors() {
    let store = Arc::new(InMemoryEventStore::new());
    let event = paid_event(&store, "evt_overtime", 5).await;
    let system = start(&store);
    let gateway = &system.gateway;

    let seat = gateway.view_session(&event, WATCH).await.unwrap();
    let lease = gateway.claim_broadcast(&event, BROADCAST).await.unwrap();

    // Expired but not yet swept: the running actors keep answering.
    store
        .set_expires_at(&event, Utc::now() - Duration::seconds(1))
        .await;

    assert_eq!(gateway.stats(&event, WATCH).await.unwrap().active, 1);
    let beat = gateway
        .viewer_heartbeat(&event, WATCH, &seat.session_id.unwrap())
        .await
        .unwrap();
    assert!(beat.ok);
    let lease_beat = gateway
        .broadcast_heartbeat(&event, BROADCAST, &lease.lease_id)
        .await
        .unwrap();
    assert!(lease_beat.still_owner);
}
