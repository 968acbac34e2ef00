//! Walks one event through the viewer and broadcaster flows against an in-memory store.

use live_gate::config::Config;
use live_gate::gateway::InMemoryEventStore;
use live_gate::lifecycle::{setup_tracing, EventSystem};
use std::sync::Arc;
use tracing::{info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    setup_tracing(&config.log_filter);

    info!("Starting live gate demo");

    let store = Arc::new(InMemoryEventStore::new());
    // Small enough to show a full event.
    let record = store.create("Demo stream", Some(2), &config).await;
    let event_id = record.id.clone();
    let watch_key = record.secret_key.as_str();
    let broadcast_key = record.broadcast_key.as_str();
    store.mark_paid(&event_id).await;

    let system = EventSystem::new(&config, store.clone());
    let gateway = system.gateway.clone();

    let span = tracing::info_span!("broadcaster");
    async {
        let first = gateway.claim_broadcast(&event_id, broadcast_key).await?;
        info!(lease_id = %first.lease_id, "Broadcasting");

        let second = gateway.claim_broadcast(&event_id, broadcast_key).await?;
        info!(lease_id = %second.lease_id, "Second tab took over");

        let stale = gateway
            .broadcast_heartbeat(&event_id, broadcast_key, &first.lease_id)
            .await?;
        info!(still_owner = stale.still_owner, "First tab heartbeat");

        let status = gateway.broadcast_status(&event_id, broadcast_key).await?;
        info!(has_owner = status.has_owner, "Lock status");
        Ok::<_, Box<dyn std::error::Error>>(())
    }
    .instrument(span)
    .await?;

    let span = tracing::info_span!("viewers");
    async {
        let details = gateway.event_info(&event_id, watch_key).await?;
        info!(title = %details.title, expired = details.expired, "Event info");

        let mut sessions = Vec::new();
        for _ in 0..3 {
            let seat = gateway.view_session(&event_id, watch_key).await?;
            match seat.session_id {
                Some(session_id) => {
                    info!(%session_id, active = seat.active, "Viewer admitted");
                    sessions.push(session_id);
                }
                None => warn!(active = seat.active, limit = seat.limit, "Event full"),
            }
        }

        if let Some(session_id) = sessions.first() {
            gateway.leave(&event_id, watch_key, session_id).await?;
        }
        let stats = gateway.stats(&event_id, watch_key).await?;
        info!(active = stats.active, limit = stats.limit, "Occupancy");

        if let Err(e) = gateway.view_session(&event_id, "wrong-key").await {
            warn!(error = %e, "Rejected viewer");
        }
        Ok::<_, Box<dyn std::error::Error>>(())
    }
    .instrument(span)
    .await?;

    gateway.retire_event(&event_id).await?;
    drop(gateway);
    system.shutdown().await?;

    info!("Demo completed");
    Ok(())
}
