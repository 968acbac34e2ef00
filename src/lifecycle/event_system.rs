use crate::clients::{LockDirectory, SeatDirectory};
use crate::config::Config;
use crate::gateway::{EventStore, Gateway};
use crate::model::{LockPolicy, SeatPolicy};
use crate::{lock_actor, seat_actor};
use std::sync::Arc;
use tracing::{error, info};

/// The runtime that owns both per-event registries and the gateway in front of them.
///
/// `EventSystem` is responsible for:
/// - **Lifecycle Management**: starting the seat and lock registries, and stopping them
/// - **Policy Wiring**: handing each registry the timeouts from [`Config`]
/// - **Entry Point**: exposing the [`Gateway`] callers go through
///
/// # Example
///
/// ```ignore
/// let store = Arc::new(InMemoryEventStore::new());
/// let system = EventSystem::new(&Config::default(), store);
///
/// let seat = system.gateway.view_session(&event_id, &secret_key).await?;
///
/// system.shutdown().await?;
/// ```
pub struct EventSystem {
    /// Authorizing front door, one per system.
    pub gateway: Gateway,

    /// Direct access to the seat pools, bypassing authorization.
    pub seats: SeatDirectory,

    /// Direct access to the broadcast locks, bypassing authorization.
    pub locks: LockDirectory,

    /// Registry task handles (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl EventSystem {
    /// Spawns both registries and wires the gateway. Must be called inside a runtime.
    ///
    /// Actor instances are not started here; each one is spawned by its registry the
    /// first time an event is touched.
    pub fn new(config: &Config, store: Arc<dyn EventStore>) -> Self {
        let (seat_registry, seat_client) = seat_actor::registry(config.actor_mailbox_size);
        let (lock_registry, lock_client) = lock_actor::registry(config.actor_mailbox_size);

        let seat_handle = tokio::spawn(seat_registry.run(SeatPolicy::from(config)));
        let lock_handle = tokio::spawn(lock_registry.run(LockPolicy::from(config)));

        let seats = SeatDirectory::new(seat_client);
        let locks = LockDirectory::new(lock_client);
        let gateway = Gateway::new(store, seats.clone(), locks.clone());

        info!(
            seat_timeout_secs = config.seat_heartbeat_timeout.as_secs(),
            lock_ttl_secs = config.broadcast_lock_ttl.as_secs(),
            "Event system started"
        );

        Self {
            gateway,
            seats,
            locks,
            handles: vec![seat_handle, lock_handle],
        }
    }

    /// Gracefully shuts down both registries.
    ///
    /// Dropping the directories (and the gateway holding copies of them) closes the
    /// registry mailboxes. Each registry then drops its instances, and each instance
    /// exits once its last outstanding client is gone. Any other clone of the
    /// gateway or a directory keeps its registry alive, so drop those first.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if both registries shut down cleanly
    /// - `Err(String)` if a registry task panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down event system...");

        drop(self.gateway);
        drop(self.seats);
        drop(self.locks);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Registry task failed: {:?}", e);
                return Err(format!("Registry task failed: {:?}", e));
            }
        }

        info!("Event system shutdown complete.");
        Ok(())
    }
}
