//! # Per-Key Actor Server
//!
//! This module defines the `ResourceActor`, the server half of one actor instance. It owns
//! exactly one piece of state and processes messages sequentially, so the state never
//! needs a `Mutex` or `RwLock`.

use crate::client::ResourceClient;
use crate::entity::{instance_name, ActorEntity};
use crate::message::ResourceRequest;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info, info_span};

/// The actor that owns the state for one key.
///
/// # Architecture Note
/// This struct owns the `state` and the receiver end of the channel.
///
/// **Concurrency Model**:
/// Thousands of `ResourceActor` instances may run at once (one per event and kind), but
/// each one drains its own mailbox *one message at a time*. Every invariant the state
/// keeps ("at most one owner", "active < limit") is therefore scoped to a single
/// instance and needs no cross-instance synchronization.
///
/// # Usage Pattern
///
/// 1.  **Create**: `ResourceActor::new(key, buffer)` returns the actor and its client.
/// 2.  **Run**: spawn `actor.run(context)` on the runtime.
/// 3.  **Use**: call `client.perform_action(..)` from any task.
///
/// ```rust
/// use actor_runtime::{ActorEntity, ResourceActor};
/// use tokio::time::Instant;
///
/// #[derive(Debug, Default)]
/// struct Counter { hits: u64 }
///
/// impl ActorEntity for Counter {
///     const KIND: &'static str = "counter";
///     type Id = String;
///     type Action = ();
///     type ActionResult = u64;
///     type Context = ();
///
///     fn from_key(_: &String) -> Self { Self::default() }
///     fn handle_action(&mut self, _: (), _: Instant, _: &()) -> u64 {
///         self.hits += 1;
///         self.hits
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ResourceActor::<Counter>::new("page".to_string(), 8);
///     tokio::spawn(actor.run(()));
///     assert_eq!(client.perform_action(()).await.unwrap(), 1);
/// }
/// ```
///
/// # Operation
///
/// For every incoming action:
/// 1. Reads the clock once (`now`).
/// 2. Calls [`ActorEntity::on_touch`] so stale state is swept before any decision.
/// 3. Calls [`ActorEntity::handle_action`] with the same `now`.
/// 4. Sends the result back. A caller that went away is not an error.
pub struct ResourceActor<T: ActorEntity> {
    key: T::Id,
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    state: T,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` for `key` and its associated `ResourceClient`.
    ///
    /// # Arguments
    ///
    /// * `key` - The key this instance is responsible for.
    /// * `buffer_size` - The capacity of the MPSC channel. If the mailbox is full,
    ///   calls to the client wait until there is space.
    pub fn new(key: T::Id, buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            state: T::from_key(&key),
            key,
            receiver,
        };
        (actor, ResourceClient::new(sender))
    }

    /// Runs the actor's event loop until every client has been dropped.
    ///
    /// # Context Injection
    /// `context` is handed to every hook. It is bound here, after construction, so the
    /// registry can build an instance first and decide what to run it with afterwards.
    pub async fn run(mut self, context: T::Context) {
        let instance = instance_name::<T>(&self.key);
        let span = info_span!("actor", %instance);
        info!(parent: &span, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Action { action, respond_to } => {
                    // Hooks never await, so holding the entered span is fine.
                    let _entered = span.enter();
                    let now = Instant::now();
                    self.state.on_touch(now, &context);
                    debug!(?action, "Action");
                    let result = self.state.handle_action(action, now, &context);
                    debug!(?result, "Action ok");
                    if respond_to.send(Ok(result)).is_err() {
                        debug!("Caller went away before the reply");
                    }
                }
            }
        }

        info!(parent: &span, "Shutdown");
    }
}
