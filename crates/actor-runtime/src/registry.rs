//! # Per-Key Registry
//!
//! One `ActorRegistry<T>` exists per actor kind. It maps keys to running
//! `ResourceActor<T>` instances and spawns a new instance the first time a key is
//! resolved. The registry is itself an actor: resolution is serialized through its
//! mailbox, so two concurrent first requests for the same key still end up talking to
//! one instance.
//!
//! The registry never touches instance state. It only hands out clients.

use crate::actor::ResourceActor;
use crate::client::ResourceClient;
use crate::entity::{instance_name, ActorEntity};
use crate::error::FrameworkError;
use crate::message::RegistryRequest;
use std::collections::HashMap;
use std::fmt;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

struct ManagedActor<T: ActorEntity> {
    client: ResourceClient<T>,
    handle: JoinHandle<()>,
}

impl<T: ActorEntity> ManagedActor<T> {
    fn is_alive(&self) -> bool {
        !self.handle.is_finished() && !self.client.is_closed()
    }
}

/// The server half of a registry.
pub struct ActorRegistry<T: ActorEntity> {
    receiver: mpsc::Receiver<RegistryRequest<T>>,
    instances: HashMap<T::Id, ManagedActor<T>>,
    mailbox_size: usize,
}

impl<T: ActorEntity> ActorRegistry<T> {
    /// Creates a registry and its client.
    ///
    /// `mailbox_size` is used both for the registry's own mailbox and for every
    /// instance it spawns.
    pub fn new(mailbox_size: usize) -> (Self, RegistryClient<T>) {
        let (sender, receiver) = mpsc::channel(mailbox_size);
        let registry = Self {
            receiver,
            instances: HashMap::new(),
            mailbox_size,
        };
        (registry, RegistryClient { sender })
    }

    /// Runs the registry loop until every `RegistryClient` has been dropped.
    ///
    /// Each spawned instance receives its own clone of `context`. On shutdown the
    /// registry drops its handles; instances stop once the last outstanding client
    /// for them is gone.
    pub async fn run(mut self, context: T::Context) {
        info!(kind = T::KIND, "Registry started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                RegistryRequest::Resolve { key, respond_to } => {
                    let client = self.resolve(key, &context);
                    let _ = respond_to.send(Ok(client));
                }
                RegistryRequest::Lookup { key, respond_to } => {
                    let client = self
                        .instances
                        .get(&key)
                        .filter(|managed| managed.is_alive())
                        .map(|managed| managed.client.clone());
                    let _ = respond_to.send(Ok(client));
                }
                RegistryRequest::Retire { key, respond_to } => {
                    let existed = self.instances.remove(&key).is_some();
                    info!(instance = %instance_name::<T>(&key), existed, "Retired");
                    let _ = respond_to.send(Ok(existed));
                }
                RegistryRequest::Count { respond_to } => {
                    let _ = respond_to.send(Ok(self.instances.len()));
                }
            }
        }

        info!(kind = T::KIND, size = self.instances.len(), "Registry shutdown");
    }

    fn resolve(&mut self, key: T::Id, context: &T::Context) -> ResourceClient<T> {
        if let Some(managed) = self.instances.get(&key) {
            // The registry holds a sender, so a finished task can only mean the
            // instance died. Replace it with a fresh, empty one.
            if managed.is_alive() {
                debug!(instance = %instance_name::<T>(&key), "Resolved");
                return managed.client.clone();
            }
            warn!(instance = %instance_name::<T>(&key), "Instance stopped unexpectedly, restarting");
        }

        let (actor, client) = ResourceActor::<T>::new(key.clone(), self.mailbox_size);
        let handle = tokio::spawn(actor.run(context.clone()));
        info!(
            instance = %instance_name::<T>(&key),
            size = self.instances.len() + 1,
            "Spawned"
        );
        self.instances.insert(
            key,
            ManagedActor {
                client: client.clone(),
                handle,
            },
        );
        client
    }
}

/// Cloneable handle to an `ActorRegistry`.
pub struct RegistryClient<T: ActorEntity> {
    sender: mpsc::Sender<RegistryRequest<T>>,
}

impl<T: ActorEntity> Clone for RegistryClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: ActorEntity> fmt::Debug for RegistryClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryClient")
            .field("kind", &T::KIND)
            .finish()
    }
}

impl<T: ActorEntity> RegistryClient<T> {
    /// Returns the client for `key`, spawning the instance on first access.
    #[instrument(skip(self), fields(kind = T::KIND))]
    pub async fn resolve(&self, key: T::Id) -> Result<ResourceClient<T>, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(RegistryRequest::Resolve { key, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    /// Returns the client for `key` if an instance is running, without spawning one.
    #[instrument(skip(self), fields(kind = T::KIND))]
    pub async fn lookup(&self, key: T::Id) -> Result<Option<ResourceClient<T>>, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(RegistryRequest::Lookup { key, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    /// Drops the registry's handle to the instance for `key`.
    ///
    /// Returns `true` if an instance was registered. A later `resolve` for the same key
    /// starts a fresh instance with empty state.
    #[instrument(skip(self), fields(kind = T::KIND))]
    pub async fn retire(&self, key: T::Id) -> Result<bool, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(RegistryRequest::Retire { key, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    /// Number of registered instances.
    pub async fn instance_count(&self) -> Result<usize, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(RegistryRequest::Count { respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }
}
