//! # Generic Client
//!
//! This module defines the generic client for communicating with one actor instance.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::fmt;
use tokio::sync::{mpsc, oneshot};

/// ## ResourceClient
///
/// The `ResourceClient<T>` is the type-safe, async handle to a single `ResourceActor<T>`.
/// It forwards actions over a Tokio mpsc channel and waits for the reply on a oneshot
/// channel. The client is cheap to clone and can be shared across tasks.
///
/// * **Cloneable** – holds only a sender.
/// * **Ordered** – actions sent through any clone of the same client are applied in
///   arrival order by the actor.
pub struct ResourceClient<T: ActorEntity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

// Manual impl: `T` itself does not need to be `Clone`.
impl<T: ActorEntity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: ActorEntity> fmt::Debug for ResourceClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceClient")
            .field("kind", &T::KIND)
            .field("closed", &self.sender.is_closed())
            .finish()
    }
}

impl<T: ActorEntity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    pub async fn perform_action(&self, action: T::Action) -> Result<T::ActionResult, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Action { action, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    /// Returns `true` if both clients talk to the same actor instance.
    pub fn same_actor(&self, other: &Self) -> bool {
        self.sender.same_channel(&other.sender)
    }

    /// Returns `true` once the actor has stopped receiving.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}
