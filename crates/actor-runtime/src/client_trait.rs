//! # ActorClient Trait
//!
//! Common interface for domain clients built on top of a generic `ResourceClient`.
use crate::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Trait for domain-specific clients (e.g. a seat client) wrapping a `ResourceClient`.
///
/// Implementors only say how to reach the inner client and how to translate runtime
/// failures into their own error type; [`ActorClient::dispatch`] is provided.
///
/// # Example
///
/// ```rust
/// use actor_runtime::{ActorClient, ActorEntity, FrameworkError, ResourceClient};
/// use async_trait::async_trait;
/// use tokio::time::Instant;
///
/// #[derive(Debug)] struct Gauge { level: i64 }
///
/// impl ActorEntity for Gauge {
///     const KIND: &'static str = "gauge";
///     type Id = u32; type Action = i64; type ActionResult = i64; type Context = ();
///     fn from_key(_: &u32) -> Self { Self { level: 0 } }
///     fn handle_action(&mut self, delta: i64, _: Instant, _: &()) -> i64 {
///         self.level += delta;
///         self.level
///     }
/// }
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("gauge unavailable: {0}")]
/// struct GaugeError(String);
///
/// struct GaugeClient { inner: ResourceClient<Gauge> }
///
/// #[async_trait]
/// impl ActorClient<Gauge> for GaugeClient {
///     type Error = GaugeError;
///     fn inner(&self) -> &ResourceClient<Gauge> { &self.inner }
///     fn map_error(e: FrameworkError) -> GaugeError { GaugeError(e.to_string()) }
/// }
///
/// async fn bump(client: &GaugeClient) -> Result<i64, GaugeError> {
///     client.dispatch(1).await
/// }
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The domain-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map runtime errors to the domain error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Send one action and wait for its result.
    #[tracing::instrument(skip(self), fields(kind = T::KIND))]
    async fn dispatch(&self, action: T::Action) -> Result<T::ActionResult, Self::Error> {
        tracing::debug!("Sending request");
        self.inner()
            .perform_action(action)
            .await
            .map_err(Self::map_error)
    }
}
