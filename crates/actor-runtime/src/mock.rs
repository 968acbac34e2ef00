//! # Mock Framework
//!
//! Utilities for testing domain clients in isolation, without spawning a real actor.
//!
//! | Feature | MockClient | Real Actor |
//! |---------|------------|------------|
//! | **Speed** | Instant (in-memory) | Fast (but involves tokio spawn) |
//! | **State** | No real state (expectations) | Real state management |
//! | **Use Case** | Testing logic *around* the client | Testing the actor itself |
//! | **Error Injection** | Easy (`return_err`) | Hard |
//!
//! Two styles are supported:
//!
//! - [`create_mock_client`] + [`expect_action`]: the test receives each request and
//!   answers it by hand, so it can assert on the action payload.
//! - [`MockClient`]: queue canned replies up front and call [`MockClient::verify`] at the end.

use crate::{ActorEntity, FrameworkError, ResourceClient, ResourceRequest};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

/// A mock client with a queue of canned action replies.
///
/// # Example
/// ```ignore
/// let mock = MockClient::<SeatPool>::new();
/// mock.expect_action().return_ok(SeatActionResult::Stats(stats));
///
/// let client = SeatClient::new(mock.client());
/// // Use client in tests...
/// mock.verify(); // Ensures all expectations were met
/// ```
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Arc<Mutex<VecDeque<Result<T::ActionResult, FrameworkError>>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations. Must be called inside a runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Arc<Mutex<VecDeque<Result<T::ActionResult, FrameworkError>>>> =
            Arc::new(Mutex::new(VecDeque::new()));
        let expectations_clone = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let next = expectations_clone.lock().unwrap().pop_front();
                match (request, next) {
                    (ResourceRequest::Action { action: _, respond_to }, Some(response)) => {
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Action { action, .. }, None) => {
                        panic!("Unexpected action: {action:?}");
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    /// Expects one more action.
    pub fn expect_action(&self) -> ActionExpectationBuilder<T> {
        ActionExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for action expectations.
pub struct ActionExpectationBuilder<T: ActorEntity> {
    expectations: Arc<Mutex<VecDeque<Result<T::ActionResult, FrameworkError>>>>,
}

impl<T: ActorEntity> ActionExpectationBuilder<T> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, result: T::ActionResult) {
        self.expectations.lock().unwrap().push_back(Ok(result));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        self.expectations.lock().unwrap().push_back(Err(error));
    }
}

/// Creates a client and the receiver its requests arrive on.
///
/// # Testing Strategy
/// When testing a *client* wrapper we don't need the real actor. The receiver lets the
/// test inspect each request and decide the reply, so success, failure and odd replies
/// are all deterministic.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to take the next Action request off the receiver.
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Action,
    oneshot::Sender<Result<T::ActionResult, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action { action, respond_to }) => Some((action, respond_to)),
        None => None,
    }
}
