use actor_runtime::{instance_name, ActorEntity, ActorRegistry, ResourceActor};
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::Instant;

// --- Test Entity ---

/// Remembers keys for a configurable time, forgetting them lazily.
#[derive(Debug)]
struct Memo {
    entries: HashMap<String, Instant>,
}

#[derive(Clone)]
struct MemoPolicy {
    ttl: Duration,
}

#[derive(Debug)]
enum MemoAction {
    Put(String),
    Len,
}

impl ActorEntity for Memo {
    const KIND: &'static str = "memo";
    type Id = String;
    type Action = MemoAction;
    type ActionResult = usize;
    type Context = MemoPolicy;

    fn from_key(_key: &String) -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    fn on_touch(&mut self, now: Instant, ctx: &MemoPolicy) {
        self.entries
            .retain(|_, seen| now.saturating_duration_since(*seen) <= ctx.ttl);
    }

    fn handle_action(&mut self, action: MemoAction, now: Instant, _ctx: &MemoPolicy) -> usize {
        match action {
            MemoAction::Put(entry) => {
                self.entries.insert(entry, now);
                self.entries.len()
            }
            MemoAction::Len => self.entries.len(),
        }
    }
}

// --- Tests ---

#[test]
fn test_instance_name() {
    assert_eq!(instance_name::<Memo>(&"evt_7".to_string()), "memo:evt_7");
}

#[tokio::test(start_paused = true)]
async fn test_touch_hook_runs_before_every_action() {
    let (actor, client) = ResourceActor::<Memo>::new("evt_1".to_string(), 10);
    tokio::spawn(actor.run(MemoPolicy {
        ttl: Duration::from_secs(5),
    }));

    assert_eq!(client.perform_action(MemoAction::Put("a".into())).await.unwrap(), 1);
    tokio::time::advance(Duration::from_secs(3)).await;
    assert_eq!(client.perform_action(MemoAction::Put("b".into())).await.unwrap(), 2);

    // "a" is now 6s old, "b" 3s old.
    tokio::time::advance(Duration::from_secs(3)).await;
    assert_eq!(client.perform_action(MemoAction::Len).await.unwrap(), 1);

    tokio::time::advance(Duration::from_secs(10)).await;
    assert_eq!(client.perform_action(MemoAction::Len).await.unwrap(), 0);
}

#[tokio::test]
async fn test_concurrent_callers_are_serialized() {
    let (registry, registry_client) = ActorRegistry::<Memo>::new(16);
    tokio::spawn(registry.run(MemoPolicy {
        ttl: Duration::from_secs(60),
    }));

    let mut handles = vec![];
    for i in 0..50 {
        let registry_client = registry_client.clone();
        handles.push(tokio::spawn(async move {
            let client = registry_client.resolve("evt_1".to_string()).await.unwrap();
            client
                .perform_action(MemoAction::Put(format!("entry_{i}")))
                .await
                .unwrap()
        }));
    }

    let mut sizes = vec![];
    for handle in handles {
        sizes.push(handle.await.unwrap());
    }
    sizes.sort_unstable();

    // Every insert observed a distinct size: no two ran against the same snapshot.
    assert_eq!(sizes, (1..=50).collect::<Vec<_>>());
    assert_eq!(registry_client.instance_count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_actor_stops_when_clients_dropped() {
    let (actor, client) = ResourceActor::<Memo>::new("evt_1".to_string(), 10);
    let handle = tokio::spawn(actor.run(MemoPolicy {
        ttl: Duration::from_secs(1),
    }));

    let extra = client.clone();
    drop(client);
    assert_eq!(extra.perform_action(MemoAction::Len).await.unwrap(), 0);
    drop(extra);

    handle.await.unwrap();
}
