use futures::{stream, Stream};
use tokio::sync::watch;

use super::PLACEHOLDER_SNAPSHOT;

/// Serialized session state published after an accepted move
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// 0 for the placeholder, incremented on every publish
    pub version: u64,
    /// Textual payload (JSON board state, or the placeholder text)
    pub data: String,
}

impl Snapshot {
    /// Snapshot seen by subscribers before the first move
    pub fn placeholder() -> Self {
        Self {
            version: 0,
            data: PLACEHOLDER_SNAPSHOT.to_string(),
        }
    }
}

/// Latest-value channel carrying a session's snapshots
///
/// Publishing never waits on subscribers; a subscriber that falls behind
/// only ever sees the newest snapshot.
#[derive(Debug)]
pub struct LiveState {
    tx: watch::Sender<Snapshot>,
}

impl LiveState {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(Snapshot::placeholder());
        Self { tx }
    }

    /// Publish a new payload, returning its version
    pub fn publish(&self, data: String) -> u64 {
        // send_modify stores the value even when nobody is subscribed
        self.tx.send_modify(|snapshot| {
            snapshot.version += 1;
            snapshot.data = data;
        });
        self.tx.borrow().version
    }

    /// Most recently published snapshot
    pub fn latest(&self) -> Snapshot {
        self.tx.borrow().clone()
    }

    /// Attach a new subscriber
    pub fn subscribe(&self) -> LiveUpdates {
        LiveUpdates {
            rx: self.tx.subscribe(),
            primed: false,
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for LiveState {
    fn default() -> Self {
        Self::new()
    }
}

/// One subscriber's view of a session's snapshots
///
/// Yields the current snapshot first, then every newer one. Dropping the
/// handle releases the subscription.
#[derive(Debug)]
pub struct LiveUpdates {
    rx: watch::Receiver<Snapshot>,
    primed: bool,
}

impl LiveUpdates {
    /// Wait for the next snapshot
    ///
    /// # Returns
    ///
    /// None once the session has been dropped
    pub async fn next(&mut self) -> Option<Snapshot> {
        if self.primed {
            self.rx.changed().await.ok()?;
        }
        self.primed = true;
        Some(self.rx.borrow_and_update().clone())
    }

    /// Convert into an endless stream of snapshots
    pub fn into_stream(self) -> impl Stream<Item = Snapshot> + Send + 'static {
        stream::unfold(self, |mut updates| async move {
            let snapshot = updates.next().await?;
            Some((snapshot, updates))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use std::time::Duration;

    #[tokio::test]
    async fn test_new_subscriber_sees_placeholder() {
        let live = LiveState::new();
        let mut updates = live.subscribe();

        let first = updates.next().await.unwrap();
        assert_eq!(first, Snapshot::placeholder());
        assert_eq!(first.data, "game has not started");
    }

    #[tokio::test]
    async fn test_late_subscriber_starts_from_latest() {
        let live = LiveState::new();
        live.publish("one".to_string());
        live.publish("two".to_string());

        let mut updates = live.subscribe();
        let first = updates.next().await.unwrap();

        assert_eq!(first.version, 2);
        assert_eq!(first.data, "two");
    }

    #[tokio::test]
    async fn test_updates_arrive_in_order() {
        let live = LiveState::new();
        let mut updates = live.subscribe();
        updates.next().await.unwrap();

        live.publish("a".to_string());
        assert_eq!(updates.next().await.unwrap().data, "a");

        live.publish("b".to_string());
        assert_eq!(updates.next().await.unwrap().data, "b");
    }

    #[tokio::test]
    async fn test_slow_subscriber_gets_newest() {
        let live = LiveState::new();
        let mut updates = live.subscribe();
        updates.next().await.unwrap();

        live.publish("a".to_string());
        live.publish("b".to_string());
        live.publish("c".to_string());

        let snapshot = updates.next().await.unwrap();
        assert_eq!(snapshot.version, 3);
        assert_eq!(snapshot.data, "c");
    }

    #[tokio::test]
    async fn test_publish_without_subscribers() {
        let live = LiveState::new();
        assert_eq!(live.publish("x".to_string()), 1);
        assert_eq!(live.latest().data, "x");
    }

    #[tokio::test]
    async fn test_independent_subscribers() {
        let live = LiveState::new();
        let mut a = live.subscribe();
        let b = live.subscribe();
        assert_eq!(live.subscriber_count(), 2);

        drop(b);
        assert_eq!(live.subscriber_count(), 1);

        live.publish("after drop".to_string());
        assert_eq!(a.next().await.unwrap().data, "after drop");
    }

    #[tokio::test]
    async fn test_stream_waits_for_next_publish() {
        let live = LiveState::new();
        let mut stream = Box::pin(live.subscribe().into_stream());

        assert_eq!(stream.next().await.unwrap().version, 0);

        let pending = tokio::time::timeout(Duration::from_millis(20), stream.next()).await;
        assert!(pending.is_err());

        live.publish("move".to_string());
        assert_eq!(stream.next().await.unwrap().data, "move");
    }

    #[tokio::test]
    async fn test_stream_ends_when_session_dropped() {
        let live = LiveState::new();
        let mut updates = live.subscribe();
        updates.next().await.unwrap();

        drop(live);
        assert!(updates.next().await.is_none());
    }
}
