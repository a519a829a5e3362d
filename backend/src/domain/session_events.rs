//! Fan-out of session changes to per-browser subscribers.
//!
//! Every change is broadcast once on a Tokio channel and filtered per
//! subscription by [`ClientId`]. A [`SessionSubscription`] unregisters itself
//! when dropped, so the live count reported by
//! [`SessionEventBus::active_subscriptions`] always matches the handles held.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, warn};

use super::auth::{ClientId, SessionChange};

const CHANNEL_CAPACITY: usize = 64;

#[derive(Default)]
struct Registry {
    subscribers: HashMap<ClientId, usize>,
    latest: HashMap<ClientId, SessionChange>,
}

type SharedRegistry = Arc<Mutex<Registry>>;

fn lock(registry: &SharedRegistry) -> MutexGuard<'_, Registry> {
    // A poisoned registry still holds consistent counts.
    registry
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Broadcast hub for [`SessionChange`] events.
///
/// Subscriptions observe the end of the stream once every clone of the bus
/// has been dropped.
#[derive(Clone)]
pub struct SessionEventBus {
    sender: broadcast::Sender<(ClientId, SessionChange)>,
    registry: SharedRegistry,
}

impl Default for SessionEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionEventBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            sender,
            registry: Arc::default(),
        }
    }

    /// Register a subscription for `client`.
    pub fn subscribe(&self, client: ClientId) -> SessionSubscription {
        let receiver = self.sender.subscribe();
        *lock(&self.registry)
            .subscribers
            .entry(client)
            .or_default() += 1;
        debug!(%client, "session subscription opened");
        SessionSubscription {
            client,
            receiver,
            registry: Arc::clone(&self.registry),
        }
    }

    /// Publish a change for `client`. Changes without subscribers are dropped.
    pub fn publish(&self, client: ClientId, change: SessionChange) {
        {
            let mut registry = lock(&self.registry);
            if !registry.subscribers.contains_key(&client) {
                return;
            }
            registry.latest.insert(client, change.clone());
        }
        if self.sender.send((client, change)).is_err() {
            debug!(%client, "session change had no receivers");
        }
    }

    /// Number of live subscriptions for `client`.
    pub fn active_subscriptions(&self, client: ClientId) -> usize {
        lock(&self.registry)
            .subscribers
            .get(&client)
            .copied()
            .unwrap_or(0)
    }
}

/// Live subscription to one client's session changes.
pub struct SessionSubscription {
    client: ClientId,
    receiver: broadcast::Receiver<(ClientId, SessionChange)>,
    registry: SharedRegistry,
}

impl std::fmt::Debug for SessionSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionSubscription")
            .field("client", &self.client)
            .finish_non_exhaustive()
    }
}

impl SessionSubscription {
    pub fn client(&self) -> ClientId {
        self.client
    }

    /// Wait for the next change affecting this client.
    ///
    /// When the receiver lags behind, the skipped events are discarded and
    /// the most recent change for the client is returned instead. Returns
    /// `None` once the bus has been dropped.
    pub async fn next(&mut self) -> Option<SessionChange> {
        loop {
            match self.receiver.recv().await {
                Ok((client, change)) if client == self.client => return Some(change),
                Ok(_) => continue,
                Err(RecvError::Lagged(skipped)) => {
                    warn!(client = %self.client, skipped, "session subscription lagged");
                    let latest = lock(&self.registry).latest.get(&self.client).cloned();
                    if latest.is_some() {
                        return latest;
                    }
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }
}

impl Drop for SessionSubscription {
    fn drop(&mut self) {
        let mut registry = lock(&self.registry);
        let remaining = match registry.subscribers.get_mut(&self.client) {
            Some(count) => {
                *count = count.saturating_sub(1);
                *count
            }
            None => 0,
        };
        if remaining == 0 {
            registry.subscribers.remove(&self.client);
            registry.latest.remove(&self.client);
        }
        debug!(client = %self.client, remaining, "session subscription closed");
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{DisplayName, EmailAddress, Session, SessionUser, UserId};
    use rstest::{fixture, rstest};

    #[fixture]
    fn session() -> Session {
        Session {
            user: SessionUser {
                id: UserId::random(),
                email: EmailAddress::new("ada@example.org").expect("email"),
                display_name: DisplayName::new("Ada").expect("name"),
            },
        }
    }

    #[rstest]
    #[tokio::test]
    async fn subscribers_only_see_their_own_client(session: Session) {
        let bus = SessionEventBus::new();
        let mine = ClientId::random();
        let other = ClientId::random();
        let mut subscription = bus.subscribe(mine);
        let _other_subscription = bus.subscribe(other);

        bus.publish(other, SessionChange::SignedOut);
        bus.publish(mine, SessionChange::SignedIn(session.clone()));

        assert_eq!(
            subscription.next().await,
            Some(SessionChange::SignedIn(session))
        );
    }

    #[rstest]
    fn dropping_a_subscription_unsubscribes() {
        let bus = SessionEventBus::new();
        let client = ClientId::random();
        let first = bus.subscribe(client);
        let second = bus.subscribe(client);
        assert_eq!(bus.active_subscriptions(client), 2);

        drop(first);
        assert_eq!(bus.active_subscriptions(client), 1);
        drop(second);
        assert_eq!(bus.active_subscriptions(client), 0);
    }

    #[rstest]
    #[tokio::test]
    async fn lagging_subscribers_resume_from_latest_change(session: Session) {
        let bus = SessionEventBus::new();
        let client = ClientId::random();
        let mut subscription = bus.subscribe(client);

        for _ in 0..CHANNEL_CAPACITY {
            bus.publish(client, SessionChange::SignedOut);
        }
        bus.publish(client, SessionChange::SignedIn(session.clone()));

        assert_eq!(
            subscription.next().await,
            Some(SessionChange::SignedIn(session))
        );
    }

    #[rstest]
    #[tokio::test]
    async fn next_returns_none_when_bus_is_gone() {
        let bus = SessionEventBus::new();
        let mut subscription = bus.subscribe(ClientId::random());
        drop(bus);
        assert_eq!(subscription.next().await, None);
    }
}
