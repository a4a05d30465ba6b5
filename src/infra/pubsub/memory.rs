//! In-process pub/sub using tokio broadcast channels.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use tokio::sync::broadcast::{self, error::RecvError};

use super::PubSub;
use crate::errors::AppResult;

/// Per-topic broadcast channels.
///
/// Suitable for tests and single-instance deployments; events never
/// leave the process.
pub struct MemoryPubSub {
    topics: Mutex<HashMap<String, broadcast::Sender<String>>>,
    capacity: usize,
}

impl MemoryPubSub {
    pub fn new(capacity: usize) -> Self {
        Self {
            topics: Mutex::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    /// Channel for `topic`. Topics left without receivers are pruned first,
    /// so the map holds at most the subscribed topics plus this one.
    fn sender(&self, topic: &str) -> broadcast::Sender<String> {
        let mut topics = self.topics.lock().unwrap_or_else(PoisonError::into_inner);
        topics.retain(|name, tx| name == topic || tx.receiver_count() > 0);
        topics
            .entry(topic.to_string())
            .or_insert_with(|| broadcast::channel(self.capacity).0)
            .clone()
    }

    /// Number of live subscribers on `topic`.
    pub fn subscriber_count(&self, topic: &str) -> usize {
        let topics = self.topics.lock().unwrap_or_else(PoisonError::into_inner);
        topics.get(topic).map_or(0, |tx| tx.receiver_count())
    }
}

#[async_trait]
impl PubSub for MemoryPubSub {
    async fn publish(&self, topic: &str, payload: String) -> AppResult<()> {
        match self.sender(topic).send(payload) {
            Ok(receivers) => tracing::debug!(topic, receivers, "Event published"),
            Err(_) => tracing::debug!(topic, "Event published without subscribers"),
        }
        Ok(())
    }

    async fn subscribe(&self, topic: &str) -> AppResult<BoxStream<'static, String>> {
        let receiver = self.sender(topic).subscribe();
        let topic = topic.to_string();

        let events = stream::unfold(receiver, move |mut receiver| {
            let topic = topic.clone();
            async move {
                loop {
                    match receiver.recv().await {
                        Ok(payload) => return Some((payload, receiver)),
                        Err(RecvError::Lagged(skipped)) => {
                            tracing::warn!(topic = %topic, skipped, "Subscriber lagged behind");
                        }
                        Err(RecvError::Closed) => return None,
                    }
                }
            }
        });

        Ok(events.boxed())
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
