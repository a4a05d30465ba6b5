//! Publish/subscribe event delivery.
//!
//! A backend moves opaque string payloads between publishers and
//! subscribers of a named topic. [`EventBus`] layers JSON encoding on top
//! and picks the backend from configuration:
//!
//! - [`MemoryPubSub`]: tokio broadcast channels, single process only
//! - [`RedisPubSub`]: Redis `PUBLISH` / `SUBSCRIBE`

mod memory;
mod redis_backend;

use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::{BoxStream, StreamExt};
use serde::{de::DeserializeOwned, Serialize};

use crate::config::{Config, PubSubBackend, MEMORY_PUBSUB_CAPACITY};
use crate::errors::{AppError, AppResult};

pub use self::memory::MemoryPubSub;
pub use self::redis_backend::RedisPubSub;

/// Transport-level publish/subscribe backend
#[async_trait]
pub trait PubSub: Send + Sync {
    /// Deliver `payload` to every current subscriber of `topic`.
    ///
    /// Publishing to a topic without subscribers is not an error.
    async fn publish(&self, topic: &str, payload: String) -> AppResult<()>;

    /// Stream of payloads published on `topic` after this call returns.
    async fn subscribe(&self, topic: &str) -> AppResult<BoxStream<'static, String>>;

    /// Check backend connectivity.
    async fn ping(&self) -> AppResult<()>;
}

/// Typed facade over a [`PubSub`] backend
#[derive(Clone)]
pub struct EventBus {
    backend: Arc<dyn PubSub>,
}

impl EventBus {
    pub fn new(backend: Arc<dyn PubSub>) -> Self {
        Self { backend }
    }

    /// Build the backend selected by `config.pubsub_backend`.
    pub async fn connect(config: &Config) -> AppResult<Self> {
        let backend: Arc<dyn PubSub> = match config.pubsub_backend {
            PubSubBackend::Memory => {
                tracing::info!("Using in-process pub/sub");
                Arc::new(MemoryPubSub::new(MEMORY_PUBSUB_CAPACITY))
            }
            PubSubBackend::Redis => {
                let redis = RedisPubSub::connect(&config.redis_url).await?;
                tracing::info!("Redis pub/sub connected");
                Arc::new(redis)
            }
        };
        Ok(Self::new(backend))
    }

    /// JSON-encode `event` and publish it on `topic`.
    pub async fn publish<T: Serialize>(&self, topic: &str, event: &T) -> AppResult<()> {
        let payload = serde_json::to_string(event)
            .map_err(|e| AppError::internal(format!("Event serialization error: {}", e)))?;
        self.backend.publish(topic, payload).await
    }

    /// Subscribe to `topic`, decoding each payload as `T`.
    ///
    /// Payloads that fail to decode are skipped.
    pub async fn subscribe<T>(&self, topic: &str) -> AppResult<BoxStream<'static, T>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let topic_name = topic.to_string();
        let stream = self.backend.subscribe(topic).await?;

        Ok(stream
            .filter_map(move |payload| {
                let decoded = match serde_json::from_str::<T>(&payload) {
                    Ok(event) => Some(event),
                    Err(e) => {
                        tracing::warn!(topic = %topic_name, "Dropping undecodable event: {}", e);
                        None
                    }
                };
                futures::future::ready(decoded)
            })
            .boxed())
    }

    pub async fn ping(&self) -> AppResult<()> {
        self.backend.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Ping {
        n: u32,
    }

    #[tokio::test]
    async fn typed_round_trip_skips_garbage() {
        let memory = Arc::new(MemoryPubSub::new(8));
        let bus = EventBus::new(memory.clone());

        let mut events = bus.subscribe::<Ping>("pings").await.unwrap();
        memory.publish("pings", "not json".to_string()).await.unwrap();
        bus.publish("pings", &Ping { n: 7 }).await.unwrap();

        assert_eq!(events.next().await, Some(Ping { n: 7 }));
    }

    #[tokio::test]
    async fn memory_backend_pings() {
        let bus = EventBus::connect(&Config::for_tests()).await.unwrap();
        assert!(bus.ping().await.is_ok());
    }
}
