//! Redis-backed pub/sub.

use async_trait::async_trait;
use futures::stream::{BoxStream, StreamExt};
use redis::{aio::ConnectionManager, AsyncCommands, Client};

use super::PubSub;
use crate::errors::AppResult;

/// Publishes through a shared connection manager; every subscriber
/// opens its own pub/sub connection, closed when its stream is dropped.
pub struct RedisPubSub {
    client: Client,
    publisher: ConnectionManager,
}

impl RedisPubSub {
    pub async fn connect(redis_url: &str) -> AppResult<Self> {
        let client = Client::open(redis_url)?;
        let publisher = ConnectionManager::new(client.clone()).await?;
        Ok(Self { client, publisher })
    }
}

#[async_trait]
impl PubSub for RedisPubSub {
    async fn publish(&self, topic: &str, payload: String) -> AppResult<()> {
        let mut conn = self.publisher.clone();
        let receivers: i64 = conn.publish(topic, payload).await?;
        tracing::debug!(topic, receivers, "Event published");
        Ok(())
    }

    async fn subscribe(&self, topic: &str) -> AppResult<BoxStream<'static, String>> {
        let mut pubsub = self.client.get_async_pubsub().await?;
        pubsub.subscribe(topic).await?;

        let topic = topic.to_string();
        let events = pubsub.into_on_message().filter_map(move |msg| {
            let payload = match msg.get_payload::<String>() {
                Ok(payload) => Some(payload),
                Err(e) => {
                    tracing::warn!(topic = %topic, "Unreadable Redis message: {}", e);
                    None
                }
            };
            futures::future::ready(payload)
        });

        Ok(events.boxed())
    }

    async fn ping(&self) -> AppResult<()> {
        let mut conn = self.publisher.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }
}
