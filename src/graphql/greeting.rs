//! Greeting queries and the `helloSaid` subscription.

use std::sync::Arc;

use async_graphql::{Context, ErrorExtensions, Object, Result, Subscription};
use futures::stream::BoxStream;

use crate::domain::{GreetingOutput, MessageInput};
use crate::services::GreetingService;

fn greetings<'a>(ctx: &Context<'a>) -> Result<&'a Arc<dyn GreetingService>> {
    ctx.data::<Arc<dyn GreetingService>>()
}

#[derive(Default)]
pub struct GreetingQuery;

#[Object]
impl GreetingQuery {
    async fn check(&self, ctx: &Context<'_>) -> Result<String> {
        greetings(ctx)?.check().await.map_err(|e| e.extend())
    }

    /// Echo the message and publish it to `helloSaid` subscribers
    async fn say_hello(
        &self,
        ctx: &Context<'_>,
        #[graphql(default)] message_input: MessageInput,
    ) -> Result<String> {
        greetings(ctx)?
            .say_hello(message_input.content)
            .await
            .map_err(|e| e.extend())
    }
}

#[derive(Default)]
pub struct GreetingSubscription;

#[Subscription]
impl GreetingSubscription {
    async fn hello_said(
        &self,
        ctx: &Context<'_>,
    ) -> Result<BoxStream<'static, GreetingOutput>> {
        greetings(ctx)?.hello_said().await.map_err(|e| e.extend())
    }
}
