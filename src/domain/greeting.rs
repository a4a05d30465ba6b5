//! Greeting event types.

use async_graphql::{InputObject, SimpleObject};
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_GREETING;

/// Payload of the `helloSaid` event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, SimpleObject)]
pub struct GreetingOutput {
    pub message: String,
}

#[derive(Debug, Clone, InputObject)]
pub struct MessageInput {
    #[graphql(default_with = "DEFAULT_GREETING.to_string()")]
    pub content: String,
}

impl Default for MessageInput {
    fn default() -> Self {
        Self {
            content: DEFAULT_GREETING.to_string(),
        }
    }
}
