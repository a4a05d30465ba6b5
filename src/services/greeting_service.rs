//! Greeting service - `check`, `sayHello` and the `helloSaid` event stream.

use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::config::{
    Environment, CHECK_COFFEE_NAME, TEST_COFFEE_BRAND, TEST_COFFEE_FLAVORS, TEST_COFFEE_NAME,
    TOPIC_HELLO_SAID,
};
use crate::domain::{CreateCoffee, GreetingOutput};
use crate::errors::AppResult;
use crate::infra::EventBus;

use super::CoffeeService;

#[async_trait]
pub trait GreetingService: Send + Sync {
    /// Round-trip through the store in the test environment, a constant otherwise
    async fn check(&self) -> AppResult<String>;

    /// Publish `content` as a `helloSaid` event and echo it back
    async fn say_hello(&self, content: String) -> AppResult<String>;

    /// Greetings published from now on
    async fn hello_said(&self) -> AppResult<BoxStream<'static, GreetingOutput>>;
}

pub struct Greeter {
    coffees: Arc<dyn CoffeeService>,
    events: EventBus,
    environment: Environment,
}

impl Greeter {
    pub fn new(coffees: Arc<dyn CoffeeService>, events: EventBus, environment: Environment) -> Self {
        Self {
            coffees,
            events,
            environment,
        }
    }
}

#[async_trait]
impl GreetingService for Greeter {
    async fn check(&self) -> AppResult<String> {
        if !self.environment.is_test() {
            return Ok(CHECK_COFFEE_NAME.to_string());
        }

        let coffee = self
            .coffees
            .create(CreateCoffee {
                name: TEST_COFFEE_NAME.to_string(),
                brand: TEST_COFFEE_BRAND.to_string(),
                flavors: TEST_COFFEE_FLAVORS.iter().map(|f| f.to_string()).collect(),
            })
            .await?;

        Ok(coffee.name)
    }

    async fn say_hello(&self, content: String) -> AppResult<String> {
        let event = GreetingOutput {
            message: content.clone(),
        };
        self.events.publish(TOPIC_HELLO_SAID, &event).await?;
        Ok(content)
    }

    async fn hello_said(&self) -> AppResult<BoxStream<'static, GreetingOutput>> {
        self.events.subscribe(TOPIC_HELLO_SAID).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coffee;
    use crate::infra::MemoryPubSub;
    use crate::services::MockCoffeeService;
    use futures::StreamExt;

    fn bus() -> EventBus {
        EventBus::new(Arc::new(MemoryPubSub::new(8)))
    }

    #[tokio::test]
    async fn check_outside_tests_skips_the_store() {
        let mut coffees = MockCoffeeService::new();
        coffees.expect_create().never();

        let greeter = Greeter::new(Arc::new(coffees), bus(), Environment::Development);
        assert_eq!(greeter.check().await.unwrap(), CHECK_COFFEE_NAME);
    }

    #[tokio::test]
    async fn check_in_tests_creates_the_test_coffee() {
        let mut coffees = MockCoffeeService::new();
        coffees
            .expect_create()
            .withf(|input| input.name == TEST_COFFEE_NAME && input.flavors.len() == 2)
            .times(1)
            .returning(|input| {
                Ok(Coffee {
                    id: 1,
                    name: input.name,
                    brand: input.brand,
                    flavors: vec![],
                })
            });

        let greeter = Greeter::new(Arc::new(coffees), bus(), Environment::Test);
        assert_eq!(greeter.check().await.unwrap(), TEST_COFFEE_NAME);
    }

    #[tokio::test]
    async fn say_hello_reaches_subscribers() {
        let greeter = Greeter::new(Arc::new(MockCoffeeService::new()), bus(), Environment::Test);
        let mut greetings = greeter.hello_said().await.unwrap();

        let echoed = greeter.say_hello("Salam".to_string()).await.unwrap();

        assert_eq!(echoed, "Salam");
        assert_eq!(
            greetings.next().await,
            Some(GreetingOutput {
                message: "Salam".to_string()
            })
        );
    }
}
