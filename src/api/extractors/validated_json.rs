//! Validated JSON extractor - Combines deserialization with validation.

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::errors::AppError;

/// Validated JSON extractor that automatically validates requests.
///
/// Malformed bodies, missing or unknown fields and failed `validator`
/// rules all surface as [`AppError::Validation`] (400).
///
/// # Example
///
/// ```rust,ignore
/// use coffee_fiddle::api::extractors::ValidatedJson;
/// use coffee_fiddle::domain::CreateCoffee;
///
/// async fn create(ValidatedJson(payload): ValidatedJson<CreateCoffee>) {
///     // payload is already validated
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;

        value.validate()?;

        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    use crate::domain::CreateCoffee;

    fn json_request(body: &str) -> Request {
        Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn accepts_valid_payload() {
        let req = json_request(r#"{"name":"Roast","brand":"Buddy","flavors":["vanilla"]}"#);
        let ValidatedJson(coffee) = ValidatedJson::<CreateCoffee>::from_request(req, &())
            .await
            .unwrap();
        assert_eq!(coffee.name, "Roast");
        assert_eq!(coffee.flavors, vec!["vanilla".to_string()]);
    }

    #[tokio::test]
    async fn rejects_unknown_fields() {
        let req = json_request(
            r#"{"name":"Roast","brand":"Buddy","flavors":[],"isEnabled":true}"#,
        );
        let err = ValidatedJson::<CreateCoffee>::from_request(req, &())
            .await
            .err()
            .unwrap();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn runs_validator_rules() {
        let req = json_request(r#"{"name":"","brand":"Buddy","flavors":[]}"#);
        let err = ValidatedJson::<CreateCoffee>::from_request(req, &())
            .await
            .err()
            .unwrap();
        assert_eq!(err.to_string(), "name should not be empty");
    }
}
