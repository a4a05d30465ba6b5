//! Request protocol extractor.

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};

const FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Protocol the client used to reach the service (`http`, `https`, ...).
///
/// Prefers the first `X-Forwarded-Proto` entry set by a proxy, then the
/// request URI scheme, and falls back to `http`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Protocol(pub String);

impl<S> FromRequestParts<S> for Protocol
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let forwarded = parts
            .headers
            .get(FORWARDED_PROTO)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(',').next())
            .map(|value| value.trim().to_ascii_lowercase())
            .filter(|value| !value.is_empty());

        let protocol = forwarded
            .or_else(|| parts.uri.scheme_str().map(str::to_string))
            .unwrap_or_else(|| "http".to_string());

        Ok(Protocol(protocol))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(request: Request<()>) -> String {
        let (mut parts, _) = request.into_parts();
        let Protocol(protocol) = Protocol::from_request_parts(&mut parts, &()).await.unwrap();
        protocol
    }

    #[tokio::test]
    async fn prefers_forwarded_header() {
        let request = Request::builder()
            .uri("http://localhost/coffees")
            .header(FORWARDED_PROTO, "HTTPS, http")
            .body(())
            .unwrap();
        assert_eq!(extract(request).await, "https");
    }

    #[tokio::test]
    async fn falls_back_to_uri_scheme() {
        let request = Request::builder()
            .uri("https://localhost/coffees")
            .body(())
            .unwrap();
        assert_eq!(extract(request).await, "https");
    }

    #[tokio::test]
    async fn defaults_to_http() {
        let request = Request::builder().uri("/coffees").body(()).unwrap();
        assert_eq!(extract(request).await, "http");
    }
}
