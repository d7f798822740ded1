//! Bearer-token guard for the `/api` routes.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use log::warn;
use std::sync::Arc;

use super::envelope::error_response;
use crate::domain::ServiceError;

/// The token every request must present
#[derive(Clone)]
pub struct ApiToken(Arc<str>);

impl ApiToken {
    pub fn new(token: &str) -> Self {
        Self(Arc::from(token))
    }

    fn accepts(&self, headers: &HeaderMap) -> bool {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map_or(false, |presented| presented.trim() == &*self.0)
    }
}

pub async fn require_bearer_token(
    State(token): State<ApiToken>,
    request: Request,
    next: Next,
) -> Response {
    if !token.accepts(request.headers()) {
        warn!("🔒 Rejected unauthenticated request to {}", request.uri().path());
        return error_response(ServiceError::Unauthorized(
            "Missing or invalid bearer token".to_string(),
        ));
    }
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_token_must_match_exactly() {
        let token = ApiToken::new("s3cret");
        let mut headers = HeaderMap::new();
        assert!(!token.accepts(&headers));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer wrong"));
        assert!(!token.accepts(&headers));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("s3cret"));
        assert!(!token.accepts(&headers));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer s3cret"));
        assert!(token.accepts(&headers));
    }
}
