use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use subtle::ConstantTimeEq;

use crate::error::ApiError;
use crate::handler::AppState;

/// `Authorization: Bearer <token>`, taken verbatim after the single space.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Rejects any request whose bearer token is not the configured API token.
/// Runs before routing into the protected subtree, so a rejected request
/// never reaches the database.
pub async fn require_bearer(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let authorized = bearer_token(request.headers())
        .is_some_and(|token| token.as_bytes().ct_eq(state.api_token.as_bytes()).into());

    if !authorized {
        tracing::error!(
            method = %request.method(),
            path = %request.uri().path(),
            "Unauthorized request"
        );
        return ApiError::Unauthorized.into_response();
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_bearer_tokens() {
        assert_eq!(bearer_token(&headers("Bearer abc")), Some("abc"));
    }

    #[test]
    fn token_is_taken_verbatim() {
        assert_eq!(bearer_token(&headers("Bearer  abc")), Some(" abc"));
        assert_eq!(bearer_token(&headers("Bearer abc\t")), Some("abc\t"));
        assert_eq!(bearer_token(&headers("bearer abc")), None);
        assert_eq!(bearer_token(&headers("BEARER abc")), None);
    }

    #[test]
    fn ignores_other_schemes() {
        assert_eq!(bearer_token(&headers("Basic abc")), None);
        assert_eq!(bearer_token(&headers("abc")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }
}
