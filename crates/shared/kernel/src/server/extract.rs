use crate::security::{Caller, SessionVerifier};
use axum::extract::{FromRef, FromRequestParts};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;
use std::convert::Infallible;

const BEARER_PREFIX: &str = "Bearer ";

/// Resolves the caller from the session cookie, falling back to a bearer token.
///
/// Never rejects; handlers receive [`Caller::Anonymous`] when no valid admin session is present.
impl<S> FromRequestParts<S> for Caller
where
    SessionVerifier: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let sessions = SessionVerifier::from_ref(state);
        let jar = CookieJar::from_headers(&parts.headers);

        let cookie = jar.get(sessions.cookie_name()).map(|c| c.value().to_owned());
        let bearer = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix(BEARER_PREFIX))
            .map(str::to_owned);

        Ok(sessions.caller(cookie.or(bearer).as_deref()))
    }
}
