//! Admin session tokens.
//!
//! The dashboard login flow issues HS256 JWTs; this module only verifies them and
//! turns the outcome into a [`Caller`]. A bad token never fails a request by itself:
//! it yields [`Caller::Anonymous`] and the operation decides whether that is enough.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use stagehand_domain::config::SessionConfig;
use stagehand_domain::constants::ADMIN_ROLE;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

#[stagehand_derive::stagehand_error]
pub enum SessionError {
    #[error("Session token rejected{}: {source}", format_context(.context))]
    Token { source: jsonwebtoken::errors::Error, context: Option<Cow<'static, str>> },

    #[error("Session role rejected{}: {message}", format_context(.context))]
    Role { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// Registered claims carried by an admin session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub role: String,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
}

/// Who is calling an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Caller {
    Admin(SessionClaims),
    Anonymous,
}

impl Caller {
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin(_))
    }

    #[must_use]
    pub fn subject(&self) -> Option<&str> {
        match self {
            Self::Admin(claims) => Some(&claims.sub),
            Self::Anonymous => None,
        }
    }
}

struct SessionKeys {
    decoding: DecodingKey,
    encoding: EncodingKey,
    validation: Validation,
    issuer: String,
    cookie: String,
    ttl_seconds: i64,
}

/// Verifies admin session tokens; cheap to clone.
#[derive(Clone)]
pub struct SessionVerifier {
    keys: Arc<SessionKeys>,
}

impl fmt::Debug for SessionVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionVerifier")
            .field("issuer", &self.keys.issuer)
            .field("cookie", &self.keys.cookie)
            .finish_non_exhaustive()
    }
}

impl SessionVerifier {
    #[must_use]
    pub fn new(config: &SessionConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation.leeway = config.leeway_seconds;

        Self {
            keys: Arc::new(SessionKeys {
                decoding: DecodingKey::from_secret(config.secret.as_bytes()),
                encoding: EncodingKey::from_secret(config.secret.as_bytes()),
                validation,
                issuer: config.issuer.clone(),
                cookie: config.cookie.clone(),
                ttl_seconds: i64::try_from(config.ttl_seconds).unwrap_or(i64::MAX),
            }),
        }
    }

    /// Name of the cookie carrying the session token.
    #[must_use]
    pub fn cookie_name(&self) -> &str {
        &self.keys.cookie
    }

    /// Decodes a token and requires the admin role.
    ///
    /// # Errors
    /// * [`SessionError::Token`] for malformed, expired, wrongly signed or foreign-issuer tokens.
    /// * [`SessionError::Role`] when the token is valid but not an admin session.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, SessionError> {
        let claims = decode::<SessionClaims>(token, &self.keys.decoding, &self.keys.validation)
            .context("Decoding session token")?
            .claims;

        if claims.role != ADMIN_ROLE {
            return Err(SessionError::Role {
                message: format!("'{}' is not an admin session", claims.role).into(),
                context: Some(claims.sub.into()),
            });
        }

        Ok(claims)
    }

    /// Resolves the caller from an optional raw token.
    #[must_use]
    pub fn caller(&self, token: Option<&str>) -> Caller {
        let Some(token) = token.map(str::trim).filter(|t| !t.is_empty()) else {
            return Caller::Anonymous;
        };

        match self.verify(token) {
            Ok(claims) => Caller::Admin(claims),
            Err(err) => {
                debug!(error = %err, "Treating caller as anonymous");
                Caller::Anonymous
            }
        }
    }

    /// Signs a token for `subject` valid from now for the configured TTL.
    ///
    /// Used by tests and local tooling; the dashboard issues its own tokens.
    ///
    /// # Errors
    /// Returns [`SessionError::Token`] if signing fails.
    pub fn issue(&self, subject: &str, role: &str) -> Result<String, SessionError> {
        self.issue_at(subject, role, Utc::now().timestamp())
    }

    /// Signs a token as if issued at `issued_at` (unix seconds).
    ///
    /// # Errors
    /// Returns [`SessionError::Token`] if signing fails.
    pub fn issue_at(&self, subject: &str, role: &str, issued_at: i64) -> Result<String, SessionError> {
        let claims = SessionClaims {
            sub: subject.to_owned(),
            role: role.to_owned(),
            iss: self.keys.issuer.clone(),
            iat: issued_at,
            exp: issued_at.saturating_add(self.keys.ttl_seconds),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.keys.encoding)
            .context("Signing session token")
    }
}
