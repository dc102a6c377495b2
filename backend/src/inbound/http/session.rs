//! Cookie-session access for authenticated handlers.
//!
//! Wraps the Actix session so handlers work with a validated [`UserId`]
//! instead of raw cookie state. The login handler stores the id after a
//! successful credential check; every guarded handler reads it back through
//! [`SessionContext::require_user_id`]. A cookie that cannot be read or
//! whose payload does not deserialise to a UUID is treated as anonymous,
//! so tampering degrades to `401 Unauthorized` rather than a server error.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, UserId};

const SESSION_USER_KEY: &str = "user_id";

/// Extractor giving handlers typed access to the caller's session.
#[derive(Clone)]
pub struct SessionContext {
    inner: Session,
}

impl SessionContext {
    /// Record the authenticated user in the session after login.
    pub fn persist_user(&self, user_id: UserId) -> Result<(), Error> {
        self.inner
            .insert(SESSION_USER_KEY, user_id)
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// The authenticated user, or `None` for anonymous callers.
    ///
    /// Unreadable session state and payloads that fail UUID
    /// deserialisation both resolve to `None`.
    pub fn user_id(&self) -> Option<UserId> {
        match self.inner.get::<UserId>(SESSION_USER_KEY) {
            Ok(id) => id,
            Err(error) => {
                tracing::warn!("discarding unreadable session payload: {error}");
                None
            }
        }
    }

    /// The authenticated user, or `401 Unauthorized`.
    pub fn require_user_id(&self) -> Result<UserId, Error> {
        self.user_id()
            .ok_or_else(|| Error::unauthorized("login required"))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(|inner| Self { inner }) })
    }
}
