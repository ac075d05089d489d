//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! [`SessionContext`] wraps the Actix cookie session for login and logout.
//! [`AuthenticatedUser`] is the extractor protected handlers take: it
//! resolves the session's user id or rejects the request with 401 before
//! the handler body runs.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated user's id, rotating the session first.
    pub fn persist_user(&self, user_id: &UserId) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, user_id.as_ref())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Drop all session state and expire the cookie.
    pub fn clear(&self) {
        self.0.purge();
    }

    /// Fetch the current user id from the session, if present.
    ///
    /// A value that is not a valid id is treated as absent.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        let id = self
            .0
            .get::<String>(USER_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        Ok(id.and_then(|raw| match UserId::new(raw) {
            Ok(id) => Some(id),
            Err(error) => {
                tracing::warn!(%error, "invalid user id in session cookie");
                None
            }
        }))
    }

    /// Require an authenticated user id or return `401 Unauthorized`.
    pub fn require_user_id(&self) -> Result<UserId, Error> {
        self.user_id()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

/// Authenticated caller, extracted from the session cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(pub UserId);

impl AuthenticatedUser {
    /// Identifier of the signed-in user.
    pub fn id(&self) -> &UserId {
        &self.0
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = SessionContext::from_request(req, payload);
        Box::pin(async move {
            let session = fut.await?;
            Ok(AuthenticatedUser(session.require_user_id()?))
        })
    }
}
