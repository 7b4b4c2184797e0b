//! Login state carried by the session cookie.
//!
//! The cookie records both the user id and the role the caller logged in
//! with. Handlers that need the full user record go through
//! [`auth::current_user`](crate::inbound::http::auth::current_user), which
//! re-checks the recorded role against the store so a stale cookie cannot
//! outlive a role change. Anything unparseable in the cookie counts as
//! logged out, never as a server error.

use std::str::FromStr;

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, Role, User, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const ROLE_KEY: &str = "role";

/// Cookie name shared by the server wiring and the test harnesses.
pub const SESSION_COOKIE_NAME: &str = "session";

/// Wrapper exposing login-scoped operations over the raw Actix session.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Wrap the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Record a successful login in the session cookie.
    pub fn persist_login(&self, user: &User) -> Result<(), Error> {
        self.0
            .insert(USER_ID_KEY, user.id().as_ref())
            .and_then(|()| self.0.insert(ROLE_KEY, user.role().as_str()))
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// End the login by dropping all session state.
    pub fn clear(&self) {
        self.0.purge();
    }

    /// The login recorded in the cookie, if any.
    pub fn login(&self) -> Result<Option<(UserId, Role)>, Error> {
        let read = |key: &str| {
            self.0
                .get::<String>(key)
                .map_err(|error| Error::internal(format!("failed to read session: {error}")))
        };
        let (Some(raw_id), Some(raw_role)) = (read(USER_ID_KEY)?, read(ROLE_KEY)?) else {
            return Ok(None);
        };
        match (UserId::new(raw_id), Role::from_str(&raw_role)) {
            (Ok(id), Ok(role)) => Ok(Some((id, role))),
            (Err(error), _) => {
                warn!("discarding session with invalid user id: {error}");
                Ok(None)
            }
            (_, Err(error)) => {
                warn!("discarding session with invalid role: {error}");
                Ok(None)
            }
        }
    }

    /// Require a recorded login or fail with `401 Unauthorized`.
    pub fn require_login(&self) -> Result<(UserId, Role), Error> {
        self.login()?
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
