//! Session helpers that keep handlers free of cookie details.
//!
//! The cookie session only carries an opaque [`SessionId`]. Datasets stay
//! server side, keyed by that id.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::{debug, warn};

use crate::domain::{Error, SessionId};

pub(crate) const SESSION_ID_KEY: &str = "dashboard_session_id";

/// Newtype exposing the dashboard's session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self(session)
    }

    /// Return the session id, minting and persisting one on first use.
    ///
    /// A cookie holding an unparseable id is treated as a new session.
    ///
    /// # Errors
    ///
    /// Returns an internal [`Error`] when the session store fails.
    pub fn session_id(&self) -> Result<SessionId, Error> {
        let stored = self
            .0
            .get::<String>(SESSION_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        if let Some(raw) = stored {
            match raw.parse::<SessionId>() {
                Ok(id) => return Ok(id),
                Err(error) => warn!(%error, "invalid session id in cookie; starting a new session"),
            }
        }

        let id = SessionId::random();
        self.0
            .insert(SESSION_ID_KEY, id.to_string())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))?;
        debug!(session = %id, "started dashboard session");
        Ok(id)
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
