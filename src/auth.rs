use crate::catalog;
use crate::codec::Entity;
use crate::error::Result;
use crate::models::{Status, User};
use crate::rest::RestClient;
use crate::template::PathVars;
use tracing::{debug, warn};

impl RestClient {
    /// Log in and keep the returned token for the following calls.
    ///
    /// A session already open is logged out first; a failure of that logout
    /// is only logged. An empty token from the server leaves the client
    /// anonymous and is returned as `None`. If the login request fails the
    /// client stays anonymous and the error is returned.
    pub fn login(&self, credentials: &User) -> Result<Option<String>> {
        let entity = self.entity(credentials)?;
        let _transition = self.session().begin_transition();

        if self.session().is_authenticated() {
            if let Err(err) = self.end_session() {
                warn!(error = %err, "logout before login failed");
            }
        }

        let payload = self.do_request(&catalog::LOGIN, &PathVars::new(), &(), entity)?;
        let token = self.session().set_token(payload.into_text()?);
        debug!(authenticated = token.is_some(), "login completed");
        Ok(token)
    }

    /// Log out. The token is dropped whether or not the server accepted the
    /// request.
    pub fn logout(&self) -> Result<()> {
        let _transition = self.session().begin_transition();
        self.end_session()
    }

    /// Session status as seen by the server
    pub fn status(&self) -> Result<Status> {
        self.apply(&catalog::STATUS, &PathVars::new(), &(), Entity::Empty)
    }

    fn end_session(&self) -> Result<()> {
        let result = self.do_request(&catalog::LOGOUT, &PathVars::new(), &(), Entity::Empty);
        self.session().clear();
        debug!(ok = result.is_ok(), "logout completed");
        result.map(|_| ())
    }
}
