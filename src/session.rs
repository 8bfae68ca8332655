use std::sync::{Mutex, MutexGuard, PoisonError, RwLock};

/// Header carrying the session token on every request made while logged in
pub const TOKEN_HEADER: &str = "rest-dspace-token";

/// Session state of one client: the opaque token handed out by `/login`.
///
/// The token is never inspected, only forwarded. An empty token is the same
/// as no token.
#[derive(Debug, Default)]
pub struct Session {
    token: RwLock<Option<String>>,
    transition: Mutex<()>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current token, if logged in
    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Store a token. Empty strings are normalized to no token.
    pub fn set_token(&self, token: Option<String>) -> Option<String> {
        let token = token.filter(|t| !t.is_empty());
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = token.clone();
        token
    }

    /// Forget the token
    pub fn clear(&self) {
        self.token
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }

    /// Serialize login/logout transitions. Ordinary requests never take this
    /// lock; they only read the token.
    pub(crate) fn begin_transition(&self) -> MutexGuard<'_, ()> {
        self.transition
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
