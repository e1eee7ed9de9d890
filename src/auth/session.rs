use std::{cell::RefCell, rc::Rc};

use super::{decode_claims, Claims};

pub const TOKEN_KEY: &str = "token";

/// Where the bearer token lives between page loads.
pub trait SessionStore: Clone + 'static {
    fn token(&self) -> Option<String>;
    fn set_token(&self, token: &str);
    fn clear(&self);

    /// Claims of the stored token, if there is one and it still decodes.
    fn claims(&self) -> Option<Claims> {
        let token = self.token()?;
        match decode_claims(&token) {
            Ok(claims) => Some(claims),
            Err(e) => {
                tracing::debug!("ignoring stored token: {e}");
                None
            }
        }
    }
}

/// Token kept in `localStorage`, the way the browser client persists logins.
#[cfg(feature = "hydrate")]
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserSession;

#[cfg(feature = "hydrate")]
impl SessionStore for BrowserSession {
    fn token(&self) -> Option<String> {
        use gloo_storage::{LocalStorage, Storage};

        LocalStorage::raw()
            .get_item(TOKEN_KEY)
            .ok()
            .flatten()
            .filter(|token| !token.is_empty())
    }

    fn set_token(&self, token: &str) {
        use gloo_storage::{LocalStorage, Storage};

        if let Err(e) = LocalStorage::raw().set_item(TOKEN_KEY, token) {
            tracing::error!("Failed to store session token: {:?}", e);
        }
    }

    fn clear(&self) {
        use gloo_storage::{LocalStorage, Storage};

        LocalStorage::delete(TOKEN_KEY);
    }
}

/// In-process token holder, used by the host build and in tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySession(Rc<RefCell<Option<String>>>);

impl MemorySession {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self(Rc::new(RefCell::new(Some(token.into()))))
    }
}

impl SessionStore for MemorySession {
    fn token(&self) -> Option<String> {
        self.0.borrow().clone()
    }

    fn set_token(&self, token: &str) {
        *self.0.borrow_mut() = Some(token.to_string());
    }

    fn clear(&self) {
        self.0.borrow_mut().take();
    }
}

#[cfg(feature = "hydrate")]
pub type DefaultSession = BrowserSession;
#[cfg(not(feature = "hydrate"))]
pub type DefaultSession = MemorySession;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{encode_test_token, Role};
    use serde_json::json;

    #[test]
    fn memory_session_lifecycle() {
        let session = MemorySession::default();
        assert!(session.token().is_none());
        assert!(session.claims().is_none());

        let token = encode_test_token(json!({ "id": 3, "role": "author" }));
        session.set_token(&token);
        let claims = session.claims().unwrap();
        assert_eq!(claims.id, 3);
        assert_eq!(claims.role, Role::Author);

        let shared = session.clone();
        shared.clear();
        assert!(session.token().is_none());
    }

    #[test]
    fn undecodable_token_has_no_claims() {
        let session = MemorySession::with_token("opaque");
        assert_eq!(session.token().as_deref(), Some("opaque"));
        assert!(session.claims().is_none());
    }
}
