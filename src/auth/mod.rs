use leptos::RwSignal;

mod api;
mod auth;
mod claims;
mod session;

pub use api::*;
pub use auth::{redirect_to_login, use_auth, AuthContext, AuthProvider, RequireAuth, LOGIN_PATH};
#[cfg(test)]
pub(crate) use claims::encode_test_token;
pub use claims::{decode_claims, Claims, ClaimsError, Role};
#[cfg(feature = "hydrate")]
pub use session::BrowserSession;
pub use session::{DefaultSession, MemorySession, SessionStore, TOKEN_KEY};

pub type ClaimsSignal = RwSignal<Option<Claims>>;
