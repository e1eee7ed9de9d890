use leptos::*;
use leptos_router::*;

use super::{ClaimsSignal, DefaultSession, SessionStore};
use crate::api::{ApiError, AuthorApi};
use crate::comments::Viewer;
use crate::models::Credentials;

pub const LOGIN_PATH: &str = "/login";

/// Shared handle on the API client and the identity decoded from its session.
#[derive(Clone)]
pub struct AuthContext {
    pub api: AuthorApi<DefaultSession>,
    pub claims: ClaimsSignal,
}

impl AuthContext {
    /// Re-reads the claims from the session store.
    pub fn refresh(&self) {
        self.claims.set(self.api.session().claims());
    }

    pub fn viewer(&self) -> Viewer {
        self.claims.with(|claims| Viewer::from(claims.as_ref()))
    }

    #[tracing::instrument(skip_all)]
    pub async fn login(&self, credentials: Credentials) -> Result<(), ApiError> {
        self.api.login(&credentials).await?;
        self.refresh();
        if self.claims.with_untracked(Option::is_none) {
            tracing::warn!("login returned a token without readable claims");
        }
        Ok(())
    }

    pub fn logout(&self) {
        self.api.logout();
        self.claims.set(None);
    }
}

#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let auth = AuthContext {
        api: AuthorApi::from_config(DefaultSession::default()),
        claims: create_rw_signal(None),
    };

    // Storage is only reachable once we run in the browser.
    let init = auth.clone();
    create_effect(move |_| init.refresh());

    provide_context(auth);
    children()
}

pub fn use_auth() -> AuthContext {
    expect_context::<AuthContext>()
}

/// Full page load of the login screen, used when the API rejects the token.
pub fn redirect_to_login() {
    #[cfg(feature = "hydrate")]
    if let Err(e) = leptos::window().location().set_href(LOGIN_PATH) {
        tracing::error!("Failed to redirect to login: {:?}", e);
    }
}

/// Renders its children only for a session with readable claims; anything
/// else is sent to the login page.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();

    let guard = auth.clone();
    create_effect(move |_| {
        if guard.claims.get().is_none() && guard.api.session().claims().is_none() {
            tracing::debug!("no usable session, redirecting to login");
            guard.api.logout();
            navigate(
                LOGIN_PATH,
                NavigateOptions {
                    replace: true,
                    ..Default::default()
                },
            );
        }
    });

    view! {
        <Show
            when=move || auth.claims.with(Option::is_some)
            fallback=|| view! { <p class="loading">"Checking your session..."</p> }
        >
            {children()}
        </Show>
    }
}
