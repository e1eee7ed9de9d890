use crate::auth::*;
use leptos::*;
use leptos_router::*;
use std::rc::Rc;

#[component]
pub(crate) fn NavItems() -> impl IntoView {
    let auth = use_auth();
    let claims = auth.claims;
    // The logout handler is cloned into the `Show` children.
    let navigate = Rc::new(use_navigate());

    let is_logged_in = move || claims.with(Option::is_some);

    let logout = move |_: ev::MouseEvent| {
        tracing::info!("logging out");
        auth.logout();
        navigate(LOGIN_PATH, Default::default());
    };

    view! {
        <Show
            when=is_logged_in
            fallback=move || {
                view! {
                    <li class="nav-item">
                        <A class="nav-link" href="/signup">
                            <i class="ion-plus-round"></i>
                            " Sign up"
                        </A>
                    </li>
                    <li class="nav-item">
                        <A class="nav-link" href="/login">
                            <i class="ion-log-in"></i>
                            " Login"
                        </A>
                    </li>
                }
            }
        >
            <li class="nav-item">
                <A class="nav-link" href="/" exact=true>
                    <i class="ion-home"></i>
                    " Dashboard"
                </A>
            </li>
            <li class="nav-item">
                <A class="nav-link" href="/posts/new">
                    <i class="ion-compose"></i>
                    " New Post"
                </A>
            </li>
            <li class="nav-item">
                <A class="nav-link" href="/profile">
                    <i class="ion-person"></i>
                    " Profile"
                </A>
            </li>
            <li class="nav-item">
                <button class="nav-link btn btn-link" on:click=logout.clone()>
                    <i class="ion-log-out"></i>
                    " Logout"
                </button>
            </li>
        </Show>
    }
}
