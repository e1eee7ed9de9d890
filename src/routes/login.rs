use crate::auth::{use_auth, validate_login};
use crate::models::Credentials;
use leptos::*;
use leptos_meta::*;
use leptos_router::*;

/// Banner shown when another page sent the user here on purpose.
fn notice_for(query: &ParamsMap) -> Option<&'static str> {
    if query.get("registered").map(String::as_str) == Some("true") {
        Some("Registration successful! Please login.")
    } else if query.get("passwordChanged").map(String::as_str) == Some("true") {
        Some("Password changed. Please login with your new password.")
    } else if query.get("accountDeleted").map(String::as_str) == Some("true") {
        Some("Your account has been deleted.")
    } else {
        None
    }
}

#[component]
pub fn Login() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let query = use_query_map();

    let username = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let (error_message, set_error_message) = create_signal(None::<String>);

    let login = create_action(move |credentials: &Credentials| {
        let auth = auth.clone();
        let credentials = credentials.clone();
        async move { auth.login(credentials).await }
    });
    let pending = login.pending();

    create_effect(move |_| match login.value().get() {
        Some(Ok(())) => {
            set_error_message.set(None);
            navigate("/", Default::default());
        }
        Some(Err(e)) => {
            tracing::warn!("login failed: {e}");
            set_error_message.set(Some(e.to_string()));
        }
        None => {}
    });

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        match validate_login(username.get_untracked(), password.get_untracked()) {
            Ok(credentials) => login.dispatch(credentials),
            Err(msg) => set_error_message.set(Some(msg)),
        }
    };

    let error_class = move |is_invalid| {
        if is_invalid {
            "form-control form-control-lg is-invalid"
        } else {
            "form-control form-control-lg"
        }
    };

    view! {
        <Title text="Login"/>
        <div class="auth-page">
            <div class="container page">
                <div class="row">
                    <div class="col-md-6 offset-md-3 col-xs-12">
                        <h1 class="text-xs-center">"Login"</h1>
                        <p class="text-xs-center">
                            <A href="/signup">"Don't have an account?"</A>
                        </p>

                        {move || query.with(notice_for).map(|notice| view! {
                            <div class="alert alert-success text-xs-center" role="alert">
                                {notice}
                            </div>
                        })}

                        <p class="error-messages text-xs-center">
                            {move || error_message.get().unwrap_or_default()}
                        </p>

                        <form on:submit=on_submit>
                            <fieldset class="form-group">
                                <input
                                    class=move || error_class(error_message.with(Option::is_some))
                                    type="text"
                                    placeholder="Username"
                                    aria-label="username"
                                    prop:value=move || username.get()
                                    on:input=move |ev| username.set(event_target_value(&ev))
                                />
                            </fieldset>
                            <fieldset class="form-group">
                                <input
                                    class=move || error_class(error_message.with(Option::is_some))
                                    type="password"
                                    placeholder="Password"
                                    aria-label="Password"
                                    prop:value=move || password.get()
                                    on:input=move |ev| password.set(event_target_value(&ev))
                                />
                            </fieldset>
                            <button
                                class="btn btn-lg btn-primary pull-xs-right"
                                type="submit"
                                disabled=move || pending.get()
                            >
                                {move || if pending.get() { "Signing in..." } else { "Sign in" }}
                            </button>
                        </form>
                    </div>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(key: &str) -> ParamsMap {
        let mut map = ParamsMap::new();
        map.insert(key.to_string(), "true".to_string());
        map
    }

    #[test]
    fn notices_follow_the_query_flag() {
        assert_eq!(
            notice_for(&query("registered")),
            Some("Registration successful! Please login.")
        );
        assert!(notice_for(&query("passwordChanged")).is_some());
        assert!(notice_for(&query("accountDeleted")).is_some());
        assert_eq!(notice_for(&ParamsMap::new()), None);
        assert_eq!(notice_for(&query("other")), None);
    }
}
