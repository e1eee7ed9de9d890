use crate::auth::{use_auth, validate_signup};
use crate::models::Signup as SignupForm;
use leptos::*;
use leptos_meta::*;
use leptos_router::*;

#[component]
pub fn Signup() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();

    let username = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let email = create_rw_signal(String::new());
    let name = create_rw_signal(String::new());
    let (error_message, set_error_message) = create_signal(None::<String>);
    let has_error = move || error_message.with(Option::is_some);

    let api = auth.api.clone();
    let signup = create_action(move |form: &SignupForm| {
        let api = api.clone();
        let form = form.clone();
        async move { api.signup(&form).await }
    });
    let pending = signup.pending();

    create_effect(move |_| match signup.value().get() {
        Some(Ok(())) => {
            set_error_message.set(None);
            navigate("/login?registered=true", Default::default());
        }
        Some(Err(e)) => {
            tracing::error!("Problem during signup: {e}");
            set_error_message.set(Some(e.to_string()));
        }
        None => {}
    });

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        match validate_signup(
            username.get_untracked(),
            password.get_untracked(),
            email.get_untracked(),
            name.get_untracked(),
        ) {
            Ok(form) => signup.dispatch(form),
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
        <Title text="Signup"/>
        <div class="auth-page">
            <div class="container page">
                <div class="row">
                    <div class="col-md-6 offset-md-3 col-xs-12">
                        <h1 class="text-xs-center">"Sign up"</h1>
                        <p class="text-xs-center">
                            <A href="/login">"Have an account?"</A>
                        </p>

                        {move || error_message.get().map(|msg| view! {
                            <div class="alert alert-danger text-xs-center" role="alert">
                                {msg}
                            </div>
                        })}

                        <form on:submit=on_submit>
                            <fieldset class="form-group">
                                <input
                                    class=move || error_class(has_error())
                                    type="text"
                                    placeholder="Your Name"
                                    prop:value=move || name.get()
                                    on:input=move |ev| name.set(event_target_value(&ev))
                                />
                            </fieldset>
                            <fieldset class="form-group">
                                <input
                                    class=move || error_class(has_error())
                                    type="text"
                                    placeholder="Username"
                                    prop:value=move || username.get()
                                    on:input=move |ev| username.set(event_target_value(&ev))
                                />
                            </fieldset>
                            <fieldset class="form-group">
                                <input
                                    class=move || error_class(has_error())
                                    type="email"
                                    placeholder="Email"
                                    prop:value=move || email.get()
                                    on:input=move |ev| email.set(event_target_value(&ev))
                                />
                            </fieldset>
                            <fieldset class="form-group">
                                <input
                                    class=move || error_class(has_error())
                                    type="password"
                                    placeholder="Password"
                                    prop:value=move || password.get()
                                    on:input=move |ev| password.set(event_target_value(&ev))
                                />
                            </fieldset>
                            <button
                                class="btn btn-lg btn-primary pull-xs-right"
                                type="submit"
                                disabled=move || pending.get()
                            >
                                {move || if pending.get() { "Signing up..." } else { "Sign up" }}
                            </button>
                        </form>
                    </div>
                </div>
            </div>
        </div>
    }
}
