use leptos::*;
use leptos_meta::*;
use leptos_router::*;

use crate::auth::use_auth;
use crate::components::ConfirmDelete;
use crate::models::{Author, ProfileUpdate};

#[component]
pub fn Profile() -> impl IntoView {
    let auth = use_auth();
    let refresh = create_rw_signal(0u32);

    let api = auth.api.clone();
    let profile = create_local_resource(
        move || refresh.get(),
        move |_| {
            let api = api.clone();
            async move { api.profile().await }
        },
    );

    view! {
        <Title text="Profile"/>
        <div class="settings-page">
            <div class="container page">
                <div class="row">
                    <div class="col-md-6 offset-md-3 col-xs-12">
                        <h1 class="text-xs-center">"Your Profile"</h1>
                        <Suspense fallback=move || view! { <div class="loading">"Loading profile..."</div> }>
                            {move || profile.get().map(|result| match result {
                                Ok(author) => view! { <ProfileView author refresh /> }.into_view(),
                                Err(e) => view! {
                                    <div class="error-messages">
                                        "Failed to load profile: " {e.to_string()}
                                    </div>
                                }.into_view(),
                            })}
                        </Suspense>
                    </div>
                </div>
            </div>
        </div>
    }
}

#[component]
fn ProfileView(author: Author, refresh: RwSignal<u32>) -> impl IntoView {
    let auth = use_auth();
    let to_login = use_navigate();
    let navigate = use_navigate();
    let editing = create_rw_signal(false);
    let notice = create_rw_signal(None::<Result<String, String>>);

    let username = create_rw_signal(author.username.clone());
    let email = create_rw_signal(author.email.clone().unwrap_or_default());
    let name = create_rw_signal(author.name.clone().unwrap_or_default());
    let new_password = create_rw_signal(String::new());
    let current_password = create_rw_signal(String::new());

    let api = auth.api.clone();
    let update = create_action(move |update: &ProfileUpdate| {
        let api = api.clone();
        let update = update.clone();
        async move { api.update_profile(&update).await }
    });

    let api = auth.api.clone();
    let delete = create_action(move |_: &()| {
        let api = api.clone();
        async move { api.delete_account().await }
    });

    let claims = auth.claims;
    create_effect(move |_| match update.value().get() {
        Some(Ok(updated)) if updated.requires_relogin => {
            tracing::info!("password changed, session ended");
            claims.set(None);
            to_login("/login?passwordChanged=true", Default::default());
        }
        Some(Ok(updated)) => {
            let message = updated
                .message
                .unwrap_or_else(|| "Profile updated successfully".into());
            notice.set(Some(Ok(message)));
            editing.set(false);
            refresh.update(|x| *x += 1);
        }
        Some(Err(e)) => notice.set(Some(Err(e.to_string()))),
        None => {}
    });

    create_effect(move |_| match delete.value().get() {
        Some(Ok(())) => {
            tracing::info!("account deleted");
            claims.set(None);
            navigate("/login?accountDeleted=true", Default::default());
        }
        Some(Err(e)) => notice.set(Some(Err(e.to_string()))),
        None => {}
    });

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        match ProfileUpdate::from_form(
            username.get_untracked(),
            email.get_untracked(),
            name.get_untracked(),
            new_password.get_untracked(),
            current_password.get_untracked(),
        ) {
            Ok(form) => update.dispatch(form),
            Err(msg) => notice.set(Some(Err(msg))),
        }
    };

    let is_pending = move || update.pending().get();
    let shown = store_value(author);

    view! {
        {move || notice.get().map(|n| match n {
            Ok(msg) => view! { <div class="alert alert-success">{msg}</div> },
            Err(msg) => view! { <div class="alert alert-danger">{msg}</div> },
        })}

        <Show
            when=move || editing.get()
            fallback=move || shown.with_value(|author| view! {
                <div class="profile-info">
                    <p><strong>"Username: "</strong>{author.username.clone()}</p>
                    <p><strong>"Name: "</strong>{author.name()}</p>
                    <p><strong>"Email: "</strong>{author.email()}</p>
                    <button
                        class="btn btn-outline-primary"
                        on:click=move |_| {
                            notice.set(None);
                            editing.set(true);
                        }
                    >
                        "Edit Profile"
                    </button>
                </div>
            })
        >
            <form on:submit=on_submit>
                <fieldset disabled=is_pending>
                    <fieldset class="form-group">
                        <input
                            class="form-control form-control-lg"
                            type="text"
                            placeholder="Username"
                            prop:value=move || username.get()
                            on:input=move |ev| username.set(event_target_value(&ev))
                        />
                    </fieldset>
                    <fieldset class="form-group">
                        <input
                            class="form-control form-control-lg"
                            type="text"
                            placeholder="Name"
                            prop:value=move || name.get()
                            on:input=move |ev| name.set(event_target_value(&ev))
                        />
                    </fieldset>
                    <fieldset class="form-group">
                        <input
                            class="form-control form-control-lg"
                            type="email"
                            placeholder="Email"
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                        />
                    </fieldset>
                    <fieldset class="form-group">
                        <input
                            class="form-control form-control-lg"
                            type="password"
                            placeholder="New Password"
                            prop:value=move || new_password.get()
                            on:input=move |ev| new_password.set(event_target_value(&ev))
                        />
                        <input
                            class="form-control form-control-lg"
                            type="password"
                            placeholder="Current Password"
                            prop:value=move || current_password.get()
                            on:input=move |ev| current_password.set(event_target_value(&ev))
                        />
                    </fieldset>
                    <button class="btn btn-lg btn-primary pull-xs-right" type="submit">
                        {move || if is_pending() { "Updating..." } else { "Save Changes" }}
                    </button>
                    <button class="btn btn-lg" type="button" on:click=move |_| editing.set(false)>
                        "Cancel"
                    </button>
                </fieldset>
            </form>
        </Show>

        <hr/>
        <div class="danger-zone">
            <ConfirmDelete
                label="Delete Account"
                prompts=vec![
                    "Are you sure you want to delete your account?",
                    "This will permanently delete your account and all your posts. Continue?",
                ]
                pending=delete.pending()
                on_confirm=move || delete.dispatch(())
            />
        </div>
    }
}
