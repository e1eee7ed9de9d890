use leptos::*;
use leptos_meta::*;
use leptos_router::*;

use crate::auth::use_auth;
use crate::models::NewPost;

#[component]
pub fn Editor() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();

    let title = create_rw_signal(String::new());
    let content = create_rw_signal(String::new());
    let (error_message, set_error_message) = create_signal(None::<String>);

    let api = auth.api.clone();
    let publish = create_action(move |post: &NewPost| {
        let api = api.clone();
        let post = post.clone();
        async move { api.create_post(&post).await }
    });
    let pending = publish.pending();

    create_effect(move |_| match publish.value().get() {
        Some(Ok(id)) => {
            tracing::info!(id, "post created");
            navigate(&format!("/posts/{id}"), Default::default());
        }
        Some(Err(e)) => set_error_message.set(Some(e.to_string())),
        None => {}
    });

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        match NewPost::new(&title.get_untracked(), &content.get_untracked()) {
            Ok(post) => publish.dispatch(post),
            Err(msg) => set_error_message.set(Some(msg)),
        }
    };

    view! {
        <Title text="New Post"/>
        <div class="editor-page">
            <div class="container page">
                <div class="row">
                    <div class="col-md-10 offset-md-1 col-xs-12">
                        <h1>"Create New Post"</h1>
                        <p class="error-messages text-xs-center">
                            {move || error_message.get().unwrap_or_default()}
                        </p>
                        <form on:submit=on_submit>
                            <fieldset disabled=move || pending.get()>
                                <fieldset class="form-group">
                                    <input
                                        type="text"
                                        class="form-control form-control-lg"
                                        placeholder="Post Title"
                                        prop:value=move || title.get()
                                        on:input=move |ev| title.set(event_target_value(&ev))
                                    />
                                </fieldset>
                                <fieldset class="form-group">
                                    <textarea
                                        class="form-control"
                                        rows="10"
                                        placeholder="Write your post content..."
                                        prop:value=move || content.get()
                                        on:input=move |ev| content.set(event_target_value(&ev))
                                    ></textarea>
                                </fieldset>
                                <button class="btn btn-lg pull-xs-right btn-primary" type="submit">
                                    {move || if pending.get() { "Publishing..." } else { "Publish Post" }}
                                </button>
                                <A href="/" class="btn btn-lg btn-outline-secondary">"Cancel"</A>
                            </fieldset>
                        </form>
                    </div>
                </div>
            </div>
        </div>
    }
}
