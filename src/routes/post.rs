use leptos::*;
use leptos_meta::*;
use leptos_router::*;

use crate::api::ApiError;
use crate::auth::use_auth;
use crate::comments::build_comment_tree;
use crate::components::{CommentSection, ConfirmDelete};
use crate::models::{Post, PostId, PostUpdate};

fn parse_post_id(raw: Option<&String>) -> Result<PostId, ApiError> {
    raw.and_then(|id| id.parse().ok())
        .ok_or_else(|| ApiError::Validation("Invalid post id".into()))
}

/// The post as last fetched successfully, plus the error of the latest fetch.
#[derive(Debug, Clone, Default, PartialEq)]
struct LoadedPost {
    post: Option<Post>,
    error: Option<ApiError>,
}

impl LoadedPost {
    /// A failed refetch keeps the post on screen. Only a failure for a
    /// different post id drops it.
    fn settle(&mut self, requested: Option<PostId>, result: Result<Post, ApiError>) {
        match result {
            Ok(post) => {
                self.post = Some(post);
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(?requested, "post fetch failed: {e}");
                if self.post.as_ref().map(|post| post.id) != requested {
                    self.post = None;
                }
                self.error = Some(e);
            }
        }
    }
}

#[component]
pub fn PostDetail() -> impl IntoView {
    let auth = use_auth();
    let params = use_params_map();
    let refresh = create_rw_signal(0u32);

    let api = auth.api.clone();
    let post = create_local_resource(
        move || (params.with(|p| parse_post_id(p.get("id"))), refresh.get()),
        move |(id, _)| {
            let api = api.clone();
            async move {
                match id {
                    Ok(id) => (Some(id), api.post(id).await),
                    Err(e) => (None, Err(e)),
                }
            }
        },
    );

    let loaded = create_rw_signal(LoadedPost::default());
    create_effect(move |_| {
        if let Some((requested, result)) = post.get() {
            loaded.update(|l| l.settle(requested, result));
        }
    });
    let current = create_memo(move |_| loaded.with(|l| l.post.clone()));
    let error = move || loaded.with(|l| l.error.as_ref().map(ToString::to_string));

    let title = create_rw_signal(String::from("Loading"));

    view! {
        <Title text=move || title.get()/>

        {move || error().map(|msg| view! {
            <p class="error-messages text-xs-center">{msg}</p>
        })}

        {move || match current.get() {
            Some(post) => {
                title.set(post.title.clone());
                view! { <PostPage post refresh /> }.into_view()
            }
            None if error().is_some() => view! {
                <div class="article-page">
                    <div class="container">
                        <A href="/">"Back to Dashboard"</A>
                    </div>
                </div>
            }.into_view(),
            None => view! {
                <div class="article-page">
                    <div class="container">
                        <p>"Loading post..."</p>
                    </div>
                </div>
            }.into_view(),
        }}
    }
}

#[component]
fn PostPage(post: Post, refresh: RwSignal<u32>) -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let post_id = post.id;
    let post_author = post.author_user_id();
    let forest = build_comment_tree(post.comment_records());

    let editing = create_rw_signal(false);
    let title = create_rw_signal(post.title.clone());
    let content = create_rw_signal(post.content.clone());
    let error = create_rw_signal(None::<String>);

    let claims = auth.claims;
    let is_owner = move || {
        claims.with(|c| match (c, post_author) {
            (Some(claims), Some(author)) => claims.id == author,
            (Some(_), None) => true,
            (None, _) => false,
        })
    };

    let api = auth.api.clone();
    let save = create_action(move |update: &PostUpdate| {
        let api = api.clone();
        let update = update.clone();
        async move { api.update_post(post_id, &update).await }
    });

    let api = auth.api.clone();
    let delete = create_action(move |_: &()| {
        let api = api.clone();
        async move { api.delete_post(post_id).await }
    });

    create_effect(move |_| match save.value().get() {
        Some(Ok(())) => {
            editing.set(false);
            refresh.update(|x| *x += 1);
        }
        Some(Err(e)) => error.set(Some(e.to_string())),
        None => {}
    });

    create_effect(move |_| match delete.value().get() {
        Some(Ok(())) => {
            tracing::info!(post_id, "post deleted");
            navigate("/", Default::default());
        }
        Some(Err(e)) => error.set(Some(e.to_string())),
        None => {}
    });

    let on_save = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        match PostUpdate::new(&title.get_untracked(), &content.get_untracked()) {
            Ok(update) => save.dispatch(update),
            Err(msg) => error.set(Some(msg)),
        }
    };

    let post = store_value(post);

    view! {
        <article class="article-page">
            {move || error.get().map(|msg| view! {
                <p class="error-messages text-xs-center">{msg}</p>
            })}

            <Show
                when=move || editing.get()
                fallback=move || post.with_value(|post| view! {
                    <header class="banner">
                        <div class="container">
                            <h1>{post.title.clone()}</h1>
                            <div class="article-meta">
                                <span class="author">{post.author_name()}</span>
                                <span class="date">{post.created_on()}</span>
                            </div>
                        </div>
                    </header>
                    <div class="container page">
                        <div class="row article-content">
                            <div class="col-md-12">
                                <p class="article-body">{post.content.clone()}</p>
                            </div>
                        </div>
                    </div>
                })
            >
                <form class="container page" on:submit=on_save>
                    <fieldset disabled=move || save.pending().get()>
                        <fieldset class="form-group">
                            <input
                                type="text"
                                class="form-control form-control-lg"
                                prop:value=move || title.get()
                                on:input=move |ev| title.set(event_target_value(&ev))
                            />
                        </fieldset>
                        <fieldset class="form-group">
                            <textarea
                                class="form-control"
                                rows="10"
                                prop:value=move || content.get()
                                on:input=move |ev| content.set(event_target_value(&ev))
                            ></textarea>
                        </fieldset>
                        <button class="btn btn-primary" type="submit">"Save"</button>
                        <button class="btn" type="button" on:click=move |_| editing.set(false)>
                            "Cancel"
                        </button>
                    </fieldset>
                </form>
            </Show>

            <div class="container page">
                <Show when=is_owner fallback=|| ()>
                    <div class="article-actions">
                        <button
                            class="btn btn-sm btn-outline-secondary"
                            on:click=move |_| editing.set(true)
                        >
                            <i class="ion-edit"></i>
                            " Edit Post"
                        </button>
                        <ConfirmDelete
                            label="Delete Post"
                            prompts=vec!["Are you sure you want to delete this post?"]
                            pending=delete.pending()
                            on_confirm=move || delete.dispatch(())
                        />
                    </div>
                </Show>

                <hr/>

                <div class="row">
                    <CommentSection post_id post_author forest refresh />
                </div>
            </div>
        </article>
    }
}
