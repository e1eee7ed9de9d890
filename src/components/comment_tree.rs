use leptos::*;

use super::ConfirmDelete;
use crate::api::ApiError;
use crate::auth::use_auth;
use crate::comments::{forest_len, render_plan, CommentNode, RenderedComment, ReplyBox, Viewer};
use crate::models::{CommentId, CommentRecord, NewComment, PostId, UserId};

const MAX_INDENT: usize = 8;

pub type CommentSubmit = Action<NewComment, Result<CommentRecord, ApiError>>;

/// Comment form, count and thread of a post.
///
/// Any successful change bumps `refresh`, which makes the page refetch the
/// post and rebuild the tree from scratch.
#[component]
pub fn CommentSection(
    post_id: PostId,
    post_author: Option<UserId>,
    forest: Vec<CommentNode>,
    refresh: RwSignal<u32>,
) -> impl IntoView {
    let auth = use_auth();
    let total = forest_len(&forest);
    let forest = store_value(forest);
    let reply = create_rw_signal(ReplyBox::default());
    let draft = create_rw_signal(String::new());
    let error = create_rw_signal(None::<String>);

    let api = auth.api.clone();
    let submit: CommentSubmit = create_action(move |comment: &NewComment| {
        let api = api.clone();
        let comment = comment.clone();
        async move { api.create_comment(&comment).await }
    });
    let is_submitting = submit.pending();

    create_effect(move |_| match submit.value().get() {
        Some(Ok(created)) => {
            tracing::info!(id = created.id, parent = ?created.parent_comment_id, "comment posted");
            reply.update(ReplyBox::submitted);
            draft.set(String::new());
            error.set(None);
            refresh.update(|x| *x += 1);
        }
        Some(Err(e)) => error.set(Some(e.to_string())),
        None => {}
    });

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        match NewComment::new(post_id, &draft.get_untracked(), None) {
            Ok(comment) => submit.dispatch(comment),
            Err(msg) => error.set(Some(msg)),
        }
    };

    let claims = auth.claims;
    let thread = move || {
        let viewer = claims.with(|claims| Viewer::from(claims.as_ref()));
        forest.with_value(|forest| render_plan(forest, post_author, &viewer))
    };

    view! {
        <section class="comments-section">
            <h2>{format!("Comments ({total})")}</h2>

            <form class="card comment-form" on:submit=on_submit>
                <div class="card-block">
                    <textarea
                        class="form-control"
                        placeholder="Write a comment..."
                        rows="3"
                        prop:value=move || draft.get()
                        on:input=move |ev| draft.set(event_target_value(&ev))
                        disabled=move || is_submitting.get()
                    ></textarea>
                </div>
                <div class="card-footer">
                    <button
                        class="btn btn-sm btn-primary"
                        type="submit"
                        disabled=move || is_submitting.get()
                    >
                        {move || if is_submitting.get() { "Posting..." } else { "Post Comment" }}
                    </button>
                </div>
            </form>

            {move || error.get().map(|msg| view! {
                <p class="error-messages">{msg}</p>
            })}

            <Show
                when=move || { total > 0 }
                fallback=|| view! { <p>"No comments yet"</p> }
            >
                <div class="comments-list">
                    {move || {
                        thread()
                            .into_iter()
                            .map(|comment| view! {
                                <CommentCard comment post_id reply submit refresh error />
                            })
                            .collect_view()
                    }}
                </div>
            </Show>
        </section>
    }
}

#[component]
fn CommentCard(
    comment: RenderedComment,
    post_id: PostId,
    reply: RwSignal<ReplyBox>,
    submit: CommentSubmit,
    refresh: RwSignal<u32>,
    error: RwSignal<Option<String>>,
) -> impl IntoView {
    let auth = use_auth();
    let RenderedComment {
        comment,
        depth,
        reply_count,
        actions,
    } = comment;
    let id: CommentId = comment.id;

    let api = auth.api.clone();
    let delete = create_action(move |id: &CommentId| {
        let api = api.clone();
        let id = *id;
        async move { api.delete_comment(id).await }
    });

    create_effect(move |_| match delete.value().get() {
        Some(Ok(())) => {
            tracing::info!(id, "comment deleted");
            refresh.update(|x| *x += 1);
        }
        Some(Err(e)) => error.set(Some(e.to_string())),
        None => {}
    });

    let on_reply = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        match reply.with_untracked(|r| r.submission(post_id)) {
            Ok(comment) => submit.dispatch(comment),
            Err(msg) => error.set(Some(msg)),
        }
    };

    let indent = format!("margin-left: {}rem", depth.min(MAX_INDENT) * 2);

    view! {
        <div class="comment card" class:reply={depth > 0} style=indent>
            <div class="comment-header card-footer">
                <span class="comment-author">{comment.author_name().to_string()}</span>
                {actions.by_post_author.then(|| view! {
                    <span class="tag-default tag-pill">"by the post's author"</span>
                })}
                <small class="comment-date">{comment.created_on()}</small>
            </div>

            <p class="comment-content card-block">{comment.content.clone()}</p>

            <div class="comment-actions">
                {(reply_count > 0).then(|| view! {
                    <small class="reply-count">{format!("{reply_count} replies")}</small>
                })}
                {actions.reply.then(|| view! {
                    <button
                        class="btn btn-sm btn-outline-primary reply-button"
                        on:click=move |_| reply.update(|r| r.open(id))
                    >
                        "Reply"
                    </button>
                })}
                {actions.delete.then(|| view! {
                    <ConfirmDelete
                        label="Delete"
                        prompts=vec!["Delete this comment?"]
                        pending=delete.pending()
                        on_confirm=move || delete.dispatch(id)
                    />
                })}
            </div>

            <Show when=move || reply.with(|r| r.is_open_for(id)) fallback=|| ()>
                <form class="reply-form" on:submit=on_reply>
                    <textarea
                        class="form-control"
                        placeholder="Write your reply..."
                        rows="2"
                        prop:value=move || reply.with(|r| r.draft().to_string())
                        on:input=move |ev| reply.update(|r| r.set_draft(event_target_value(&ev)))
                    ></textarea>
                    <div class="reply-actions">
                        <button
                            class="btn btn-sm btn-primary"
                            type="submit"
                            disabled=move || submit.pending().get()
                        >
                            "Post Reply"
                        </button>
                        <button
                            class="btn btn-sm"
                            type="button"
                            on:click=move |_| reply.update(ReplyBox::cancel)
                        >
                            "Cancel"
                        </button>
                    </div>
                </form>
            </Show>
        </div>
    }
}
