use leptos::*;
use leptos_router::*;

use crate::models::Post;

#[component]
pub fn PostPreviewList(posts: Vec<Post>) -> impl IntoView {
    if posts.is_empty() {
        return view! {
            <div class="post-preview empty-state">
                <p>"No posts yet. Create your first post!"</p>
                <A href="/posts/new" class="btn btn-success">"Create Post"</A>
            </div>
        }
        .into_view();
    }

    view! {
        <div class="posts-list">
            <For
                each=move || posts.clone().into_iter().enumerate()
                key=|(i, post)| (*i, post.id)
                children=move |(_, post)| view! { <PostPreview post /> }
            />
        </div>
    }
    .into_view()
}

#[component]
fn PostPreview(post: Post) -> impl IntoView {
    view! {
        <article class="post-preview card">
            <h3>{post.title.clone()}</h3>
            <p class="excerpt">{post.excerpt()}</p>
            <div class="post-meta">
                <small>{post.created_on()}</small>
            </div>
            <A href=format!("/posts/{}", post.id) class="btn btn-sm btn-secondary">
                "View Post"
            </A>
        </article>
    }
}
