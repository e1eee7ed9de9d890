use leptos::*;
use leptos_meta::*;
use leptos_router::*;

use crate::auth::{use_auth, LOGIN_PATH};
use crate::components::PostPreviewList;

/// The signed-in author's landing page with their posts.
#[component]
pub fn Dashboard() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();

    let api = auth.api.clone();
    let profile = create_local_resource(
        || (),
        move |_| {
            let api = api.clone();
            async move { api.profile().await }
        },
    );

    let logout = move |_: ev::MouseEvent| {
        auth.logout();
        navigate(LOGIN_PATH, Default::default());
    };

    view! {
        <Title text="Dashboard"/>
        <div class="home-page">
            <div class="container page">
                <Suspense fallback=move || view! { <p class="loading">"Loading..."</p> }>
                    {move || profile.get().map(|result| match result {
                        Ok(author) => view! {
                            <div class="banner">
                                <h1>{format!("Welcome, {}!", author.username)}</h1>
                                <div class="dashboard-actions">
                                    <A href="/posts/new" class="btn btn-primary">"Create New Post"</A>
                                    <A href="/profile" class="btn btn-outline-secondary">"View Profile"</A>
                                </div>
                            </div>
                            <h2>"Your Posts"</h2>
                            <PostPreviewList posts=author.posts />
                        }.into_view(),
                        Err(e) => view! {
                            <p class="error-messages">{format!("Failed to load profile: {e}")}</p>
                        }.into_view(),
                    })}
                </Suspense>
                <hr/>
                <button class="btn btn-outline-danger" on:click=logout>
                    "Logout"
                </button>
            </div>
        </div>
    }
}
