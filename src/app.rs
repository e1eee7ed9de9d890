use leptos::*;
use leptos_meta::*;
use leptos_router::*;

use crate::auth::{AuthProvider, RequireAuth};
use crate::components::NavItems;
use crate::routes::*;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <AuthProvider>
            <AppContent/>
        </AuthProvider>
    }
}

#[component]
fn AppContent() -> impl IntoView {
    provide_meta_context();

    view! {
        <Stylesheet id="ionicons" href="https://code.ionicframework.com/ionicons/2.0.1/css/ionicons.min.css"/>
        <Stylesheet id="main-css" href="https://demo.productionready.io/main.css"/>

        <Title text="Author Dashboard"/>

        <Router>
            <nav class="navbar navbar-light">
                <div class="container">
                    <A class="navbar-brand" href="/" exact=true>
                        "authordesk"
                    </A>
                    <ul class="nav navbar-nav pull-xs-right">
                        <NavItems/>
                    </ul>
                </div>
            </nav>

            <main>
                <Routes>
                    <Route path="/signup" view=|| view! { <Signup/> }/>
                    <Route path="/login" view=|| view! { <Login/> }/>
                    <Route
                        path="/"
                        view=|| view! { <RequireAuth><Dashboard/></RequireAuth> }
                    />
                    <Route
                        path="/profile"
                        view=|| view! { <RequireAuth><Profile/></RequireAuth> }
                    />
                    <Route
                        path="/posts/new"
                        view=|| view! { <RequireAuth><Editor/></RequireAuth> }
                    />
                    <Route
                        path="/posts/:id"
                        view=|| view! { <RequireAuth><PostDetail/></RequireAuth> }
                    />
                </Routes>
            </main>

            <footer>
                <div class="container">
                    <A href="/" class="logo-font">
                        "authordesk"
                    </A>
                    <span class="attribution">"Write, publish and discuss your posts."</span>
                </div>
            </footer>
        </Router>
    }
}
