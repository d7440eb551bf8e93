use leptos::*;
use leptos_meta::*;
use leptos_router::*;

use crate::{
    api::ApiClient,
    components::{layout::{Layout, APP_TITLE}, toast::provide_toasts},
    pages::{AccessLogPage, AdminPage, HomePage, LoginPage, RegisterPage},
    state::auth::AuthProvider,
};

pub const ROUTE_PATHS: &[&str] = &["/", "/register", "/login", "/admin", "/access"];

/// Routes that require a signed-in viewer.
pub const PROTECTED_ROUTE_PATHS: &[&str] = &["/admin", "/access"];

/// Routes a signed-in viewer is sent away from.
pub const GUEST_ONLY_ROUTE_PATHS: &[&str] = &["/login", "/register"];

pub fn mount_app() {
    mount_to_body(app_root);
}

pub fn app_root() -> impl IntoView {
    provide_context(ApiClient::new());
    provide_meta_context();
    provide_toasts();
    view! {
        <Title text=APP_TITLE />
        <AuthProvider>
            <Router>
                <Layout>
                    <Routes>
                        <Route path="/" view=HomePage/>
                        <Route path="/register" view=RegisterPage/>
                        <Route path="/login" view=LoginPage/>
                        <Route path="/admin" view=AdminPage/>
                        <Route path="/access" view=AccessLogPage/>
                    </Routes>
                </Layout>
            </Router>
        </AuthProvider>
    }
}
