use crate::components::guard::RequireAuth;
use leptos::*;

pub mod repository;
pub mod view_model;

mod panel;

pub use panel::AccessLogPanel;

#[component]
pub fn AccessLogPage() -> impl IntoView {
    view! {
        <RequireAuth>
            <AccessLogPanel />
        </RequireAuth>
    }
}
