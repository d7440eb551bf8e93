use crate::components::guard::RequireAuth;
use leptos::*;

pub mod components;
pub mod panel;
pub mod repository;
pub mod utils;
pub mod view_model;

pub use panel::AdminPanel;

/// Guarded by sign-in only; the role decides which link the shell shows.
#[component]
pub fn AdminPage() -> impl IntoView {
    view! { <RequireAuth><AdminPanel /></RequireAuth> }
}
