use crate::{components::layout::APP_TITLE, state::auth::use_session};
use leptos::*;

#[component]
pub fn HomePage() -> impl IntoView {
    let state = use_session().state();
    let greeting = move || {
        state.with(|s| {
            s.user.as_ref().map(|user| {
                let name = user
                    .display_name()
                    .or(user.email_address())
                    .unwrap_or_default()
                    .to_string();
                format!("Welcome! {name}")
            })
        })
    };

    view! {
        <div class="max-w-7xl mx-auto py-12 px-4 sm:px-6 lg:px-8 text-center">
            <h1 class="text-4xl font-extrabold text-fg sm:text-5xl">
                {format!("Welcome to {APP_TITLE}")}
            </h1>
            <p class="mt-4 text-lg text-fg-muted">{greeting}</p>
        </div>
    }
}
