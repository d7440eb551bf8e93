use crate::{
    api::Role,
    components::toast::{use_toasts, Toaster},
    state::auth::{use_session, use_sign_out_action},
    utils::navigation::use_redirect,
};
use leptos::*;

pub const APP_TITLE: &str = "SUN Lab Access System";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavLink {
    AdminPanel,
    Access,
}

impl NavLink {
    pub fn label(&self) -> &'static str {
        match self {
            NavLink::AdminPanel => "Admin Panel",
            NavLink::Access => "Access",
        }
    }

    pub fn href(&self) -> &'static str {
        match self {
            NavLink::AdminPanel => "/admin",
            NavLink::Access => "/access",
        }
    }
}

/// The role link shown to a signed-in viewer. A missing role gets the
/// non-admin link.
pub fn nav_link(role: Option<Role>) -> NavLink {
    match role {
        Some(Role::Admin) => NavLink::AdminPanel,
        Some(Role::Student | Role::Faculty | Role::Staff | Role::Janitor) | None => NavLink::Access,
    }
}

const NAV_ITEM_CLASS: &str =
    "text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium hover:bg-action-ghost-bg-hover";

#[component]
pub fn Header() -> impl IntoView {
    let state = use_session().state();
    let toasts = use_toasts();
    let is_authenticated = create_memo(move |_| state.with(|s| s.is_authenticated()));
    let link = create_memo(move |_| state.with(|s| nav_link(s.role())));

    let sign_out_action = use_sign_out_action();
    let sign_out_pending = sign_out_action.pending();
    let redirect = use_redirect();
    create_effect(move |_| {
        if let Some(result) = sign_out_action.value().get() {
            // The local session is gone either way; only report the provider error.
            if let Err(err) = result {
                toasts.error_from(&err);
            }
            redirect("/login");
        }
    });
    let on_sign_out = move |_| {
        if sign_out_pending.get_untracked() {
            return;
        }
        sign_out_action.dispatch(());
    };

    view! {
        <header class="bg-surface-elevated shadow-sm border-b border-border">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                <div class="flex justify-between items-center h-16">
                    <a href="/" class="text-xl font-semibold text-fg">
                        {APP_TITLE}
                    </a>
                    <nav class="flex items-center space-x-4">
                        <Show
                            when=move || is_authenticated.get()
                            fallback=|| view! {
                                <a href="/login" class=NAV_ITEM_CLASS>"Login"</a>
                            }
                        >
                            <a href=move || link.get().href() class=NAV_ITEM_CLASS>
                                {move || link.get().label()}
                            </a>
                            <button
                                on:click=on_sign_out
                                class="bg-action-danger-bg hover:bg-action-danger-bg-hover text-action-danger-text px-3 py-2 rounded-md text-sm font-medium disabled:opacity-50"
                                disabled=move || sign_out_pending.get()
                            >
                                "Logout"
                            </button>
                        </Show>
                    </nav>
                </div>
            </div>
        </header>
    }
}

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-surface">
            <Header />
            <Toaster />
            <main class="max-w-7xl mx-auto py-6 sm:px-6 lg:px-8">
                <div class="px-4 py-6 sm:px-0">
                    {children()}
                </div>
            </main>
        </div>
    }
}

#[component]
pub fn LoadingSpinner() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center py-8">
            <div class="h-8 w-8 animate-spin rounded-full border-4 border-action-primary-bg border-t-transparent"></div>
        </div>
    }
}
