use crate::{
    components::layout::LoadingSpinner, state::auth::use_session, utils::navigation::use_redirect,
};
use leptos::*;

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardKind {
    /// Only signed-in viewers may see the content.
    RequireAuth,
    /// Only signed-out viewers may see the content (login, register).
    GuestOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    Redirect(&'static str),
    Wait,
}

pub fn guard_decision(kind: GuardKind, is_authenticated: bool, is_loading: bool) -> GuardDecision {
    if is_loading {
        return GuardDecision::Wait;
    }
    match (kind, is_authenticated) {
        (GuardKind::RequireAuth, true) | (GuardKind::GuestOnly, false) => GuardDecision::Render,
        (GuardKind::RequireAuth, false) => GuardDecision::Redirect(LOGIN_PATH),
        (GuardKind::GuestOnly, true) => GuardDecision::Redirect(HOME_PATH),
    }
}

/// Keeps guarded content mounted while a submission on that page is still
/// reporting its outcome, even if the session already changed under it.
#[derive(Clone, Copy)]
pub struct GuardHold(RwSignal<bool>);

impl GuardHold {
    pub fn hold(&self) {
        self.0.set(true);
    }

    pub fn release(&self) {
        self.0.set(false);
    }

    pub fn is_held(&self) -> bool {
        self.0.get()
    }
}

/// The hold of the enclosing guard; outside a guard it holds nothing.
pub fn use_guard_hold() -> GuardHold {
    use_context::<GuardHold>().unwrap_or_else(|| GuardHold(create_rw_signal(false)))
}

/// Tracks the decision for the current session and provides the hold that
/// content below this point can take.
pub fn use_guard_decision(kind: GuardKind) -> Memo<GuardDecision> {
    let state = use_session().state();
    let hold = GuardHold(create_rw_signal(false));
    provide_context(hold);
    create_memo(move |_| {
        if hold.is_held() {
            return GuardDecision::Render;
        }
        state.with(|s| guard_decision(kind, s.is_authenticated(), s.loading))
    })
}

fn guarded(kind: GuardKind, children: ChildrenFn) -> impl IntoView {
    let decision = use_guard_decision(kind);
    let redirect = use_redirect();
    create_effect(move |_| {
        if let GuardDecision::Redirect(path) = decision.get() {
            redirect(path);
        }
    });
    view! {
        <Show
            when=move || decision.get() == GuardDecision::Render
            fallback=move || {
                if decision.get() == GuardDecision::Wait {
                    view! { <LoadingSpinner /> }.into_view()
                } else {
                    ().into_view()
                }
            }
        >
            {children()}
        </Show>
    }
}

#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    guarded(GuardKind::RequireAuth, children)
}

#[component]
pub fn RedirectIfAuthenticated(children: ChildrenFn) -> impl IntoView {
    guarded(GuardKind::GuestOnly, children)
}
