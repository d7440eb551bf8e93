use leptos::*;
use leptos_router::{use_navigate, NavigateOptions, RouterContext};

/// Replaces the current location so the guarded page is not kept in history.
#[cfg(target_arch = "wasm32")]
pub fn redirect_to(path: &str) {
    if let Some(win) = web_sys::window() {
        let location = win.location();
        if location.pathname().ok().as_deref() == Some(path) {
            return;
        }
        if let Err(err) = location.replace(path) {
            log::error!("Redirect to {path} failed: {err:?}");
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn redirect_to(path: &str) {
    log::debug!("redirect to {path} skipped outside the browser");
}

/// Redirect for views. Under the router this is a client-side navigation, so
/// the session, pending requests and notifications survive it; elsewhere it
/// falls back to [`redirect_to`].
pub fn use_redirect() -> impl Fn(&str) + Clone + 'static {
    let navigate = use_context::<RouterContext>().map(|_| use_navigate());
    move |path: &str| match &navigate {
        Some(navigate) => navigate(
            path,
            NavigateOptions {
                replace: true,
                ..NavigateOptions::default()
            },
        ),
        None => redirect_to(path),
    }
}
