use super::utils::validate_credentials;
use crate::api::{ApiError, AuthUser, Credentials};
use crate::components::{
    guard::{use_guard_hold, GuardHold},
    toast::{use_toasts, Toasts},
};
use crate::state::auth::use_session;
use leptos::*;

#[derive(Clone, Copy)]
pub struct LoginFormState {
    pub email: RwSignal<String>,
    pub password: RwSignal<String>,
}

impl Default for LoginFormState {
    fn default() -> Self {
        Self {
            email: create_rw_signal(String::new()),
            password: create_rw_signal(String::new()),
        }
    }
}

#[derive(Clone, Copy)]
pub struct LoginViewModel {
    pub form: LoginFormState,
    pub sign_in_action: Action<Credentials, Result<AuthUser, ApiError>>,
    hold: GuardHold,
    toasts: Toasts,
}

impl LoginViewModel {
    pub fn pending(&self) -> Signal<bool> {
        self.sign_in_action.pending().into()
    }

    /// Validates the form and dispatches the sign-in. Returns whether a
    /// request was sent.
    pub fn submit(&self) -> bool {
        if self.sign_in_action.pending().get_untracked() {
            return false;
        }
        let credentials = validate_credentials(
            &self.form.email.get_untracked(),
            &self.form.password.get_untracked(),
        );
        match credentials {
            Ok(credentials) => {
                self.hold.hold();
                self.sign_in_action.dispatch(credentials);
                true
            }
            Err(err) => {
                self.toasts.error_from(&err);
                false
            }
        }
    }
}

/// The outcome is reported before the guard is released, so the redirect
/// away from the login page never races the notification.
pub fn use_login_view_model() -> LoginViewModel {
    let form = LoginFormState::default();
    let store = use_session();
    let hold = use_guard_hold();
    let toasts = use_toasts();

    let sign_in_action = create_action(move |credentials: &Credentials| {
        let store = store.clone();
        let credentials = credentials.clone();
        async move {
            let result = store.sign_in(credentials).await;
            match &result {
                Ok(_) => {
                    form.password.set(String::new());
                    toasts.success("Login successful!");
                }
                Err(err) => {
                    toasts.error_from(err);
                }
            }
            hold.release();
            result
        }
    });

    LoginViewModel {
        form,
        sign_in_action,
        hold,
        toasts,
    }
}
