use super::repository;
use crate::api::{AccessAction, ApiError};
use crate::components::toast::use_toasts;
use crate::state::auth::use_session;
use leptos::*;

pub fn success_message(action: AccessAction) -> String {
    format!("{} successful!", action.as_str())
}

#[derive(Clone, Copy)]
pub struct AccessLogViewModel {
    pub log_action: Action<AccessAction, Result<(), ApiError>>,
}

impl AccessLogViewModel {
    pub fn busy(&self) -> Signal<bool> {
        self.log_action.pending().into()
    }

    /// Records `action` unless a request is still outstanding. Returns whether
    /// a request was sent.
    pub fn log_access(&self, action: AccessAction) -> bool {
        if self.log_action.pending().get_untracked() {
            log::debug!("{} ignored while a request is outstanding", action.as_str());
            return false;
        }
        self.log_action.dispatch(action);
        true
    }
}

pub fn use_access_log_view_model() -> AccessLogViewModel {
    let store = use_session();
    let toasts = use_toasts();
    let log_action = create_action(move |action: &AccessAction| {
        let store = store.clone();
        let action = *action;
        async move {
            let result = match store.current_user() {
                Some(user) => repository::log_access(store.api(), &user.id, action).await,
                None => Err(ApiError::auth("You must be logged in to log access")),
            };
            match &result {
                Ok(()) => {
                    toasts.success(success_message(action));
                }
                Err(err) => {
                    toasts.error_from(err);
                }
            }
            result
        }
    });
    AccessLogViewModel { log_action }
}
