use super::{
    repository::AdminRepository,
    utils::{filter_logs, FilterInputs, LogFilter},
};
use crate::{
    api::{AccessLogEntry, ApiClient, ApiError, StatusAction, UserProfile},
    components::toast::{use_toasts, Toasts},
};
use leptos::*;
use std::rc::Rc;

/// Search form fields, bound to the inputs.
#[derive(Clone, Copy)]
pub struct FilterFormState {
    pub user_id: RwSignal<String>,
    pub from_date: RwSignal<String>,
    pub to_date: RwSignal<String>,
}

impl Default for FilterFormState {
    fn default() -> Self {
        Self {
            user_id: create_rw_signal(String::new()),
            from_date: create_rw_signal(String::new()),
            to_date: create_rw_signal(String::new()),
        }
    }
}

impl FilterFormState {
    pub fn snapshot(&self) -> FilterInputs {
        FilterInputs {
            user_id: self.user_id.get_untracked(),
            from_date: self.from_date.get_untracked(),
            to_date: self.to_date.get_untracked(),
        }
    }

    pub fn reset(&self) {
        self.user_id.set(String::new());
        self.from_date.set(String::new());
        self.to_date.set(String::new());
    }
}

#[derive(Clone, Copy)]
pub struct AdminViewModel {
    pub filter_form: FilterFormState,
    pub applied_filter: RwSignal<LogFilter>,
    pub users_reload: RwSignal<u32>,
    pub logs_resource: Resource<(), Result<Vec<AccessLogEntry>, ApiError>>,
    pub users_resource: Resource<u32, Result<Vec<UserProfile>, ApiError>>,
    pub status_action: Action<(String, StatusAction), Result<(), ApiError>>,
    toasts: Toasts,
}

impl AdminViewModel {
    /// Rows of the log table after applying the last searched filter.
    pub fn filtered_logs(&self) -> Signal<Option<Result<Vec<AccessLogEntry>, ApiError>>> {
        let logs_resource = self.logs_resource;
        let applied_filter = self.applied_filter;
        Signal::derive(move || {
            logs_resource.get().map(|result| {
                result.map(|logs| applied_filter.with(|filter| filter_logs(&logs, filter)))
            })
        })
    }

    pub fn search(&self) -> bool {
        match self.filter_form.snapshot().to_filter(&chrono::Local) {
            Ok(filter) => {
                self.applied_filter.set(filter);
                true
            }
            Err(err) => {
                self.toasts.error_from(&err);
                false
            }
        }
    }

    pub fn clear(&self) {
        self.filter_form.reset();
        self.applied_filter.set(LogFilter::default());
    }

    pub fn change_status(&self, user_id: String, action: StatusAction) -> bool {
        if self.status_action.pending().get_untracked() {
            return false;
        }
        self.status_action.dispatch((user_id, action));
        true
    }
}

pub fn use_admin_view_model() -> AdminViewModel {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let repository = AdminRepository::new_with_client(Rc::new(api));
    let toasts = use_toasts();

    let filter_form = FilterFormState::default();
    let applied_filter = create_rw_signal(LogFilter::default());
    let users_reload = create_rw_signal(0u32);

    let repo_for_logs = repository.clone();
    let logs_resource = create_resource(
        || (),
        move |_| {
            let repo = repo_for_logs.clone();
            async move {
                let result = repo.fetch_logs().await;
                if let Err(err) = &result {
                    toasts.error_from(err);
                }
                result
            }
        },
    );

    let repo_for_users = repository.clone();
    let users_resource = create_resource(
        move || users_reload.get(),
        move |_| {
            let repo = repo_for_users.clone();
            async move {
                let result = repo.fetch_users().await;
                if let Err(err) = &result {
                    toasts.error_from(err);
                }
                result
            }
        },
    );

    let repo_for_status = repository.clone();
    let status_action = create_action(move |(user_id, action): &(String, StatusAction)| {
        let repo = repo_for_status.clone();
        let user_id = user_id.clone();
        let action = *action;
        async move {
            let result = repo.change_status(&user_id, action).await;
            match &result {
                Ok(()) => users_reload.update(|value| *value = value.wrapping_add(1)),
                Err(err) => {
                    toasts.error_from(err);
                }
            }
            result
        }
    });

    AdminViewModel {
        filter_form,
        applied_filter,
        users_reload,
        logs_resource,
        users_resource,
        status_action,
        toasts,
    }
}
