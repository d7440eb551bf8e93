use super::{
    repository::{register, RegistrationOutcome},
    utils::{prepare_registration, RegistrationRequest},
};
use crate::api::ApiError;
use crate::components::{
    guard::{use_guard_hold, GuardHold},
    toast::{use_toasts, Toasts},
};
use crate::state::auth::use_session;
use leptos::*;

#[derive(Clone, Copy)]
pub struct RegisterFormState {
    pub name: RwSignal<String>,
    pub email: RwSignal<String>,
    pub password: RwSignal<String>,
    pub role: RwSignal<String>,
}

impl Default for RegisterFormState {
    fn default() -> Self {
        Self {
            name: create_rw_signal(String::new()),
            email: create_rw_signal(String::new()),
            password: create_rw_signal(String::new()),
            role: create_rw_signal(String::new()),
        }
    }
}

#[derive(Clone, Copy)]
pub struct RegisterViewModel {
    pub form: RegisterFormState,
    pub register_action: Action<RegistrationRequest, Result<RegistrationOutcome, ApiError>>,
    hold: GuardHold,
    toasts: Toasts,
}

impl RegisterViewModel {
    pub fn pending(&self) -> Signal<bool> {
        self.register_action.pending().into()
    }

    pub fn submit(&self) -> bool {
        if self.register_action.pending().get_untracked() {
            return false;
        }
        let form = self.form;
        let request = prepare_registration(
            &form.name.get_untracked(),
            &form.email.get_untracked(),
            &form.password.get_untracked(),
            &form.role.get_untracked(),
        );
        match request {
            Ok(request) => {
                self.hold.hold();
                self.register_action.dispatch(request);
                true
            }
            Err(err) => {
                self.toasts.error_from(&err);
                false
            }
        }
    }
}

/// Sign-up already adopts the new session while the profile row is still
/// being written; the guard hold keeps this page mounted until the outcome of
/// both steps has been reported.
pub fn use_register_view_model() -> RegisterViewModel {
    let form = RegisterFormState::default();
    let store = use_session();
    let hold = use_guard_hold();
    let toasts = use_toasts();
    let register_action = create_action(move |request: &RegistrationRequest| {
        let store = store.clone();
        let request = request.clone();
        async move {
            let result = register(&store, request).await;
            match &result {
                Ok(RegistrationOutcome::Completed(_)) => {
                    form.password.set(String::new());
                    toasts.success("Registration successful!");
                }
                Ok(RegistrationOutcome::ProfileWriteFailed { error, .. }) => {
                    toasts.error_from(error);
                }
                Err(err) => {
                    toasts.error_from(err);
                }
            }
            hold.release();
            result
        }
    });

    RegisterViewModel {
        form,
        register_action,
        hold,
        toasts,
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::ApiClient;
    use crate::components::guard::{use_guard_decision, GuardDecision, GuardKind};
    use crate::components::toast::provide_toasts;
    use crate::state::auth::{SessionState, SessionStore};
    use crate::test_support::ssr::with_runtime;
    use httpmock::prelude::*;
    use serde_json::json;
    use std::{cell::RefCell, rc::Rc, time::Duration};

    type Observed = Rc<RefCell<Vec<(GuardDecision, usize)>>>;

    /// Registers through the view model and returns, for every session
    /// change, the guard decision and the number of notifications at that
    /// moment, plus the notifications shown at the end.
    async fn register_through_view_model(
        server: &MockServer,
    ) -> (Vec<(GuardDecision, usize)>, Vec<String>, GuardDecision) {
        let runtime = create_runtime();
        let store = SessionStore::with_state(
            ApiClient::new_with_base_url(server.base_url(), "anon"),
            SessionState::default(),
        );
        provide_context(store.clone());
        let toasts = provide_toasts();
        let decision = use_guard_decision(GuardKind::GuestOnly);
        let vm = use_register_view_model();

        let seen: Observed = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        store.subscribe(move |_| {
            sink.borrow_mut()
                .push((decision.get_untracked(), toasts.items().with_untracked(Vec::len)));
        });

        vm.form.name.set("Ada".into());
        vm.form.email.set("ada@lab.edu".into());
        vm.form.password.set("correct-horse".into());
        vm.form.role.set("staff".into());
        assert!(vm.submit());
        for _ in 0..200 {
            if !vm.pending().get_untracked() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        let messages = toasts
            .items()
            .get_untracked()
            .into_iter()
            .map(|toast| toast.message)
            .collect();
        let observed = seen.borrow().clone();
        let last = decision.get_untracked();
        runtime.dispose();
        (observed, messages, last)
    }

    async fn sign_up_succeeds(server: &MockServer) {
        server
            .mock_async(|when, then| {
                when.method(POST).path("/auth/v1/signup");
                then.status(200).json_body(json!({
                    "access_token": "at",
                    "refresh_token": "rt",
                    "expires_in": 3600,
                    "user": {
                        "id": "u-new",
                        "email": "ada@lab.edu",
                        "user_metadata": { "name": "Ada", "role": "staff" }
                    }
                }));
            })
            .await;
    }

    #[tokio::test]
    async fn registration_is_reported_before_guard_redirects() {
        let server = MockServer::start_async().await;
        sign_up_succeeds(&server).await;
        let insert = server
            .mock_async(|when, then| {
                when.method(POST).path("/rest/v1/users");
                then.status(201).delay(Duration::from_millis(30));
            })
            .await;

        let local = tokio::task::LocalSet::new();
        let (observed, messages, last) =
            local.run_until(register_through_view_model(&server)).await;

        insert.assert_async().await;
        assert_eq!(observed, vec![(GuardDecision::Render, 0)]);
        assert_eq!(messages, vec!["Registration successful!".to_string()]);
        assert_eq!(last, GuardDecision::Redirect("/"));
    }

    #[tokio::test]
    async fn failed_profile_write_is_reported_before_guard_redirects() {
        let server = MockServer::start_async().await;
        sign_up_succeeds(&server).await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/rest/v1/users");
                then.status(403)
                    .json_body(json!({ "message": "new row violates row-level security policy" }));
            })
            .await;

        let local = tokio::task::LocalSet::new();
        let (observed, messages, last) =
            local.run_until(register_through_view_model(&server)).await;

        assert_eq!(observed, vec![(GuardDecision::Render, 0)]);
        assert_eq!(messages, vec!["new row violates row-level security policy".to_string()]);
        assert_eq!(last, GuardDecision::Redirect("/"));
    }

    #[test]
    fn short_password_never_reaches_the_network() {
        with_runtime(|| {
            let toasts = provide_toasts();
            let vm = use_register_view_model();
            vm.form.name.set("Ada".into());
            vm.form.email.set("a@x.com".into());
            vm.form.password.set("abcdef".into());
            vm.form.role.set("student".into());

            assert!(!vm.submit());
            assert_eq!(vm.register_action.version().get_untracked(), 0);
            assert_eq!(toasts.items().get_untracked().len(), 1);
        });
    }
}
