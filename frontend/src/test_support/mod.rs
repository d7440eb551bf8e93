#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod ssr;

#[cfg(test)]
pub mod helpers {
    use crate::api::{ApiClient, AuthSession, AuthUser, Role, UserMetadata};
    use crate::state::auth::{SessionState, SessionStore};
    use leptos::*;

    fn user(id: &str, name: &str, role: Option<Role>) -> AuthUser {
        AuthUser {
            id: id.into(),
            email: Some(format!("{name}@lab.edu").to_lowercase()),
            created_at: None,
            user_metadata: UserMetadata {
                name: Some(name.into()),
                role,
                email: None,
            },
        }
    }

    pub fn admin_user() -> AuthUser {
        user("u-admin", "Grace", Some(Role::Admin))
    }

    pub fn student_user() -> AuthUser {
        user("u-student", "Alan", Some(Role::Student))
    }

    pub fn user_without_role() -> AuthUser {
        user("u-none", "Nobody", None)
    }

    pub fn session_for(user: AuthUser) -> AuthSession {
        AuthSession {
            access_token: format!("token-{}", user.id),
            refresh_token: "refresh".into(),
            expires_at: None,
            expires_in: None,
            user,
        }
    }

    /// Provides a settled store holding `user` and returns it.
    pub fn provide_session(user: Option<AuthUser>) -> SessionStore {
        provide_session_with(user, false)
    }

    pub fn provide_session_with(user: Option<AuthUser>, loading: bool) -> SessionStore {
        let store = SessionStore::with_state(
            ApiClient::new(),
            SessionState {
                session: user.clone().map(session_for),
                user,
                loading,
            },
        );
        provide_context(store.clone());
        store
    }
}
