use crate::{
    api::{
        self, ApiClient, ApiError, AuthSession, AuthUser, Credentials, Role, SignUpProfile,
    },
    utils::time,
};
use leptos::*;
use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub user: Option<AuthUser>,
    pub session: Option<AuthSession>,
    pub loading: bool,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().and_then(AuthUser::role)
    }
}

/// Every change to the session arrives as one of these, whether it was
/// caused locally or pushed by the provider.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthEvent {
    InitialSession(Option<AuthSession>),
    SignedIn(AuthSession),
    SignedUp {
        user: AuthUser,
        session: Option<AuthSession>,
    },
    TokenRefreshed(AuthSession),
    SignedOut,
}

fn reduce(state: &mut SessionState, event: &AuthEvent) {
    match event {
        AuthEvent::InitialSession(session) => {
            state.user = session.as_ref().map(|s| s.user.clone());
            state.session = session.clone();
        }
        AuthEvent::SignedIn(session) | AuthEvent::TokenRefreshed(session) => {
            state.user = Some(session.user.clone());
            state.session = Some(session.clone());
        }
        AuthEvent::SignedUp { user, session } => {
            state.user = Some(user.clone());
            state.session = session.clone();
        }
        AuthEvent::SignedOut => {
            state.user = None;
            state.session = None;
        }
    }
    state.loading = false;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

type Listener = Rc<dyn Fn(&AuthEvent)>;

/// Sole owner of the session. Readers get a read-only signal; writes happen
/// only through [`SessionStore::apply`].
#[derive(Clone)]
pub struct SessionStore {
    state: RwSignal<SessionState>,
    listeners: Rc<RefCell<Vec<(SubscriptionId, Listener)>>>,
    next_listener: Rc<Cell<u64>>,
    api: ApiClient,
}

impl SessionStore {
    /// A store waiting for its initial restore.
    pub fn new(api: ApiClient) -> Self {
        Self::with_state(
            api,
            SessionState {
                loading: true,
                ..SessionState::default()
            },
        )
    }

    pub fn with_state(api: ApiClient, state: SessionState) -> Self {
        Self {
            state: create_rw_signal(state),
            listeners: Rc::new(RefCell::new(Vec::new())),
            next_listener: Rc::new(Cell::new(0)),
            api,
        }
    }

    pub fn state(&self) -> ReadSignal<SessionState> {
        self.state.read_only()
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn current_user(&self) -> Option<AuthUser> {
        self.state.with_untracked(|s| s.user.clone())
    }

    pub fn apply(&self, event: AuthEvent) {
        log::debug!("session event: {}", event_name(&event));
        self.state.update(|state| reduce(state, &event));
        let listeners: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener(&event);
        }
    }

    pub fn subscribe(&self, listener: impl Fn(&AuthEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_listener.get());
        self.next_listener.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    pub async fn sign_up(
        &self,
        credentials: Credentials,
        profile: SignUpProfile,
    ) -> Result<AuthUser, ApiError> {
        let (user, session) = self.api.sign_up(credentials, profile).await?;
        self.apply(AuthEvent::SignedUp {
            user: user.clone(),
            session,
        });
        Ok(user)
    }

    pub async fn sign_in(&self, credentials: Credentials) -> Result<AuthUser, ApiError> {
        let session = self.api.sign_in_with_password(credentials).await?;
        let user = session.user.clone();
        self.apply(AuthEvent::SignedIn(session));
        Ok(user)
    }

    pub async fn sign_out(&self) -> Result<(), ApiError> {
        let result = self.api.sign_out().await;
        if let Err(err) = &result {
            log::warn!("Provider sign-out failed, local session cleared anyway: {err}");
        }
        self.apply(AuthEvent::SignedOut);
        result
    }

    /// Adopts the persisted session, if any, after checking it with the
    /// provider. An expired access token is refreshed first.
    pub async fn restore(&self) {
        let Some(stored) = api::load_session() else {
            self.apply(AuthEvent::InitialSession(None));
            return;
        };

        let restored = if api::is_session_expired(&stored, time::now_unix()) {
            self.api
                .refresh_session(&stored.refresh_token)
                .await
                .map(AuthEvent::TokenRefreshed)
        } else {
            self.api
                .get_user(&stored.access_token)
                .await
                .map(|user| AuthEvent::InitialSession(Some(AuthSession { user, ..stored })))
        };

        match restored {
            Ok(event) => {
                if let AuthEvent::InitialSession(Some(session)) = &event {
                    if let Err(err) = api::persist_session(session) {
                        log::warn!("Failed to persist restored session: {err}");
                    }
                }
                self.apply(event);
            }
            Err(err) => {
                log::info!("Stored session rejected, signing out locally: {err}");
                api::clear_session();
                self.apply(AuthEvent::InitialSession(None));
            }
        }
    }
}

fn event_name(event: &AuthEvent) -> &'static str {
    match event {
        AuthEvent::InitialSession(_) => "INITIAL_SESSION",
        AuthEvent::SignedIn(_) => "SIGNED_IN",
        AuthEvent::SignedUp { .. } => "SIGNED_UP",
        AuthEvent::TokenRefreshed(_) => "TOKEN_REFRESHED",
        AuthEvent::SignedOut => "SIGNED_OUT",
    }
}

/// Maps a change of the persisted session (written by another tab) to an event.
pub fn event_from_storage_change(new_value: Option<&str>) -> AuthEvent {
    match new_value.and_then(|raw| serde_json::from_str::<AuthSession>(raw).ok()) {
        Some(session) => AuthEvent::SignedIn(session),
        None => AuthEvent::SignedOut,
    }
}

#[cfg(target_arch = "wasm32")]
fn watch_other_tabs(store: SessionStore) {
    use wasm_bindgen::{closure::Closure, JsCast};

    let Some(window) = web_sys::window() else {
        return;
    };
    let handler = Closure::<dyn FnMut(web_sys::StorageEvent)>::new(move |ev: web_sys::StorageEvent| {
        if ev.key().as_deref() != Some(api::SESSION_STORAGE_KEY) {
            return;
        }
        store.apply(event_from_storage_change(ev.new_value().as_deref()));
    });
    if window
        .add_event_listener_with_callback("storage", handler.as_ref().unchecked_ref())
        .is_err()
    {
        log::warn!("Could not subscribe to session changes from other tabs");
    }
    // Lives as long as the page.
    handler.forget();
}

#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let store = SessionStore::new(api);
    provide_context(store.clone());

    #[cfg(target_arch = "wasm32")]
    {
        watch_other_tabs(store.clone());
        spawn_local(async move { store.restore().await });
    }

    view! { <>{children()}</> }
}

pub fn use_session() -> SessionStore {
    use_context::<SessionStore>().unwrap_or_else(|| {
        SessionStore::with_state(ApiClient::new(), SessionState::default())
    })
}

pub fn use_sign_out_action() -> Action<(), Result<(), ApiError>> {
    let store = use_session();
    create_action(move |_: &()| {
        let store = store.clone();
        async move { store.sign_out().await }
    })
}
