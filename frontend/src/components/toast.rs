use crate::api::ApiError;
use leptos::*;

/// How long a notification stays on screen before dismissing itself.
pub const TOAST_DURATION_MS: u32 = 4_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    fn classes(&self) -> &'static str {
        match self {
            ToastKind::Success => "bg-status-success-bg border-status-success-border text-status-success-text",
            ToastKind::Error => "bg-status-error-bg border-status-error-border text-status-error-text",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

#[derive(Clone, Copy)]
pub struct Toasts {
    items: RwSignal<Vec<Toast>>,
    next_id: StoredValue<u64>,
}

impl Toasts {
    pub fn new() -> Self {
        Self {
            items: create_rw_signal(Vec::new()),
            next_id: store_value(0),
        }
    }

    pub fn items(&self) -> Signal<Vec<Toast>> {
        self.items.into()
    }

    pub fn success(&self, message: impl Into<String>) -> u64 {
        self.push(ToastKind::Success, message.into())
    }

    pub fn error(&self, message: impl Into<String>) -> u64 {
        self.push(ToastKind::Error, message.into())
    }

    pub fn error_from(&self, err: &ApiError) -> u64 {
        self.error(err.user_message())
    }

    pub fn dismiss(&self, id: u64) {
        self.items.update(|items| items.retain(|toast| toast.id != id));
    }

    fn push(&self, kind: ToastKind, message: String) -> u64 {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);
        match kind {
            ToastKind::Success => log::info!("{message}"),
            ToastKind::Error => log::warn!("{message}"),
        }
        self.items.update(|items| items.push(Toast { id, kind, message }));
        self.schedule_dismiss(id);
        id
    }

    #[cfg(target_arch = "wasm32")]
    fn schedule_dismiss(&self, id: u64) {
        let toasts = *self;
        gloo_timers::callback::Timeout::new(TOAST_DURATION_MS, move || toasts.dismiss(id)).forget();
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn schedule_dismiss(&self, _id: u64) {}
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new()
    }
}

pub fn provide_toasts() -> Toasts {
    let toasts = Toasts::new();
    provide_context(toasts);
    toasts
}

/// Falls back to a detached queue so views also work outside the app shell.
pub fn use_toasts() -> Toasts {
    use_context::<Toasts>().unwrap_or_default()
}

#[component]
pub fn Toaster() -> impl IntoView {
    let toasts = use_toasts();
    view! {
        <div class="fixed top-4 right-4 z-50 flex flex-col gap-2 w-80" role="status" aria-live="polite">
            <For
                each=move || toasts.items().get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div class=format!("flex items-start justify-between rounded-md border px-4 py-3 shadow-md text-sm {}", toast.kind.classes())>
                            <span>{toast.message}</span>
                            <button
                                type="button"
                                class="ml-3 opacity-70 hover:opacity-100"
                                aria-label="Dismiss"
                                on:click=move |_| toasts.dismiss(id)
                            >
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
