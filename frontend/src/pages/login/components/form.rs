use crate::components::{
    common::{Button, ButtonVariant},
    forms::TextField,
};
use crate::pages::login::view_model::LoginFormState;
use leptos::{ev::SubmitEvent, *};

#[component]
pub fn LoginForm(
    form: LoginFormState,
    pending: Signal<bool>,
    on_submit: Callback<SubmitEvent>,
) -> impl IntoView {
    view! {
        <div class="flex items-center justify-center">
            <form
                class="w-full max-w-md mt-12 md:mt-16 lg:mt-20 bg-surface-elevated shadow rounded-lg p-6 space-y-4"
                on:submit=move |ev| on_submit.call(ev)
            >
                <div>
                    <h2 class="text-2xl font-semibold text-fg">"Login"</h2>
                    <p class="mt-1 text-sm text-fg-muted">
                        "Enter your email below to login to your account."
                    </p>
                </div>
                <TextField
                    id="email"
                    label="Email"
                    input_type="email"
                    placeholder="max@example.com"
                    autocomplete="email"
                    required=true
                    value=form.email
                />
                <TextField
                    id="password"
                    label="Password"
                    input_type="password"
                    placeholder="••••••••••••"
                    autocomplete="current-password"
                    required=true
                    value=form.password
                />
                <Button
                    variant=ButtonVariant::Primary
                    class="w-full"
                    loading=pending
                    button_type="submit"
                >
                    {move || if pending.get() { "Logging in..." } else { "Login" }}
                </Button>
                <p class="mt-4 text-center text-sm text-fg-muted">
                    "Don't have an account? "
                    <a href="/register" class="underline">"Register"</a>
                </p>
            </form>
        </div>
    }
}
