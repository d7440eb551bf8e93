use crate::components::{
    common::{Button, ButtonVariant},
    forms::{SelectField, TextField},
};
use crate::pages::register::{utils::role_options, view_model::RegisterFormState};
use leptos::{ev::SubmitEvent, *};

#[component]
pub fn RegisterForm(
    form: RegisterFormState,
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
                    <h2 class="text-2xl font-semibold text-fg">"Register"</h2>
                    <p class="mt-1 text-sm text-fg-muted">
                        "Enter your information to create an account"
                    </p>
                </div>
                <TextField id="name" label="Name" placeholder="Max Mustermann" required=true value=form.name />
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
                    autocomplete="new-password"
                    required=true
                    value=form.password
                />
                <SelectField
                    id="role"
                    label="Role"
                    placeholder="Select role"
                    options=role_options()
                    value=form.role
                />
                <Button
                    variant=ButtonVariant::Primary
                    class="w-full"
                    button_type="submit"
                    loading=pending
                >
                    {move || if pending.get() { "Registering..." } else { "Register" }}
                </Button>
                <p class="mt-4 text-center text-sm text-fg-muted">
                    "Already have an account? "
                    <a href="/login" class="underline">"Login"</a>
                </p>
            </form>
        </div>
    }
}
