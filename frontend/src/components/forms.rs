use leptos::*;
use web_sys::{HtmlInputElement, HtmlSelectElement};

pub const INPUT_CLASS: &str = "appearance-none block w-full px-3 py-2 border border-border rounded-md bg-form-control-bg text-fg placeholder-fg-muted focus:outline-none focus:ring-action-primary-focus focus:border-action-primary-focus sm:text-sm";

/// Labelled `<input>` bound to a string signal.
#[component]
pub fn TextField(
    id: &'static str,
    label: &'static str,
    #[prop(default = "text")] input_type: &'static str,
    #[prop(optional)] placeholder: &'static str,
    #[prop(optional)] required: bool,
    #[prop(optional)] autocomplete: &'static str,
    value: RwSignal<String>,
) -> impl IntoView {
    view! {
        <div class="space-y-1">
            <label for=id class="block text-sm font-medium text-fg">{label}</label>
            <input
                id=id
                name=id
                type=input_type
                class=INPUT_CLASS
                placeholder=placeholder
                autocomplete=autocomplete
                required=required
                prop:value=move || value.get()
                on:input=move |ev| {
                    let target = event_target::<HtmlInputElement>(&ev);
                    value.set(target.value());
                }
            />
        </div>
    }
}

/// Labelled `<select>`; `options` are `(value, label)` pairs.
#[component]
pub fn SelectField(
    id: &'static str,
    label: &'static str,
    #[prop(optional)] placeholder: &'static str,
    options: Vec<(&'static str, &'static str)>,
    value: RwSignal<String>,
) -> impl IntoView {
    view! {
        <div class="space-y-1">
            <label for=id class="block text-sm font-medium text-fg">{label}</label>
            <select
                id=id
                name=id
                class=INPUT_CLASS
                prop:value=move || value.get()
                on:change=move |ev| {
                    let target = event_target::<HtmlSelectElement>(&ev);
                    value.set(target.value());
                }
            >
                <option value="" disabled=true selected=move || value.get().is_empty()>
                    {placeholder}
                </option>
                {options
                    .into_iter()
                    .map(|(option_value, option_label)| {
                        view! {
                            <option
                                value=option_value
                                selected=move || value.get() == option_value
                            >
                                {option_label}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        </div>
    }
}
