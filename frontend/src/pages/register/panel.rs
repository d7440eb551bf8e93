use crate::pages::register::{components::form::RegisterForm, view_model::use_register_view_model};
use leptos::{ev::SubmitEvent, Callback, *};

#[component]
pub fn RegisterPanel() -> impl IntoView {
    let vm = use_register_view_model();
    let handle_submit = Callback::new(move |ev: SubmitEvent| {
        ev.prevent_default();
        vm.submit();
    });

    view! { <RegisterForm form=vm.form pending=vm.pending() on_submit=handle_submit /> }
}
