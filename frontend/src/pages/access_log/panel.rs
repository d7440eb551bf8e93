use super::view_model::use_access_log_view_model;
use crate::api::AccessAction;
use crate::components::common::{Button, ButtonVariant};
use crate::state::auth::use_session;
use leptos::*;

#[component]
pub fn AccessLogPanel() -> impl IntoView {
    let vm = use_access_log_view_model();
    let state = use_session().state();
    let busy = vm.busy();
    let name = move || {
        state.with(|s| {
            s.user
                .as_ref()
                .and_then(|u| u.display_name().map(str::to_string))
                .unwrap_or_default()
        })
    };

    view! {
        <div class="mt-12 md:mt-16 lg:mt-20 space-y-6">
            <div>
                <h2 class="text-2xl font-semibold text-fg">"Lab Access"</h2>
                <p class="mt-1 text-sm text-fg-muted">{name}</p>
            </div>
            <div class="flex gap-8">
                {[AccessAction::CheckIn, AccessAction::CheckOut]
                    .into_iter()
                    .map(|action| {
                        view! {
                            <Button
                                variant=ButtonVariant::Primary
                                disabled=busy
                                on:click=move |_| {
                                    vm.log_access(action);
                                }
                            >
                                {action.label()}
                            </Button>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}
