use super::{
    components::{filters::LogFilters, logs_table::LogsTable, users_table::UsersTable},
    view_model::use_admin_view_model,
};
use crate::api::StatusAction;
use leptos::{ev::MouseEvent, *};

#[component]
pub fn AdminPanel() -> impl IntoView {
    let vm = use_admin_view_model();
    let on_search = Callback::new(move |_: MouseEvent| {
        vm.search();
    });
    let on_clear = Callback::new(move |_: MouseEvent| vm.clear());
    let on_status_change = Callback::new(move |(user_id, action): (String, StatusAction)| {
        vm.change_status(user_id, action);
    });
    let status_pending = vm.status_action.pending();

    view! {
        <div class="space-y-6">
            <div>
                <h1 class="text-2xl font-bold text-fg">"Admin Dashboard"</h1>
                <p class="mt-1 text-sm text-fg-muted">"Review lab access and manage user status."</p>
            </div>
            <LogFilters form=vm.filter_form on_search=on_search on_clear=on_clear />
            <LogsTable rows=vm.filtered_logs() />
            <UsersTable
                users=vm.users_resource
                busy=status_pending
                on_status_change=on_status_change
            />
        </div>
    }
}
