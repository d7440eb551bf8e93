use crate::api::{ApiError, StatusAction, UserProfile, UserStatus};
use crate::components::{
    common::{Button, ButtonVariant},
    empty_state::EmptyState,
    error::InlineErrorMessage,
};
use leptos::*;

fn status_badge(status: Option<UserStatus>) -> (&'static str, &'static str) {
    let class = match status {
        Some(UserStatus::Active) => "bg-status-success-bg text-status-success-text",
        Some(UserStatus::Suspended) => "bg-status-error-bg text-status-error-text",
        None => "bg-surface-muted text-fg-muted",
    };
    (status.map_or("Unknown", |status| status.label()), class)
}

#[component]
pub fn UsersTable(
    users: Resource<u32, Result<Vec<UserProfile>, ApiError>>,
    #[prop(into)] busy: Signal<bool>,
    on_status_change: Callback<(String, StatusAction)>,
) -> impl IntoView {
    view! {
        <div class="bg-surface-elevated shadow overflow-hidden sm:rounded-lg overflow-x-auto">
            <h2 class="px-6 py-4 text-lg font-semibold text-fg">"Users"</h2>
            <Suspense fallback=move || view! { <p class="p-4 text-center text-fg-muted">"Loading..."</p> }>
                {move || users.get().map(|result| match result {
                    Err(err) => view! { <InlineErrorMessage error=Signal::derive(move || Some(err.clone())) /> }.into_view(),
                    Ok(users) if users.is_empty() => view! { <EmptyState title="No users" /> }.into_view(),
                    Ok(users) => view! {
                        <table class="min-w-full divide-y divide-border">
                            <thead class="bg-surface-muted">
                                <tr>
                                    <th class="px-6 py-3 text-left text-xs font-medium text-fg-muted uppercase tracking-wider">"Name"</th>
                                    <th class="px-6 py-3 text-left text-xs font-medium text-fg-muted uppercase tracking-wider">"Email"</th>
                                    <th class="px-6 py-3 text-left text-xs font-medium text-fg-muted uppercase tracking-wider">"Role"</th>
                                    <th class="px-6 py-3 text-left text-xs font-medium text-fg-muted uppercase tracking-wider">"Status"</th>
                                    <th class="px-6 py-3 text-left text-xs font-medium text-fg-muted uppercase tracking-wider">"Actions"</th>
                                </tr>
                            </thead>
                            <tbody class="divide-y divide-border">
                                {users.into_iter().map(|user| view! {
                                    <UserRow user=user busy=busy on_status_change=on_status_change />
                                }).collect_view()}
                            </tbody>
                        </table>
                    }.into_view(),
                })}
            </Suspense>
        </div>
    }
}

#[component]
fn UserRow(
    user: UserProfile,
    busy: Signal<bool>,
    on_status_change: Callback<(String, StatusAction)>,
) -> impl IntoView {
    let (status_label, status_class) = status_badge(user.status);
    let buttons = [
        (StatusAction::Activate, ButtonVariant::Primary),
        (StatusAction::Suspend, ButtonVariant::Destructive),
    ]
    .into_iter()
    .map(|(action, variant)| {
        let user_id = user.id.clone();
        let offered = user.offers(action);
        view! {
            <Button
                variant=variant
                class="px-3 py-1"
                disabled=Signal::derive(move || busy.get() || !offered)
                on:click=move |_| on_status_change.call((user_id.clone(), action))
            >
                {action.label()}
            </Button>
        }
    })
    .collect_view();

    view! {
        <tr>
            <td class="px-6 py-4 whitespace-nowrap text-sm text-fg">{user.name.unwrap_or_default()}</td>
            <td class="px-6 py-4 whitespace-nowrap text-sm text-fg-muted">{user.email.unwrap_or_default()}</td>
            <td class="px-6 py-4 whitespace-nowrap text-sm text-fg-muted">{user.role.map(|role| role.label()).unwrap_or("-")}</td>
            <td class="px-6 py-4 whitespace-nowrap text-sm">
                <span class=format!("px-2 inline-flex text-xs leading-5 font-semibold rounded-full {status_class}")>
                    {status_label}
                </span>
            </td>
            <td class="px-6 py-4 whitespace-nowrap text-sm space-x-2">{buttons}</td>
        </tr>
    }
}
