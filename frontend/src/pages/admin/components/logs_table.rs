use crate::api::{AccessAction, AccessLogEntry, ApiError};
use crate::components::{empty_state::EmptyState, error::InlineErrorMessage};
use crate::utils::time;
use leptos::*;

fn action_badge_class(action: AccessAction) -> &'static str {
    match action {
        AccessAction::CheckIn => "bg-status-success-bg text-status-success-text",
        AccessAction::CheckOut => "bg-status-neutral-bg text-status-neutral-text",
    }
}

#[component]
pub fn ActionBadge(action: AccessAction) -> impl IntoView {
    view! {
        <span class=format!("px-2 inline-flex text-xs leading-5 font-semibold rounded-full {}", action_badge_class(action))>
            {action.label()}
        </span>
    }
}

#[component]
pub fn LogsTable(
    #[prop(into)] rows: Signal<Option<Result<Vec<AccessLogEntry>, ApiError>>>,
) -> impl IntoView {
    view! {
        <div class="bg-surface-elevated shadow overflow-hidden sm:rounded-lg overflow-x-auto">
            <h2 class="px-6 py-4 text-lg font-semibold text-fg">"Access Logs"</h2>
            <Suspense fallback=move || view! { <p class="p-4 text-center text-fg-muted">"Loading..."</p> }>
                {move || rows.get().map(|result| match result {
                    Err(err) => view! { <InlineErrorMessage error=Signal::derive(move || Some(err.clone())) /> }.into_view(),
                    Ok(logs) if logs.is_empty() => view! {
                        <EmptyState title="No access logs" description="No entries match the current search." />
                    }.into_view(),
                    Ok(logs) => view! {
                        <table class="min-w-full divide-y divide-border">
                            <thead class="bg-surface-muted">
                                <tr>
                                    <th class="px-6 py-3 text-left text-xs font-medium text-fg-muted uppercase tracking-wider">"User ID"</th>
                                    <th class="px-6 py-3 text-left text-xs font-medium text-fg-muted uppercase tracking-wider">"Timestamp"</th>
                                    <th class="px-6 py-3 text-left text-xs font-medium text-fg-muted uppercase tracking-wider">"Action"</th>
                                </tr>
                            </thead>
                            <tbody class="divide-y divide-border">
                                {logs.into_iter().map(|entry| view! {
                                    <tr>
                                        <td class="px-6 py-4 whitespace-nowrap text-sm font-mono text-fg">{entry.user_id}</td>
                                        <td class="px-6 py-4 whitespace-nowrap text-sm text-fg-muted">{time::format_local(&entry.timestamp)}</td>
                                        <td class="px-6 py-4 whitespace-nowrap text-sm"><ActionBadge action=entry.action /></td>
                                    </tr>
                                }).collect_view()}
                            </tbody>
                        </table>
                    }.into_view(),
                })}
            </Suspense>
        </div>
    }
}
