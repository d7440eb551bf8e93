use crate::components::{
    common::{Button, ButtonVariant},
    forms::TextField,
};
use crate::pages::admin::view_model::FilterFormState;
use leptos::{ev::MouseEvent, *};

#[component]
pub fn LogFilters(
    form: FilterFormState,
    on_search: Callback<MouseEvent>,
    on_clear: Callback<MouseEvent>,
) -> impl IntoView {
    view! {
        <div class="bg-surface-elevated p-4 rounded-lg shadow space-y-4">
            <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                <TextField id="filter-user-id" label="User ID" placeholder="Search by user ID" value=form.user_id />
                <TextField id="filter-from" label="From" input_type="date" value=form.from_date />
                <TextField id="filter-to" label="To" input_type="date" value=form.to_date />
            </div>
            <div class="flex justify-end gap-4">
                <Button variant=ButtonVariant::Outline on:click=move |ev| on_clear.call(ev)>
                    "Clear"
                </Button>
                <Button variant=ButtonVariant::Primary on:click=move |ev| on_search.call(ev)>
                    "Search"
                </Button>
            </div>
        </div>
    }
}
