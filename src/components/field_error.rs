use leptos::prelude::*;

use crate::form::FormSessionState;

/// Validation message for one field, if the last check flagged it.
#[component]
pub fn FieldError(state: ReadSignal<FormSessionState>, field: &'static str) -> impl IntoView {
    move || {
        state
            .with(|s| s.field_error(field))
            .map(|msg| view! { <span class="field-error">{msg}</span> })
    }
}
