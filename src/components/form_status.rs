use leptos::prelude::*;

/// Inline error or success line under a form.
#[component]
pub fn FormStatus(
    #[prop(into)] error: Signal<Option<String>>,
    #[prop(into)] succeeded: Signal<bool>,
    /// Shown after a successful submit. Nothing is shown when absent.
    #[prop(optional, into)]
    success_text: Option<String>,
) -> impl IntoView {
    view! {
        <div class="form-status" role="status">
            {move || {
                if let Some(err) = error.get() {
                    view! { <p class="status-text status-error">{err}</p> }.into_any()
                } else if succeeded.get() && success_text.is_some() {
                    let text = success_text.clone().unwrap_or_default();
                    view! { <p class="status-text status-saved">{text}</p> }.into_any()
                } else {
                    ().into_any()
                }
            }}
        </div>
    }
}
