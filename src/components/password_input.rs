use leptos::prelude::*;

/// Password box with a show/hide toggle.
#[component]
pub fn PasswordInput(
    #[prop(into)] id: String,
    #[prop(into)] placeholder: String,
    value: RwSignal<String>,
    /// Fired after each keystroke, e.g. to re-validate.
    #[prop(optional)]
    on_edit: Option<Callback<()>>,
) -> impl IntoView {
    let (visible, set_visible) = signal(false);

    view! {
        <div class="password-field">
            <input
                id=id
                class="input input-password"
                type=move || if visible.get() { "text" } else { "password" }
                placeholder=placeholder
                autocomplete="off"
                prop:value=move || value.get()
                on:input=move |ev| {
                    value.set(event_target_value(&ev));
                    if let Some(cb) = on_edit {
                        cb.run(());
                    }
                }
            />
            <button
                type="button"
                class="btn btn-link password-toggle"
                aria-label=move || if visible.get() { "Hide password" } else { "Show password" }
                on:click=move |_| set_visible.update(|v| *v = !*v)
            >
                {move || if visible.get() { "Hide" } else { "Show" }}
            </button>
        </div>
    }
}
