use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::field_error::FieldError;
use crate::components::form_status::FormStatus;
use crate::components::password_input::PasswordInput;
use crate::form::{use_form_session, LoginDraft, LoginOperation};

#[component]
pub fn LoginPage() -> impl IntoView {
    let form = use_form_session(LoginOperation::new());
    let identifier = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());

    let navigate = use_navigate();
    form.on_success(move || navigate("/dashboard", Default::default()));

    let draft = move || LoginDraft {
        identifier: identifier.get(),
        password: password.get(),
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        form.submit(draft());
    };

    let can_submit = move || {
        !form.is_submitting() && !identifier.with(String::is_empty) && !password.with(String::is_empty)
    };

    view! {
        <div class="page auth-page login-page">
            <h2 class="page-title">"Login"</h2>
            <form class="auth-form" on:submit=on_submit>
                <div class="form-group">
                    <input
                        id="login-identifier"
                        class="input"
                        type="text"
                        placeholder="Enter Username/Email"
                        prop:value=move || identifier.get()
                        on:input=move |ev| identifier.set(event_target_value(&ev))
                    />
                    <FieldError state=form.state() field="identifier" />
                </div>
                <div class="form-group">
                    <PasswordInput id="login-password" placeholder="Enter Password" value=password />
                    <FieldError state=form.state() field="password" />
                </div>
                <button type="submit" class="btn btn-primary" disabled=move || !can_submit()>
                    {move || if form.is_submitting() { "Logging in..." } else { "Login" }}
                </button>
                <FormStatus
                    error=Signal::derive(move || form.error_message())
                    succeeded=Signal::derive(move || form.succeeded())
                />
            </form>
            <p class="auth-switch">
                "No account? " <a href="/register" class="nav-link">"Register here"</a>
            </p>
        </div>
    }
}
