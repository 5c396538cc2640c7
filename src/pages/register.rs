use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::field_error::FieldError;
use crate::components::form_status::FormStatus;
use crate::components::password_input::PasswordInput;
use crate::form::{use_form_session, RegisterDraft, RegisterOperation};

#[component]
pub fn RegisterPage() -> impl IntoView {
    let form = use_form_session(RegisterOperation::new());
    let email = RwSignal::new(String::new());
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm_password = RwSignal::new(String::new());

    let navigate = use_navigate();
    form.on_success(move || navigate("/login", Default::default()));

    let draft = move || RegisterDraft {
        email: email.get(),
        username: username.get(),
        password: password.get(),
        confirm_password: confirm_password.get(),
    };

    // Re-check the confirmation as the user types it.
    let recheck = Callback::new(move |_| {
        if !confirm_password.with_untracked(String::is_empty) {
            let _ = form.check(&draft());
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        form.submit(draft());
    };

    let can_submit = move || !form.is_submitting() && draft().is_filled();

    view! {
        <div class="page auth-page register-page">
            <h2 class="page-title">"Register"</h2>
            <form class="auth-form" on:submit=on_submit>
                <div class="form-group">
                    <input
                        id="register-email"
                        class="input"
                        type="email"
                        placeholder="Enter Email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <FieldError state=form.state() field="email" />
                </div>
                <div class="form-group">
                    <input
                        id="register-username"
                        class="input"
                        type="text"
                        placeholder="Create Username"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                    <FieldError state=form.state() field="username" />
                </div>
                <div class="form-group">
                    <PasswordInput
                        id="register-password"
                        placeholder="Create Password"
                        value=password
                        on_edit=recheck
                    />
                    <FieldError state=form.state() field="password" />
                </div>
                <div class="form-group">
                    <PasswordInput
                        id="register-confirm-password"
                        placeholder="Confirm Password"
                        value=confirm_password
                        on_edit=recheck
                    />
                    <FieldError state=form.state() field="confirm_password" />
                </div>
                <button type="submit" class="btn btn-primary" disabled=move || !can_submit()>
                    {move || if form.is_submitting() { "Registering..." } else { "Register" }}
                </button>
                <FormStatus
                    error=Signal::derive(move || form.error_message())
                    succeeded=Signal::derive(move || form.succeeded())
                />
            </form>
            <p class="auth-switch">
                "Have an account? " <a href="/login" class="nav-link">"Login here"</a>
            </p>
        </div>
    }
}
