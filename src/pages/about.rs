use leptos::prelude::*;

use crate::components::about_fields::AboutFields;
use crate::components::form_status::FormStatus;
use crate::form::{use_form_session, UpdateAboutOperation};
use crate::model::ProfileDraft;

/// Standalone About form.
#[component]
pub fn AboutPage() -> impl IntoView {
    let form = use_form_session(UpdateAboutOperation::new());
    let draft = RwSignal::new(ProfileDraft::default());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        form.submit(draft.get_untracked());
    };

    let can_submit = move || !form.is_submitting() && draft.with(|d| form.is_valid(d));

    view! {
        <div class="page about-page">
            <h2 class="page-title">"About"</h2>
            <form class="about-form" on:submit=on_submit>
                <AboutFields draft=draft form=form with_photo=false />
                <button type="submit" class="btn btn-primary" disabled=move || !can_submit()>
                    {move || if form.is_submitting() { "Saving..." } else { "Save" }}
                </button>
                <FormStatus
                    error=Signal::derive(move || form.error_message())
                    succeeded=Signal::derive(move || form.succeeded())
                    success_text="Profile updated successfully!"
                />
            </form>
        </div>
    }
}
