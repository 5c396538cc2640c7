use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use wasm_bindgen_futures::spawn_local;

use crate::components::form_status::FormStatus;
use crate::components::interest_editor::InterestEditor;
use crate::composer::load_profile;
use crate::form::{use_form_session, UpdateInterestsOperation};
use crate::model::InterestList;
use crate::services::{run_after, use_services, use_services_handle};

#[component]
pub fn InterestPage() -> impl IntoView {
    let services = use_services_handle();
    let settle_delay = use_services().config.settle_delay;
    let form = use_form_session(UpdateInterestsOperation::new());
    let interests = RwSignal::new(InterestList::new());

    let navigate = use_navigate();
    form.on_success(move || {
        let navigate = navigate.clone();
        run_after(settle_delay, move || navigate("/dashboard", Default::default()));
    });

    // Saving replaces the whole list, so start from what is stored.
    Effect::new(move |_| {
        let Some(services) = services.try_get_value() else {
            return;
        };
        spawn_local(async move {
            let view = load_profile(services.api.as_ref(), &services.session).await;
            let current = view.interests();
            if !current.is_empty() {
                let _ = interests.try_update(|list| {
                    if list.is_empty() {
                        *list = InterestList::from(current);
                    }
                });
            }
        });
    });

    let save = move |_| form.submit(interests.get_untracked());

    let can_save = move || !form.is_submitting() && !interests.with(InterestList::is_empty);

    view! {
        <div class="page interest-page">
            <a href="/dashboard" class="nav-link back-link">"< Back"</a>
            <p class="interest-kicker">"Tell everyone about yourself"</p>
            <h2 class="page-title">"What interest you?"</h2>
            <InterestEditor interests=interests />
            <button type="button" class="btn btn-primary" on:click=save disabled=move || !can_save()>
                {move || if form.is_submitting() { "Saving..." } else { "Save" }}
            </button>
            <FormStatus
                error=Signal::derive(move || form.error_message())
                succeeded=Signal::derive(move || form.succeeded())
                success_text="Interests updated successfully!"
            />
        </div>
    }
}
