use leptos::prelude::*;

use crate::components::about_fields::AboutFields;
use crate::components::form_status::FormStatus;
use crate::composer::{ProfileView, ABOUT_PLACEHOLDER};
use crate::form::{use_form_session, UpdateAboutOperation};
use crate::model::ProfileDraft;
use crate::services::{run_after, use_services};

/// Dashboard About section. Viewing shows the formatted rows; editing
/// swaps in the form and collapses again once a save settles.
#[component]
pub fn AboutCard(
    view: ReadSignal<ProfileView>,
    /// Called after a save so the dashboard can refetch.
    on_saved: Callback<()>,
) -> impl IntoView {
    let settle_delay = use_services().config.settle_delay;
    let form = use_form_session(UpdateAboutOperation::new());
    let (editing, set_editing) = signal(false);
    let draft = RwSignal::new(ProfileDraft::default());

    form.on_success(move || {
        run_after(settle_delay, move || {
            let _ = set_editing.try_set(false);
            on_saved.run(());
        });
    });

    let begin_edit = move |_| {
        draft.set(view.with_untracked(|v| v.edit_draft()));
        form.reset();
        set_editing.set(true);
    };

    // Leaving edit mode drops whatever was typed.
    let cancel = move |_| {
        set_editing.set(false);
        draft.set(ProfileDraft::default());
        form.reset();
    };

    let save = move |_| form.submit(draft.get_untracked());

    let can_save = move || !form.is_submitting() && draft.with(|d| form.is_valid(d));

    view! {
        <section class="card about-card">
            <div class="card-header">
                <h3 class="card-title">"About"</h3>
                <Show
                    when=move || editing.get()
                    fallback=move || view! {
                        <button type="button" class="btn btn-link" on:click=begin_edit>
                            "Edit"
                        </button>
                    }
                >
                    <button type="button" class="btn btn-link" on:click=cancel>
                        "Cancel"
                    </button>
                    <button
                        type="button"
                        class="btn btn-save"
                        on:click=save
                        disabled=move || !can_save()
                    >
                        {move || if form.is_submitting() { "Saving..." } else { "Save & Update" }}
                    </button>
                </Show>
            </div>

            <Show
                when=move || editing.get()
                fallback=move || view! { <AboutSummary view=view /> }
            >
                <AboutFields draft=draft form=form />
            </Show>

            <FormStatus
                error=Signal::derive(move || form.error_message())
                succeeded=Signal::derive(move || form.succeeded())
                success_text="Profile updated successfully!"
            />
        </section>
    }
}

#[component]
fn AboutSummary(view: ReadSignal<ProfileView>) -> impl IntoView {
    move || match view.with(|v| v.about_rows()) {
        Some(rows) => view! {
            <dl class="about-rows">
                {rows
                    .into_iter()
                    .map(|row| view! {
                        <div class="about-row">
                            <dt>{format!("{}:", row.label)}</dt>
                            <dd>{row.value}</dd>
                        </div>
                    })
                    .collect_view()}
            </dl>
        }
            .into_any(),
        None => view! { <p class="card-placeholder">{ABOUT_PLACEHOLDER}</p> }.into_any(),
    }
}
