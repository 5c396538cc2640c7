use leptos::prelude::*;

use crate::composer::{ProfileView, INTEREST_PLACEHOLDER};

#[component]
pub fn InterestCard(view: ReadSignal<ProfileView>) -> impl IntoView {
    view! {
        <section class="card interest-card">
            <div class="card-header">
                <h3 class="card-title">"Interest"</h3>
                <a href="/interest" class="btn btn-link" aria-label="Edit interests">"Edit"</a>
            </div>
            {move || {
                let interests = view.with(|v| v.interests());
                if interests.is_empty() {
                    view! { <p class="card-placeholder">{INTEREST_PLACEHOLDER}</p> }.into_any()
                } else {
                    view! {
                        <ul class="tag-list">
                            {interests
                                .into_iter()
                                .map(|tag| view! { <li class="tag">{tag}</li> })
                                .collect_view()}
                        </ul>
                    }
                        .into_any()
                }
            }}
        </section>
    }
}
