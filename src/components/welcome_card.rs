use leptos::prelude::*;

use crate::composer::ProfileView;

#[component]
pub fn WelcomeCard(view: ReadSignal<ProfileView>) -> impl IntoView {
    let details = move || {
        view.with(|v| {
            v.profile().map(|p| {
                [p.gender.clone(), p.horoscope.clone(), p.zodiac.clone()]
                    .into_iter()
                    .flatten()
                    .filter(|s| !s.is_empty() && s != "Error")
                    .collect::<Vec<_>>()
                    .join(" · ")
            })
        })
    };

    view! {
        <section class="card welcome-card">
            <h2 class="welcome-title">
                {move || format!("Welcome back @{}!", view.with(|v| v.greeting_name()))}
            </h2>
            {move || details().filter(|d| !d.is_empty()).map(|d| view! { <p class="welcome-detail">{d}</p> })}
        </section>
    }
}
