use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::components::about_card::AboutCard;
use crate::components::interest_card::InterestCard;
use crate::components::site_header::SiteHeader;
use crate::components::welcome_card::WelcomeCard;
use crate::composer::{load_profile, ProfileView};
use crate::services::use_services_handle;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let services = use_services_handle();
    let (view, set_view) = signal(ProfileView::Loading);

    let reload = move || {
        let Some(services) = services.try_get_value() else {
            return;
        };
        spawn_local(async move {
            let fetched = load_profile(services.api.as_ref(), &services.session).await;
            let _ = set_view.try_set(fetched);
        });
    };

    // Fetch once on mount
    Effect::new(move |_| reload());

    let title = Signal::derive(move || {
        view.with(|v| match v {
            ProfileView::Loaded(_) => format!("@{}", v.greeting_name()),
            _ => "Profile".to_string(),
        })
    });

    view! {
        <div class="page dashboard-page">
            <SiteHeader title=title />
            <WelcomeCard view=view />
            <AboutCard view=view on_saved=Callback::new(move |_| reload()) />
            <InterestCard view=view />
        </div>
    }
}
