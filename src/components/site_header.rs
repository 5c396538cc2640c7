use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::services::use_services_handle;

#[component]
pub fn SiteHeader(#[prop(into)] title: Signal<String>) -> impl IntoView {
    let services = use_services_handle();
    let navigate = use_navigate();

    let logout = move |_| {
        if let Some(services) = services.try_get_value() {
            services.session.clear_token();
            tracing::info!("Signed out");
        }
        navigate("/login", Default::default());
    };

    view! {
        <header class="site-header">
            <h1 class="site-title">{move || title.get()}</h1>
            <button type="button" class="btn btn-secondary btn-logout" on:click=logout>
                "Logout"
            </button>
        </header>
    }
}
