use leptos::prelude::*;
use leptos_router::components::*;
use leptos_router::path;

use crate::config::AppConfig;
use crate::pages::about::AboutPage;
use crate::pages::dashboard::DashboardPage;
use crate::pages::interest::InterestPage;
use crate::pages::login::LoginPage;
use crate::pages::register::RegisterPage;
use crate::services::{provide_services, use_services, AppServices};

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    provide_services(AppServices::for_browser(config));

    view! {
        <Router>
            <div class="app-layout">
                <main class="content">
                    <Routes fallback=|| view! { <p class="not-found">"Page not found"</p> }>
                        <Route path=path!("/") view=EntryRedirect />
                        <Route path=path!("/login") view=LoginPage />
                        <Route path=path!("/register") view=RegisterPage />
                        <Route path=path!("/about") view=AboutPage />
                        <Route path=path!("/interest") view=InterestPage />
                        <Route path=path!("/dashboard") view=DashboardPage />
                    </Routes>
                </main>
            </div>
        </Router>
    }
}

/// `/` sends signed-in users to the dashboard and everyone else to login.
#[component]
fn EntryRedirect() -> impl IntoView {
    let target = if use_services().session.is_authenticated() {
        "/dashboard"
    } else {
        "/login"
    };
    view! { <Redirect path=target /> }
}
