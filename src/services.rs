//! Application-wide services handed to components through context.
//!
//! The API client and session store hold `Rc`s, so they live in a
//! `StoredValue` with local storage; the handle itself is `Copy`.

use std::rc::Rc;
use std::time::Duration;

use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::api::{HttpProfileClient, ProfileApi};
use crate::config::AppConfig;
use crate::session::SessionStore;

#[derive(Clone)]
pub struct AppServices {
    pub config: AppConfig,
    pub api: Rc<dyn ProfileApi>,
    pub session: SessionStore,
}

impl AppServices {
    /// Services for the running browser app.
    pub fn for_browser(config: AppConfig) -> Self {
        let api = Rc::new(HttpProfileClient::new(config.api_base_url.clone()));
        let session = SessionStore::browser(&config.token_key);
        Self {
            config,
            api,
            session,
        }
    }
}

/// `Copy` handle for closures that must not capture the `Rc`s directly.
pub type ServicesHandle = StoredValue<AppServices, LocalStorage>;

pub fn provide_services(services: AppServices) {
    provide_context::<ServicesHandle>(StoredValue::new_local(services));
}

pub fn use_services_handle() -> ServicesHandle {
    expect_context::<ServicesHandle>()
}

pub fn use_services() -> AppServices {
    use_services_handle().get_value()
}

/// Run `action` once after `delay` on the browser event loop.
pub fn run_after(delay: Duration, action: impl FnOnce() + 'static) {
    let Some(window) = web_sys::window() else {
        action();
        return;
    };

    // The JS function frees itself after its single call.
    let callback = wasm_bindgen::closure::Closure::once_into_js(action);
    let scheduled = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        callback.unchecked_ref(),
        delay.as_millis().min(i32::MAX as u128) as i32,
    );
    if scheduled.is_err() {
        tracing::warn!("Failed to schedule delayed action");
    }
}
