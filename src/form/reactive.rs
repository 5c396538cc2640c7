//! Leptos binding for `FormSession`: mirrors controller state into a signal
//! so views can disable buttons and show messages.

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use super::schema::ValidationResult;
use super::session::{FormOperation, FormSession, FormSessionState};
use crate::services::use_services;

pub struct FormHandle<F: FormOperation + 'static> {
    controller: StoredValue<FormSession<F>, LocalStorage>,
    state: ReadSignal<FormSessionState>,
}

impl<F: FormOperation + 'static> Clone for FormHandle<F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F: FormOperation + 'static> Copy for FormHandle<F> {}

/// Create a controller for `operation` wired to the app's API client and session.
pub fn use_form_session<F: FormOperation + 'static>(operation: F) -> FormHandle<F> {
    let services = use_services();
    let controller = FormSession::new(operation, services.api.clone(), services.session.clone());

    let (state, set_state) = signal(FormSessionState::default());
    // The component may be gone by the time a response lands.
    controller.on_change(move |snapshot| {
        let _ = set_state.try_set(snapshot.clone());
    });

    FormHandle {
        controller: StoredValue::new_local(controller),
        state,
    }
}

impl<F: FormOperation + 'static> FormHandle<F> {
    pub fn state(&self) -> ReadSignal<FormSessionState> {
        self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.state.with(|s| s.is_submitting())
    }

    pub fn succeeded(&self) -> bool {
        self.state.with(|s| s.succeeded())
    }

    pub fn error_message(&self) -> Option<String> {
        self.state.with(|s| s.error_message.clone())
    }

    pub fn field_error(&self, field: &'static str) -> Option<String> {
        self.state.with(|s| s.field_error(field))
    }

    /// Register the post-success effect (navigate, collapse, refetch).
    pub fn on_success(&self, hook: impl Fn() + 'static) {
        self.controller.with_value(|c| c.on_success(hook));
    }

    pub fn is_valid(&self, draft: &F::Draft) -> bool {
        self.controller
            .try_with_value(|c| c.is_valid(draft))
            .unwrap_or(false)
    }

    pub fn check(&self, draft: &F::Draft) -> ValidationResult {
        self.controller.with_value(|c| c.check(draft))
    }

    pub fn reset(&self) {
        self.controller.with_value(|c| c.reset());
    }

    /// Fire-and-forget submit. The controller drops duplicates while a call is in flight.
    pub fn submit(&self, draft: F::Draft)
    where
        F::Draft: 'static,
    {
        let Some(controller) = self.controller.try_get_value() else {
            return;
        };
        spawn_local(async move {
            let _ = controller.submit(&draft).await;
        });
    }
}
