//! One form's lifecycle: validate, submit, settle.
//!
//! ```text
//! Idle ──submit──▶ Submitting ──2xx──────────▶ Succeeded
//!                      │                          │
//!                      └──error──▶ Failed ◀───────┘ (next submit / reset)
//! ```
//!
//! The phase flips to `Submitting` before the first await point, so a second
//! click that lands while a call is in flight sees it and is turned away.

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::schema::{validate, FieldErrors, FormFields, Schema, ValidationResult};
use crate::api::ProfileApi;
use crate::error::{ApiError, FormError};
use crate::session::{SessionStore, Token};

pub const AUTH_REQUIRED_MESSAGE: &str = "Authentication required";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSessionState {
    pub phase: Phase,
    pub error_message: Option<String>,
    pub field_errors: FieldErrors,
}

impl FormSessionState {
    pub fn is_submitting(&self) -> bool {
        self.phase == Phase::Submitting
    }

    pub fn succeeded(&self) -> bool {
        self.phase == Phase::Succeeded
    }

    pub fn field_error(&self, field: &str) -> Option<String> {
        self.field_errors.get(field).map(str::to_string)
    }
}

/// What a form submits and where: its schema, the remote call, and the
/// message shown when the backend gives no reason.
#[async_trait(?Send)]
pub trait FormOperation {
    type Draft: FormFields;
    type Output;

    /// Short label for logs.
    fn name(&self) -> &'static str;

    fn schema(&self) -> &Schema;

    /// Whether a session token must be present before anything is sent.
    fn requires_auth(&self) -> bool {
        true
    }

    fn fallback_message(&self) -> &'static str;

    /// Perform the remote call. `token` is `Some` whenever `requires_auth` is true.
    async fn send(
        &self,
        api: &dyn ProfileApi,
        token: Option<&Token>,
        draft: &Self::Draft,
    ) -> Result<Self::Output, ApiError>;

    /// Runs after a successful call, before the phase becomes `Succeeded`.
    fn on_success(&self, _session: &SessionStore, _output: &Self::Output) {}
}

type StateListener = Rc<dyn Fn(&FormSessionState)>;
type SuccessHook = Rc<dyn Fn()>;

struct Inner<F: FormOperation> {
    operation: F,
    api: Rc<dyn ProfileApi>,
    session: SessionStore,
    state: RefCell<FormSessionState>,
    listener: RefCell<Option<StateListener>>,
    after_success: RefCell<Option<SuccessHook>>,
}

/// Controller for one form instance. Clones share state, so two event
/// handlers holding clones still get single-flight behaviour.
pub struct FormSession<F: FormOperation> {
    inner: Rc<Inner<F>>,
}

impl<F: FormOperation> Clone for FormSession<F> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<F: FormOperation> FormSession<F> {
    pub fn new(operation: F, api: Rc<dyn ProfileApi>, session: SessionStore) -> Self {
        Self {
            inner: Rc::new(Inner {
                operation,
                api,
                session,
                state: RefCell::new(FormSessionState::default()),
                listener: RefCell::new(None),
                after_success: RefCell::new(None),
            }),
        }
    }

    /// Called with a snapshot after every state change.
    pub fn on_change(&self, listener: impl Fn(&FormSessionState) + 'static) {
        *self.inner.listener.borrow_mut() = Some(Rc::new(listener));
    }

    /// Called once per successful submit, after the phase is `Succeeded`.
    /// Any delay before navigating belongs to the callback.
    pub fn on_success(&self, hook: impl Fn() + 'static) {
        *self.inner.after_success.borrow_mut() = Some(Rc::new(hook));
    }

    pub fn state(&self) -> FormSessionState {
        self.inner.state.borrow().clone()
    }

    pub fn phase(&self) -> Phase {
        self.inner.state.borrow().phase
    }

    /// Pure check, publishes nothing.
    pub fn is_valid(&self, draft: &F::Draft) -> bool {
        validate(draft, self.inner.operation.schema()).is_valid()
    }

    /// Validate without submitting and publish the field errors.
    /// Leaves the phase alone. After a local validation failure the banner
    /// follows the remaining errors, so it clears once the draft is fixed.
    pub fn check(&self, draft: &F::Draft) -> ValidationResult {
        let result = validate(draft, self.inner.operation.schema());
        let errors = result.clone().into_errors();
        self.update(|state| {
            let failed_locally = state.phase == Phase::Failed && !state.field_errors.is_empty();
            if failed_locally {
                state.error_message = errors.first_message().map(str::to_string);
            }
            state.field_errors = errors;
        });
        result
    }

    /// Back to `Idle`. Ignored while a submission is in flight.
    pub fn reset(&self) {
        if self.phase() == Phase::Submitting {
            debug!("{}: reset ignored while submitting", self.inner.operation.name());
            return;
        }
        self.update(|state| *state = FormSessionState::default());
    }

    pub async fn submit(&self, draft: &F::Draft) -> Result<F::Output, FormError> {
        let inner = &*self.inner;
        let name = inner.operation.name();

        if self.phase() == Phase::Submitting {
            debug!("{}: submit ignored, request already in flight", name);
            return Err(FormError::Busy);
        }

        if let ValidationResult::Invalid(errors) = validate(draft, inner.operation.schema()) {
            debug!("{}: {} invalid field(s)", name, errors.len());
            let message = errors.first_message().map(str::to_string);
            let published = errors.clone();
            self.update(|state| {
                state.phase = Phase::Failed;
                state.error_message = message;
                state.field_errors = published;
            });
            return Err(FormError::Validation(errors));
        }

        let token = inner.session.token();
        if inner.operation.requires_auth() && token.is_none() {
            warn!("{}: no session token, not submitting", name);
            self.fail(AUTH_REQUIRED_MESSAGE.to_string());
            return Err(FormError::Auth(AUTH_REQUIRED_MESSAGE.to_string()));
        }

        self.update(|state| {
            state.phase = Phase::Submitting;
            state.error_message = None;
            state.field_errors = FieldErrors::default();
        });

        match inner
            .operation
            .send(inner.api.as_ref(), token.as_ref(), draft)
            .await
        {
            Ok(output) => {
                info!("{}: succeeded", name);
                inner.operation.on_success(&inner.session, &output);
                self.update(|state| {
                    state.phase = Phase::Succeeded;
                    state.error_message = None;
                });
                let hook = inner.after_success.borrow().clone();
                if let Some(hook) = hook {
                    hook();
                }
                Ok(output)
            }
            Err(err) => {
                warn!("{}: failed: {}", name, err);
                let rejected = err.is_auth_rejection();
                if rejected && inner.operation.requires_auth() {
                    inner.session.clear_token();
                }
                let message = err
                    .server_message()
                    .map(str::to_string)
                    .unwrap_or_else(|| inner.operation.fallback_message().to_string());
                self.fail(message.clone());
                if rejected {
                    Err(FormError::Auth(message))
                } else {
                    Err(FormError::Remote(message))
                }
            }
        }
    }

    fn fail(&self, message: String) {
        self.update(|state| {
            state.phase = Phase::Failed;
            state.error_message = Some(message);
        });
    }

    fn update(&self, apply: impl FnOnce(&mut FormSessionState)) {
        let snapshot = {
            let mut state = self.inner.state.borrow_mut();
            apply(&mut state);
            state.clone()
        };
        let listener = self.inner.listener.borrow().clone();
        if let Some(listener) = listener {
            listener(&snapshot);
        }
    }
}
