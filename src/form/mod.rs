//! Form handling shared by every screen: schema validation, the submit state
//! machine, and the concrete operations bound to the remote API.

pub mod operations;
pub mod reactive;
pub mod schema;
pub mod session;

pub use operations::{
    LoginDraft, LoginOperation, RegisterDraft, RegisterOperation, UpdateAboutOperation,
    UpdateInterestsOperation,
};
pub use reactive::{use_form_session, FormHandle};
pub use schema::{validate, FieldErrors, FieldValue, FormFields, Rule, Schema, ValidationResult};
pub use session::{FormOperation, FormSession, FormSessionState, Phase, AUTH_REQUIRED_MESSAGE};
