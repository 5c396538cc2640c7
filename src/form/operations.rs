//! The concrete forms: login, registration, About, and interests.

use async_trait::async_trait;

use super::schema::{FieldValue, FormFields, Rule, Schema};
use super::session::FormOperation;
use crate::api::{Credentials, NewAccount, ProfileApi, ProfileUpdate};
use crate::error::ApiError;
use crate::model::{InterestList, ProfileDraft, GENDER_OPTIONS};
use crate::session::{SessionStore, Token};

pub const LOGIN_FAILED: &str = "Login failed. Please try again.";
pub const REGISTER_FAILED: &str = "Registration failed. Please try again.";
pub const PROFILE_UPDATE_FAILED: &str = "Failed to update profile";
pub const INTERESTS_UPDATE_FAILED: &str = "Failed to update interests";
pub const PASSWORDS_DO_NOT_MATCH: &str = "Passwords do not match";

fn require_token(token: Option<&Token>) -> Result<&Token, ApiError> {
    token.ok_or(ApiError::Auth {
        status: 401,
        message: None,
    })
}

// -- Drafts --

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginDraft {
    pub identifier: String,
    pub password: String,
}

impl FormFields for LoginDraft {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "identifier" => FieldValue::Text(&self.identifier),
            "password" => FieldValue::Text(&self.password),
            _ => FieldValue::Missing,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterDraft {
    pub email: String,
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterDraft {
    /// Every box has something in it; the submit button stays disabled until then.
    pub fn is_filled(&self) -> bool {
        [&self.email, &self.username, &self.password, &self.confirm_password]
            .iter()
            .all(|s| !s.is_empty())
    }
}

impl FormFields for RegisterDraft {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "email" => FieldValue::Text(&self.email),
            "username" => FieldValue::Text(&self.username),
            "password" => FieldValue::Text(&self.password),
            "confirm_password" => FieldValue::Text(&self.confirm_password),
            _ => FieldValue::Missing,
        }
    }
}

impl FormFields for ProfileDraft {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "name" => FieldValue::Text(&self.name),
            "gender" => FieldValue::Text(&self.gender),
            "birthday" => FieldValue::Text(&self.birthday),
            "height" => FieldValue::Text(&self.height),
            "weight" => FieldValue::Text(&self.weight),
            _ => FieldValue::Missing,
        }
    }
}

impl FormFields for InterestList {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "interests" => FieldValue::List(self.as_slice()),
            _ => FieldValue::Missing,
        }
    }
}

// -- Operations --

/// Signs in and stores the issued token.
pub struct LoginOperation {
    schema: Schema,
}

impl LoginOperation {
    pub fn new() -> Self {
        Self {
            schema: Schema::new()
                .field("identifier", [Rule::Required("Username or email is required")])
                .field("password", [Rule::Required("Password is required")]),
        }
    }
}

impl Default for LoginOperation {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl FormOperation for LoginOperation {
    type Draft = LoginDraft;
    type Output = Token;

    fn name(&self) -> &'static str {
        "login"
    }

    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn requires_auth(&self) -> bool {
        false
    }

    fn fallback_message(&self) -> &'static str {
        LOGIN_FAILED
    }

    async fn send(
        &self,
        api: &dyn ProfileApi,
        _token: Option<&Token>,
        draft: &LoginDraft,
    ) -> Result<Token, ApiError> {
        api.login(&Credentials {
            identifier: draft.identifier.clone(),
            password: draft.password.clone(),
        })
        .await
    }

    fn on_success(&self, session: &SessionStore, token: &Token) {
        session.set_token(token);
    }
}

pub struct RegisterOperation {
    schema: Schema,
}

impl RegisterOperation {
    pub fn new() -> Self {
        Self {
            schema: Schema::new()
                .field(
                    "email",
                    [
                        Rule::Required("Email is required"),
                        Rule::Email("Enter a valid email address"),
                    ],
                )
                .field("username", [Rule::Required("Username is required")])
                .field("password", [Rule::Required("Password is required")])
                .field(
                    "confirm_password",
                    [
                        Rule::Required("Please confirm your password"),
                        Rule::Matches("password", PASSWORDS_DO_NOT_MATCH),
                    ],
                ),
        }
    }
}

impl Default for RegisterOperation {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl FormOperation for RegisterOperation {
    type Draft = RegisterDraft;
    type Output = ();

    fn name(&self) -> &'static str {
        "register"
    }

    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn requires_auth(&self) -> bool {
        false
    }

    fn fallback_message(&self) -> &'static str {
        REGISTER_FAILED
    }

    async fn send(
        &self,
        api: &dyn ProfileApi,
        _token: Option<&Token>,
        draft: &RegisterDraft,
    ) -> Result<(), ApiError> {
        api.register(&NewAccount {
            email: draft.email.trim().to_string(),
            username: draft.username.trim().to_string(),
            password: draft.password.clone(),
        })
        .await
    }
}

/// About section: display name, gender, birthday, height, weight, photo.
pub struct UpdateAboutOperation {
    schema: Schema,
}

impl UpdateAboutOperation {
    pub fn new() -> Self {
        Self {
            schema: Schema::new()
                .field("name", [Rule::Required("Name is required")])
                .field(
                    "gender",
                    [
                        Rule::Required("Gender is required"),
                        Rule::OneOf(GENDER_OPTIONS, "Select Male, Female or Other"),
                    ],
                )
                .field(
                    "birthday",
                    [
                        Rule::Required("Birthday is required"),
                        Rule::IsoDate("Birthday must be a valid date"),
                    ],
                )
                .field(
                    "height",
                    [
                        Rule::Required("Height is required"),
                        Rule::Numeric("Height must be a number"),
                    ],
                )
                .field(
                    "weight",
                    [
                        Rule::Required("Weight is required"),
                        Rule::Numeric("Weight must be a number"),
                    ],
                ),
        }
    }
}

impl Default for UpdateAboutOperation {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl FormOperation for UpdateAboutOperation {
    type Draft = ProfileDraft;
    type Output = ();

    fn name(&self) -> &'static str {
        "update-about"
    }

    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn fallback_message(&self) -> &'static str {
        PROFILE_UPDATE_FAILED
    }

    async fn send(
        &self,
        api: &dyn ProfileApi,
        token: Option<&Token>,
        draft: &ProfileDraft,
    ) -> Result<(), ApiError> {
        let mut draft = draft.clone();
        draft.name = draft.name.trim().to_string();
        draft.height = draft.height.trim().to_string();
        draft.weight = draft.weight.trim().to_string();
        api.update_profile(require_token(token)?, &ProfileUpdate::About(draft))
            .await
    }
}

/// Replaces the server's interest list with the edited one.
pub struct UpdateInterestsOperation {
    schema: Schema,
}

impl UpdateInterestsOperation {
    pub fn new() -> Self {
        Self {
            schema: Schema::new().field(
                "interests",
                [Rule::MinLength(1, "Add at least one interest")],
            ),
        }
    }
}

impl Default for UpdateInterestsOperation {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl FormOperation for UpdateInterestsOperation {
    type Draft = InterestList;
    type Output = ();

    fn name(&self) -> &'static str {
        "update-interests"
    }

    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn fallback_message(&self) -> &'static str {
        INTERESTS_UPDATE_FAILED
    }

    async fn send(
        &self,
        api: &dyn ProfileApi,
        token: Option<&Token>,
        draft: &InterestList,
    ) -> Result<(), ApiError> {
        api.update_profile(require_token(token)?, &ProfileUpdate::Interests(draft.clone()))
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::error::FormError;
    use crate::form::schema::validate;
    use crate::form::{FormSession, Phase};
    use crate::model::Profile;
    use crate::testing::{Call, StubApi};

    fn about_draft() -> ProfileDraft {
        ProfileDraft {
            name: "Alice".into(),
            gender: "Female".into(),
            birthday: "1995-08-28".into(),
            height: "170".into(),
            weight: "55".into(),
            profile_image: None,
        }
    }

    #[tokio::test]
    async fn test_login_stores_token_used_by_next_profile_fetch() {
        let api = Rc::new(StubApi::default());
        let session = SessionStore::in_memory("token");
        let form = FormSession::new(LoginOperation::new(), api.clone(), session.clone());

        let token = form
            .submit(&LoginDraft {
                identifier: "alice".into(),
                password: "secret".into(),
            })
            .await
            .unwrap();

        assert_eq!(token.as_str(), "tok123");
        assert_eq!(session.token(), Some(Token::new("tok123")));

        let stored = session.token().unwrap();
        api.get_profile(&stored).await.unwrap();
        assert_eq!(
            api.calls(),
            vec![
                Call::Login {
                    identifier: "alice".into()
                },
                Call::GetProfile {
                    token: "tok123".into()
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_login_failure_uses_fallback_and_keeps_session_empty() {
        let api = Rc::new(StubApi::default());
        api.fail_with(ApiError::Transport("offline".into()));
        let session = SessionStore::in_memory("token");
        let form = FormSession::new(LoginOperation::new(), api, session.clone());

        let result = form
            .submit(&LoginDraft {
                identifier: "alice".into(),
                password: "wrong".into(),
            })
            .await;

        assert_eq!(result, Err(FormError::Remote(LOGIN_FAILED.to_string())));
        assert!(session.token().is_none());
    }

    #[tokio::test]
    async fn test_login_rejection_surfaces_backend_message() {
        let api = Rc::new(StubApi::default());
        api.fail_with(ApiError::from_status(401, Some("Invalid credentials".into())));
        let form = FormSession::new(LoginOperation::new(), api, SessionStore::in_memory("token"));

        let result = form
            .submit(&LoginDraft {
                identifier: "alice".into(),
                password: "wrong".into(),
            })
            .await;

        assert_eq!(result, Err(FormError::Auth("Invalid credentials".into())));
        assert_eq!(form.phase(), Phase::Failed);
    }

    #[tokio::test]
    async fn test_register_password_mismatch_never_calls_network() {
        let api = Rc::new(StubApi::default());
        let form = FormSession::new(
            RegisterOperation::new(),
            api.clone(),
            SessionStore::in_memory("token"),
        );

        let result = form
            .submit(&RegisterDraft {
                email: "alice@example.com".into(),
                username: "alice".into(),
                password: "secret".into(),
                confirm_password: "secrets".into(),
            })
            .await;

        assert!(matches!(result, Err(FormError::Validation(_))));
        assert_eq!(form.state().error_message.as_deref(), Some(PASSWORDS_DO_NOT_MATCH));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_register_sends_trimmed_account() {
        let api = Rc::new(StubApi::default());
        let form = FormSession::new(
            RegisterOperation::new(),
            api.clone(),
            SessionStore::in_memory("token"),
        );

        form.submit(&RegisterDraft {
            email: "alice@example.com".into(),
            username: " alice ".into(),
            password: "secret".into(),
            confirm_password: "secret".into(),
        })
        .await
        .unwrap();

        assert_eq!(
            api.calls(),
            vec![Call::Register {
                username: "alice".into()
            }]
        );
    }

    #[test]
    fn test_register_is_filled() {
        let mut draft = RegisterDraft {
            email: "a@b.co".into(),
            username: "a".into(),
            password: "p".into(),
            confirm_password: String::new(),
        };
        assert!(!draft.is_filled());
        draft.confirm_password = "p".into();
        assert!(draft.is_filled());
    }

    #[test]
    fn test_about_schema_accepts_well_formed_draft() {
        let op = UpdateAboutOperation::new();
        assert!(validate(&about_draft(), op.schema()).is_valid());
    }

    #[test]
    fn test_about_schema_names_each_bad_field() {
        let op = UpdateAboutOperation::new();
        let draft = ProfileDraft {
            name: String::new(),
            gender: "Robot".into(),
            birthday: String::new(),
            ..about_draft()
        };
        let errors = validate(&draft, op.schema()).into_errors();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["name", "gender", "birthday"]);
        assert_eq!(errors.get("gender"), Some("Select Male, Female or Other"));
    }

    #[tokio::test]
    async fn test_about_update_sends_draft_with_token() {
        let api = Rc::new(StubApi::default());
        let session = SessionStore::in_memory("token");
        session.set_token(&Token::new("tok123"));
        let form = FormSession::new(UpdateAboutOperation::new(), api.clone(), session);

        let mut draft = about_draft();
        draft.name = "  Alice ".into();
        form.submit(&draft).await.unwrap();

        assert_eq!(
            api.calls(),
            vec![Call::UpdateProfile {
                token: "tok123".into(),
                update: ProfileUpdate::About(about_draft()),
            }]
        );
    }

    #[tokio::test]
    async fn test_about_update_without_session() {
        let api = Rc::new(StubApi::default());
        let form = FormSession::new(
            UpdateAboutOperation::new(),
            api.clone(),
            SessionStore::in_memory("token"),
        );

        let result = form.submit(&about_draft()).await;

        assert_eq!(result, Err(FormError::Auth("Authentication required".into())));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_interest_update_replaces_list() {
        let api = Rc::new(StubApi::default().with_profile(Profile::default()));
        let session = SessionStore::in_memory("token");
        session.set_token(&Token::new("tok123"));
        let form = FormSession::new(UpdateInterestsOperation::new(), api.clone(), session);

        let mut interests = InterestList::new();
        interests.add("Music");
        interests.add("Music");
        form.submit(&interests).await.unwrap();

        match &api.calls()[0] {
            Call::UpdateProfile {
                update: ProfileUpdate::Interests(sent),
                ..
            } => assert_eq!(sent.as_slice(), &["Music", "Music"]),
            other => panic!("unexpected call: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_interest_list_is_rejected_locally() {
        let api = Rc::new(StubApi::default());
        let session = SessionStore::in_memory("token");
        session.set_token(&Token::new("tok123"));
        let form = FormSession::new(UpdateInterestsOperation::new(), api.clone(), session);

        let result = form.submit(&InterestList::new()).await;

        assert!(matches!(result, Err(FormError::Validation(_))));
        assert_eq!(form.state().error_message.as_deref(), Some("Add at least one interest"));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_interest_failure_fallback() {
        let api = Rc::new(StubApi::default());
        api.fail_with(ApiError::from_status(502, None));
        let session = SessionStore::in_memory("token");
        session.set_token(&Token::new("tok123"));
        let form = FormSession::new(UpdateInterestsOperation::new(), api, session);

        let mut interests = InterestList::new();
        interests.add("Golf");

        assert_eq!(
            form.submit(&interests).await,
            Err(FormError::Remote(INTERESTS_UPDATE_FAILED.to_string()))
        );
    }
}
