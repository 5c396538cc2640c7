//! In-memory `ProfileApi` for controller and composer tests.

use std::cell::RefCell;

use async_trait::async_trait;

use crate::api::{Credentials, NewAccount, ProfileApi, ProfileUpdate};
use crate::error::ApiError;
use crate::model::Profile;
use crate::session::Token;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Login { identifier: String },
    Register { username: String },
    GetProfile { token: String },
    UpdateProfile { token: String, update: ProfileUpdate },
}

pub struct StubApi {
    calls: RefCell<Vec<Call>>,
    failure: RefCell<Option<ApiError>>,
    issued_token: String,
    profile: RefCell<Profile>,
    yield_once: bool,
}

impl Default for StubApi {
    fn default() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            failure: RefCell::new(None),
            issued_token: "tok123".to_string(),
            profile: RefCell::new(Profile::default()),
            yield_once: false,
        }
    }
}

impl StubApi {
    /// Suspend once inside every call so concurrent submits can interleave.
    pub fn yielding(mut self) -> Self {
        self.yield_once = true;
        self
    }

    pub fn with_profile(self, profile: Profile) -> Self {
        *self.profile.borrow_mut() = profile;
        self
    }

    pub fn fail_with(&self, err: ApiError) {
        *self.failure.borrow_mut() = Some(err);
    }

    pub fn succeed(&self) {
        *self.failure.borrow_mut() = None;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    async fn record(&self, call: Call) -> Result<(), ApiError> {
        self.calls.borrow_mut().push(call);
        if self.yield_once {
            tokio::task::yield_now().await;
        }
        match self.failure.borrow().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait(?Send)]
impl ProfileApi for StubApi {
    async fn login(&self, credentials: &Credentials) -> Result<Token, ApiError> {
        self.record(Call::Login {
            identifier: credentials.identifier.clone(),
        })
        .await?;
        Ok(Token::new(self.issued_token.clone()))
    }

    async fn register(&self, account: &NewAccount) -> Result<(), ApiError> {
        self.record(Call::Register {
            username: account.username.clone(),
        })
        .await
    }

    async fn get_profile(&self, token: &Token) -> Result<Profile, ApiError> {
        self.record(Call::GetProfile {
            token: token.as_str().to_string(),
        })
        .await?;
        Ok(self.profile.borrow().clone())
    }

    async fn update_profile(&self, token: &Token, update: &ProfileUpdate) -> Result<(), ApiError> {
        self.record(Call::UpdateProfile {
            token: token.as_str().to_string(),
            update: update.clone(),
        })
        .await
    }
}
