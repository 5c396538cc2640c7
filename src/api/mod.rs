//! Typed access to the remote profile service.
//!
//! Each method maps to exactly one HTTP call. There are no retries and no
//! timeouts beyond what the transport does by default.

mod http;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::ApiError;
use crate::model::{InterestList, Profile, ProfileDraft};
use crate::session::Token;

pub use http::{HttpProfileClient, ACCESS_TOKEN_HEADER};

/// Login credentials. `identifier` is whatever the user typed in the
/// "Username/Email" box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub identifier: String,
    pub password: String,
}

/// Registration payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewAccount {
    pub email: String,
    pub username: String,
    pub password: String,
}

/// Body of an `updateProfile` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileUpdate {
    /// About section. Sent as multipart when a photo is attached.
    About(ProfileDraft),
    /// Replaces the whole interest list.
    Interests(InterestList),
}

#[async_trait(?Send)]
pub trait ProfileApi {
    async fn login(&self, credentials: &Credentials) -> Result<Token, ApiError>;

    async fn register(&self, account: &NewAccount) -> Result<(), ApiError>;

    async fn get_profile(&self, token: &Token) -> Result<Profile, ApiError>;

    async fn update_profile(&self, token: &Token, update: &ProfileUpdate) -> Result<(), ApiError>;
}
