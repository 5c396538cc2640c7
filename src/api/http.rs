use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{Credentials, NewAccount, ProfileApi, ProfileUpdate};
use crate::error::ApiError;
use crate::model::{Profile, ProfileDraft};
use crate::session::Token;

/// Header carrying the session token on authenticated calls.
pub const ACCESS_TOKEN_HEADER: &str = "x-access-token";

/// `ProfileApi` over HTTP. Works in the browser (fetch) and natively.
#[derive(Clone)]
pub struct HttpProfileClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpProfileClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

// -- Wire formats --

#[derive(Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    #[serde(default)]
    access_token: Option<String>,
}

#[derive(Serialize)]
struct AboutBody<'a> {
    name: &'a str,
    gender: &'a str,
    birthday: &'a str,
    height: &'a str,
    weight: &'a str,
}

impl<'a> From<&'a ProfileDraft> for AboutBody<'a> {
    fn from(draft: &'a ProfileDraft) -> Self {
        Self {
            name: &draft.name,
            gender: &draft.gender,
            birthday: &draft.birthday,
            height: &draft.height,
            weight: &draft.weight,
        }
    }
}

#[derive(Serialize)]
struct InterestsBody<'a> {
    interests: &'a [String],
}

#[derive(Deserialize)]
struct ProfileEnvelope {
    #[serde(default)]
    data: Option<Profile>,
    #[serde(default)]
    username: Option<String>,
}

impl ProfileEnvelope {
    fn into_profile(self) -> Profile {
        let mut profile = self.data.unwrap_or_default();
        if profile.username.is_none() {
            profile.username = self.username;
        }
        profile
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<ErrorMessage>,
}

/// Validation failures come back as a list of messages, everything else as one.
#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorMessage {
    One(String),
    Many(Vec<String>),
}

/// Pull the `message` field out of an error body. Blank messages count as absent.
pub(crate) fn parse_error_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    let message = match parsed.message? {
        ErrorMessage::One(text) => text,
        ErrorMessage::Many(items) => items
            .into_iter()
            .filter(|s| !s.trim().is_empty())
            .collect::<Vec<_>>()
            .join(", "),
    };
    if message.trim().is_empty() {
        None
    } else {
        Some(message)
    }
}

/// Turn a non-2xx response into an `ApiError`, passing 2xx through.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = parse_error_message(&body);
    warn!(
        "Request failed with {} {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown")
    );
    Err(ApiError::from_status(status.as_u16(), message))
}

fn about_multipart(draft: &ProfileDraft) -> Result<Form, ApiError> {
    let mut form = Form::new()
        .text("name", draft.name.clone())
        .text("gender", draft.gender.clone())
        .text("birthday", draft.birthday.clone())
        .text("height", draft.height.clone())
        .text("weight", draft.weight.clone());

    if let Some(image) = &draft.profile_image {
        let part = Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(image.content_type())
            .map_err(|e| ApiError::Transport(format!("Invalid image type '{}': {}", image.content_type(), e)))?;
        form = form.part("profileImage", part);
    }

    Ok(form)
}

#[async_trait(?Send)]
impl ProfileApi for HttpProfileClient {
    async fn login(&self, credentials: &Credentials) -> Result<Token, ApiError> {
        info!("Logging in");
        let body = LoginBody {
            email: "",
            username: &credentials.identifier,
            password: &credentials.password,
        };

        let response = self
            .client
            .post(self.endpoint("login"))
            .json(&body)
            .send()
            .await?;
        let response = check_status(response).await?;

        let parsed: LoginResponse = response.json().await?;
        parsed
            .access_token
            .filter(|t| !t.is_empty())
            .map(Token::new)
            .ok_or_else(|| ApiError::Decode("login response did not include an access token".to_string()))
    }

    async fn register(&self, account: &NewAccount) -> Result<(), ApiError> {
        info!("Registering account '{}'", account.username);
        let response = self
            .client
            .post(self.endpoint("register"))
            .json(account)
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    async fn get_profile(&self, token: &Token) -> Result<Profile, ApiError> {
        debug!("Fetching profile");
        let response = self
            .client
            .get(self.endpoint("getProfile"))
            .header(ACCESS_TOKEN_HEADER, token.as_str())
            .send()
            .await?;
        let response = check_status(response).await?;

        let envelope: ProfileEnvelope = response.json().await?;
        Ok(envelope.into_profile())
    }

    async fn update_profile(&self, token: &Token, update: &ProfileUpdate) -> Result<(), ApiError> {
        let request = self
            .client
            .put(self.endpoint("updateProfile"))
            .header(ACCESS_TOKEN_HEADER, token.as_str());

        let request = match update {
            ProfileUpdate::About(draft) if draft.profile_image.is_some() => {
                info!("Updating profile with photo");
                request.multipart(about_multipart(draft)?)
            }
            ProfileUpdate::About(draft) => {
                info!("Updating profile");
                request.json(&AboutBody::from(draft))
            }
            ProfileUpdate::Interests(interests) => {
                info!("Updating {} interests", interests.len());
                request.json(&InterestsBody {
                    interests: interests.as_slice(),
                })
            }
        };

        let response = request.send().await?;
        check_status(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_message() {
        assert_eq!(
            parse_error_message(r#"{"message":"Invalid credentials","statusCode":401}"#),
            Some("Invalid credentials".to_string())
        );
    }

    #[test]
    fn test_parse_message_list() {
        let body = r#"{"message":["email must be an email","password too short"],"error":"Bad Request"}"#;
        assert_eq!(
            parse_error_message(body),
            Some("email must be an email, password too short".to_string())
        );
    }

    #[test]
    fn test_parse_missing_or_blank_message() {
        assert_eq!(parse_error_message(r#"{"statusCode":500}"#), None);
        assert_eq!(parse_error_message(r#"{"message":""}"#), None);
        assert_eq!(parse_error_message(r#"{"message":[]}"#), None);
        assert_eq!(parse_error_message("<html>Bad gateway</html>"), None);
        assert_eq!(parse_error_message(""), None);
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let client = HttpProfileClient::new("http://localhost:8080/api/");
        assert_eq!(client.base_url(), "http://localhost:8080/api");
        assert_eq!(client.endpoint("login"), "http://localhost:8080/api/login");
    }

    #[test]
    fn test_envelope_falls_back_to_top_level_username() {
        let envelope: ProfileEnvelope = serde_json::from_str(r#"{"username":"carol"}"#).unwrap();
        let profile = envelope.into_profile();
        assert_eq!(profile.username.as_deref(), Some("carol"));

        let envelope: ProfileEnvelope =
            serde_json::from_str(r#"{"data":{"username":"dave","interests":["x"]},"username":"ignored"}"#)
                .unwrap();
        let profile = envelope.into_profile();
        assert_eq!(profile.username.as_deref(), Some("dave"));
        assert_eq!(profile.interests.len(), 1);
    }
}
