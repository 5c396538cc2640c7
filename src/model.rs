//! Profile data as the forms edit it and as the backend returns it.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

pub const GENDER_OPTIONS: &[&str] = &["Male", "Female", "Other"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Male" => Some(Gender::Male),
            "Female" => Some(Gender::Female),
            "Other" => Some(Gender::Other),
            _ => None,
        }
    }
}

/// Photo picked in the About editor, uploaded as the `profileImage` part.
#[derive(Clone, PartialEq, Eq)]
pub struct ProfileImage {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ProfileImage {
    /// Inline `data:` URL for previewing the photo before upload.
    /// Browsers report an empty type for files they do not recognise.
    pub fn content_type(&self) -> &str {
        let mime = self.mime_type.trim();
        if mime.is_empty() {
            "application/octet-stream"
        } else {
            mime
        }
    }

    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.content_type(), STANDARD.encode(&self.bytes))
    }
}

impl fmt::Debug for ProfileImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfileImage")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// In-progress edit of the About section. Text fields hold exactly what the
/// user typed; the schema decides whether they are acceptable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileDraft {
    pub name: String,
    pub gender: String,
    /// `YYYY-MM-DD`, as produced by a date input.
    pub birthday: String,
    /// Centimetres.
    pub height: String,
    /// Kilograms.
    pub weight: String,
    pub profile_image: Option<ProfileImage>,
}

impl ProfileDraft {
    /// Start an edit from whatever the backend last returned.
    pub fn from_profile(profile: &Profile) -> Self {
        let gender = profile
            .gender
            .as_deref()
            .and_then(Gender::parse)
            .map(|g| g.as_str().to_string())
            .unwrap_or_default();

        Self {
            name: profile.name.clone().unwrap_or_default(),
            gender,
            birthday: profile
                .birthday
                .as_deref()
                .map(|b| iso_date_part(b).to_string())
                .unwrap_or_default(),
            height: profile.height.clone().unwrap_or_default(),
            weight: profile.weight.clone().unwrap_or_default(),
            profile_image: None,
        }
    }
}

/// The `YYYY-MM-DD` prefix of a stored birthday. Some backends send full
/// timestamps; anything without a leading date comes back trimmed as-is.
pub fn iso_date_part(raw: &str) -> &str {
    let trimmed = raw.trim();
    match trimmed.get(..10) {
        Some(prefix) if NaiveDate::parse_from_str(prefix, "%Y-%m-%d").is_ok() => prefix,
        _ => trimmed,
    }
}

/// Ordered interest tags. Duplicates are allowed; order is insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InterestList(Vec<String>);

impl InterestList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `raw` after trimming. Whitespace-only input is rejected.
    pub fn add(&mut self, raw: &str) -> bool {
        let value = raw.trim();
        if value.is_empty() {
            return false;
        }
        self.0.push(value.to_string());
        true
    }

    pub fn remove(&mut self, index: usize) -> Option<String> {
        if index < self.0.len() {
            Some(self.0.remove(index))
        } else {
            None
        }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }
}

impl From<Vec<String>> for InterestList {
    fn from(values: Vec<String>) -> Self {
        Self(values)
    }
}

/// Profile as returned by `getProfile`. Every field is optional; the backend
/// omits what the user has not filled in and computes horoscope/zodiac itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub birthday: Option<String>,
    #[serde(default)]
    pub horoscope: Option<String>,
    #[serde(default)]
    pub zodiac: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub height: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub weight: Option<String>,
    #[serde(default)]
    pub interests: InterestList,
    #[serde(default)]
    pub image: Option<String>,
}

/// Accept `"170"`, `170` or `null` for the same field.
fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Float(n) => n.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untyped_image_falls_back_to_octet_stream() {
        let image = ProfileImage {
            file_name: "me.heic".into(),
            mime_type: String::new(),
            bytes: b"hi!".to_vec(),
        };
        assert_eq!(image.content_type(), "application/octet-stream");
        assert_eq!(image.data_url(), "data:application/octet-stream;base64,aGkh");
    }

    #[test]
    fn test_draft_birthday_drops_timestamp() {
        let profile = Profile {
            birthday: Some("1995-08-28T00:00:00.000Z".into()),
            gender: Some("Other".into()),
            ..Default::default()
        };
        let draft = ProfileDraft::from_profile(&profile);
        assert_eq!(draft.birthday, "1995-08-28");
        assert_eq!(draft.gender, "Other");

        assert_eq!(iso_date_part(" 2000-01-05 "), "2000-01-05");
        assert_eq!(iso_date_part("someday"), "someday");
        assert_eq!(iso_date_part("not-a-date-at-all"), "not-a-date-at-all");
    }

    #[test]
    fn test_image_preview_url() {
        let image = ProfileImage {
            file_name: "me.png".into(),
            mime_type: "image/png".into(),
            bytes: b"hi!".to_vec(),
        };
        assert_eq!(image.data_url(), "data:image/png;base64,aGkh");
        assert!(format!("{:?}", image).contains("len: 3"));
    }

    #[test]
    fn test_add_rejects_whitespace() {
        let mut list = InterestList::new();
        assert!(!list.add("   "));
        assert!(!list.add(""));
        assert!(list.is_empty());
    }

    #[test]
    fn test_add_then_remove_returns_to_empty() {
        let mut list = InterestList::new();
        assert!(list.add("x"));
        assert_eq!(list.remove(0), Some("x".to_string()));
        assert!(list.is_empty());
    }

    #[test]
    fn test_add_trims_and_keeps_duplicates_in_order() {
        let mut list = InterestList::new();
        list.add("  music ");
        list.add("golf");
        list.add("music");
        assert_eq!(list.as_slice(), &["music", "golf", "music"]);
        assert_eq!(list.remove(1), Some("golf".to_string()));
        assert_eq!(list.as_slice(), &["music", "music"]);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut list = InterestList::from(vec!["a".to_string()]);
        assert_eq!(list.remove(3), None);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_profile_accepts_numeric_measurements() {
        let json = r#"{
            "email": "alice@example.com",
            "username": "alice",
            "name": "Alice",
            "birthday": "1995-08-28",
            "horoscope": "Virgo",
            "zodiac": "Pig",
            "height": 170,
            "weight": 55.5,
            "interests": ["Music", "Golf"]
        }"#;
        let profile: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.height.as_deref(), Some("170"));
        assert_eq!(profile.weight.as_deref(), Some("55.5"));
        assert_eq!(profile.interests.as_slice(), &["Music", "Golf"]);
        assert_eq!(profile.gender, None);
    }

    #[test]
    fn test_profile_tolerates_missing_and_null_fields() {
        let profile: Profile = serde_json::from_str(r#"{"username": "bob", "height": null}"#).unwrap();
        assert_eq!(profile.username.as_deref(), Some("bob"));
        assert_eq!(profile.height, None);
        assert!(profile.interests.is_empty());
    }

    #[test]
    fn test_draft_from_profile_drops_unknown_gender() {
        let profile = Profile {
            name: Some("Alice".into()),
            gender: Some("unknown".into()),
            height: Some("170".into()),
            ..Default::default()
        };
        let draft = ProfileDraft::from_profile(&profile);
        assert_eq!(draft.name, "Alice");
        assert_eq!(draft.gender, "");
        assert_eq!(draft.height, "170");
        assert!(draft.profile_image.is_none());
    }

    #[test]
    fn test_gender_round_trip() {
        for option in GENDER_OPTIONS {
            assert_eq!(Gender::parse(option).map(|g| g.as_str()), Some(*option));
        }
        assert_eq!(Gender::parse("male"), None);
    }
}
