//! Read-only profile view for the dashboard and the draft used to edit it.

use chrono::NaiveDate;
use tracing::warn;

use crate::api::ProfileApi;
use crate::model::{iso_date_part, Profile, ProfileDraft};
use crate::session::SessionStore;

/// The backend writes this literal into computed fields it could not derive.
const BACKEND_ERROR_SENTINEL: &str = "Error";

pub const ABOUT_PLACEHOLDER: &str = "Add in your about to help others know you better";
pub const INTEREST_PLACEHOLDER: &str = "Add in your interest to find a better match";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ProfileView {
    /// No token; nothing was fetched.
    Guest,
    #[default]
    Loading,
    Loaded(Profile),
    /// The fetch failed. The page still renders, just without data.
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AboutRow {
    pub label: &'static str,
    pub value: String,
}

impl ProfileView {
    pub fn profile(&self) -> Option<&Profile> {
        match self {
            ProfileView::Loaded(profile) => Some(profile),
            _ => None,
        }
    }

    /// Name for the welcome banner.
    pub fn greeting_name(&self) -> String {
        match self {
            ProfileView::Guest => "guest".to_string(),
            ProfileView::Loading => "...".to_string(),
            ProfileView::Loaded(profile) => profile
                .username
                .clone()
                .filter(|u| !u.is_empty())
                .unwrap_or_else(|| "user".to_string()),
            ProfileView::Unavailable => "user".to_string(),
        }
    }

    pub fn interests(&self) -> Vec<String> {
        self.profile()
            .map(|p| p.interests.as_slice().to_vec())
            .unwrap_or_default()
    }

    /// Rows for the About card, or `None` when the placeholder should show.
    pub fn about_rows(&self) -> Option<Vec<AboutRow>> {
        let profile = self.profile()?;

        let fields = [
            &profile.birthday,
            &profile.horoscope,
            &profile.zodiac,
            &profile.height,
            &profile.weight,
        ];
        if fields
            .iter()
            .any(|f| f.as_deref() == Some(BACKEND_ERROR_SENTINEL))
        {
            return None;
        }

        let present = |value: &Option<String>| value.clone().filter(|v| !v.trim().is_empty());

        let mut rows = Vec::new();
        if let Some(birthday) = present(&profile.birthday) {
            rows.push(AboutRow {
                label: "Birthday",
                value: format_birthday(&birthday),
            });
        }
        if let Some(horoscope) = present(&profile.horoscope) {
            rows.push(AboutRow {
                label: "Horoscope",
                value: horoscope,
            });
        }
        if let Some(zodiac) = present(&profile.zodiac) {
            rows.push(AboutRow {
                label: "Zodiac",
                value: zodiac,
            });
        }
        if let Some(height) = present(&profile.height) {
            rows.push(AboutRow {
                label: "Height",
                value: format!("{} cm", height),
            });
        }
        if let Some(weight) = present(&profile.weight) {
            rows.push(AboutRow {
                label: "Weight",
                value: format!("{} kg", weight),
            });
        }

        if rows.is_empty() {
            None
        } else {
            Some(rows)
        }
    }

    /// Draft for the About editor, prefilled from whatever is loaded.
    pub fn edit_draft(&self) -> ProfileDraft {
        self.profile()
            .map(ProfileDraft::from_profile)
            .unwrap_or_default()
    }
}

/// `1995-08-28` → `August 28, 1995`; anything unparseable is shown as-is.
pub fn format_birthday(raw: &str) -> String {
    let date_part = iso_date_part(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map(|d| d.format("%B %-d, %Y").to_string())
        .unwrap_or_else(|_| date_part.to_string())
}

/// Fetch the profile once for display.
pub async fn load_profile(api: &dyn ProfileApi, session: &SessionStore) -> ProfileView {
    let Some(token) = session.token() else {
        return ProfileView::Guest;
    };

    match api.get_profile(&token).await {
        Ok(profile) => ProfileView::Loaded(profile),
        Err(e) => {
            warn!("Failed to fetch profile: {}", e);
            if e.is_auth_rejection() {
                session.clear_token();
            }
            ProfileView::Unavailable
        }
    }
}
