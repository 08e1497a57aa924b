use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

use super::status::ApplicationStatus;

/// Identifier wrapper for submitted applications.
///
/// Upstream payloads carry either numeric or string ids; both deserialize into the
/// string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawApplicationId")]
pub struct ApplicationId(pub String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawApplicationId {
    Text(String),
    Number(i64),
}

impl From<RawApplicationId> for ApplicationId {
    fn from(value: RawApplicationId) -> Self {
        match value {
            RawApplicationId::Text(text) => ApplicationId(text),
            RawApplicationId::Number(number) => ApplicationId(number.to_string()),
        }
    }
}

impl From<&str> for ApplicationId {
    fn from(value: &str) -> Self {
        ApplicationId(value.to_string())
    }
}

impl From<u64> for ApplicationId {
    fn from(value: u64) -> Self {
        ApplicationId(value.to_string())
    }
}

impl std::fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Status as delivered by the upstream API.
///
/// Unknown identifiers are kept verbatim so the board can surface them instead of
/// dropping the application.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StatusTag {
    Known(ApplicationStatus),
    Unrecognized(String),
}

impl StatusTag {
    pub fn known(&self) -> Option<ApplicationStatus> {
        match self {
            StatusTag::Known(status) => Some(*status),
            StatusTag::Unrecognized(_) => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            StatusTag::Known(status) => status.as_str(),
            StatusTag::Unrecognized(raw) => raw,
        }
    }
}

impl From<String> for StatusTag {
    fn from(value: String) -> Self {
        match ApplicationStatus::parse(&value) {
            Some(status) => StatusTag::Known(status),
            None => StatusTag::Unrecognized(value),
        }
    }
}

impl From<StatusTag> for String {
    fn from(value: StatusTag) -> Self {
        match value {
            StatusTag::Known(status) => status.as_str().to_string(),
            StatusTag::Unrecognized(raw) => raw,
        }
    }
}

impl From<ApplicationStatus> for StatusTag {
    fn from(value: ApplicationStatus) -> Self {
        StatusTag::Known(value)
    }
}

/// Denormalized profile snapshot attached to an application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSnapshot {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

impl ProfileSnapshot {
    /// First non-blank of display name, full name, and username.
    pub fn preferred_name(&self) -> Option<&str> {
        [&self.display_name, &self.full_name, &self.username]
            .into_iter()
            .filter_map(|value| value.as_deref())
            .map(str::trim)
            .find(|value| !value.is_empty())
    }

    fn names(&self) -> impl Iterator<Item = &str> {
        [&self.display_name, &self.full_name, &self.username]
            .into_iter()
            .filter_map(|value| value.as_deref())
    }
}

/// A candidate's submission to a collab posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collab_id: Option<String>,
    pub status: StatusTag,
    #[serde(default)]
    pub match_score: Option<f64>,
    #[serde(default, deserialize_with = "null_as_false")]
    pub is_promoted: bool,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub created_at: String,
    #[serde(default)]
    pub current_profile: Option<ProfileSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_note: Option<String>,
}

impl Application {
    pub fn new(
        id: impl Into<ApplicationId>,
        status: impl Into<StatusTag>,
        created_at: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            collab_id: None,
            status: status.into(),
            match_score: None,
            is_promoted: false,
            created_at: created_at.into(),
            current_profile: None,
            cover_note: None,
        }
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.match_score = Some(score);
        self
    }

    pub fn promoted(mut self) -> Self {
        self.is_promoted = true;
        self
    }

    pub fn with_profile(mut self, profile: ProfileSnapshot) -> Self {
        self.current_profile = Some(profile);
        self
    }

    pub fn in_collab(mut self, collab_id: impl Into<String>) -> Self {
        self.collab_id = Some(collab_id.into());
        self
    }

    pub fn with_cover_note(mut self, note: impl Into<String>) -> Self {
        self.cover_note = Some(note.into());
        self
    }

    pub fn known_status(&self) -> Option<ApplicationStatus> {
        self.status.known()
    }

    pub fn preferred_name(&self) -> Option<&str> {
        self.current_profile
            .as_ref()
            .and_then(ProfileSnapshot::preferred_name)
    }

    /// Parsed `created_at`; `None` when the raw value is empty or unparseable.
    pub fn submitted_at(&self) -> Option<NaiveDateTime> {
        parse_timestamp(&self.created_at)
    }

    /// Case-insensitive substring match over profile names and the cover note.
    /// `needle` must already be lowercase.
    pub(crate) fn matches_text(&self, needle: &str) -> bool {
        let profile_hit = self
            .current_profile
            .as_ref()
            .map(|profile| {
                profile
                    .names()
                    .any(|name| name.to_lowercase().contains(needle))
            })
            .unwrap_or(false);

        profile_hit
            || self
                .cover_note
                .as_deref()
                .map(|note| note.to_lowercase().contains(needle))
                .unwrap_or(false)
    }
}

fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parse the timestamp shapes the applications API emits.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(dt);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }

    None
}
