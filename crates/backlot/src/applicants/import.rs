use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use super::domain::{Application, ApplicationId, ProfileSnapshot, StatusTag};

#[derive(Debug, thiserror::Error)]
pub enum ApplicantImportError {
    #[error("failed to read applicant export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid applicant CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: '{value}' is not a valid is_promoted flag")]
    InvalidPromotedFlag { row: usize, value: String },
}

/// Loads applications from a CSV export of a collab's applicant table.
pub struct ApplicantImporter;

impl ApplicantImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Application>, ApplicantImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Application>, ApplicantImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut applications = Vec::new();

        for (index, record) in csv_reader.deserialize::<ApplicantRow>().enumerate() {
            let row = record?;
            applications.push(row.into_application(index + 1)?);
        }

        Ok(applications)
    }
}

#[derive(Debug, Deserialize)]
struct ApplicantRow {
    id: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    collab_id: Option<String>,
    status: String,
    #[serde(default)]
    match_score: Option<f64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    is_promoted: Option<String>,
    #[serde(default)]
    created_at: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    display_name: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    full_name: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    username: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    cover_note: Option<String>,
}

impl ApplicantRow {
    fn into_application(self, row: usize) -> Result<Application, ApplicantImportError> {
        let is_promoted = match self.is_promoted {
            Some(value) => {
                parse_flag(&value).ok_or(ApplicantImportError::InvalidPromotedFlag { row, value })?
            }
            None => false,
        };

        let profile = ProfileSnapshot {
            display_name: self.display_name,
            full_name: self.full_name,
            username: self.username,
        };
        let current_profile = if profile == ProfileSnapshot::default() {
            None
        } else {
            Some(profile)
        };

        Ok(Application {
            id: ApplicationId(self.id),
            collab_id: self.collab_id,
            status: StatusTag::from(self.status),
            match_score: self.match_score,
            is_promoted,
            created_at: self.created_at,
            current_profile,
            cover_note: self.cover_note,
        })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Some(true),
        "false" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
