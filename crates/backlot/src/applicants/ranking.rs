use std::cmp::Ordering;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::domain::Application;

/// Score used for applications without a match score.
pub const MISSING_SCORE: f64 = -1.0;

/// Ordering selected by the reviewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum SortMode {
    /// Highest match score first.
    #[default]
    Score,
    /// Newest application first.
    Date,
    /// Applicant name, A to Z.
    Name,
}

impl SortMode {
    pub const ALL: [SortMode; 3] = [SortMode::Score, SortMode::Date, SortMode::Name];

    pub const fn as_str(self) -> &'static str {
        match self {
            SortMode::Score => "score",
            SortMode::Date => "date",
            SortMode::Name => "name",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let needle = value.trim();
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(needle))
    }
}

impl FromStr for SortMode {
    type Err = UnknownSortMode;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value).ok_or_else(|| UnknownSortMode(value.to_string()))
    }
}

impl TryFrom<String> for SortMode {
    type Error = UnknownSortMode;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or(UnknownSortMode(value))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort mode '{0}' (expected score, date, or name)")]
pub struct UnknownSortMode(pub String);

/// Return a new list ordered for `mode`. Promoted applications always lead; ties keep
/// their input order.
pub fn rank(applications: &[Application], mode: SortMode) -> Vec<Application> {
    let mut keyed: Vec<(RankKey, &Application)> = applications
        .iter()
        .map(|application| (RankKey::new(application, mode), application))
        .collect();

    keyed.sort_by(|(left, _), (right, _)| left.compare(right));

    keyed
        .into_iter()
        .map(|(_, application)| application.clone())
        .collect()
}

/// Pairwise form of [`rank`].
pub fn compare(left: &Application, right: &Application, mode: SortMode) -> Ordering {
    RankKey::new(left, mode).compare(&RankKey::new(right, mode))
}

struct RankKey {
    promoted: bool,
    criterion: Criterion,
}

enum Criterion {
    Score(f64),
    Date(Option<NaiveDateTime>),
    Name(Option<String>),
}

impl RankKey {
    fn new(application: &Application, mode: SortMode) -> Self {
        let criterion = match mode {
            SortMode::Score => Criterion::Score(
                application
                    .match_score
                    .filter(|score| !score.is_nan())
                    .unwrap_or(MISSING_SCORE),
            ),
            SortMode::Date => Criterion::Date(application.submitted_at()),
            SortMode::Name => Criterion::Name(application.preferred_name().map(str::to_lowercase)),
        };

        Self {
            promoted: application.is_promoted,
            criterion,
        }
    }

    fn compare(&self, other: &Self) -> Ordering {
        other
            .promoted
            .cmp(&self.promoted)
            .then_with(|| match (&self.criterion, &other.criterion) {
                (Criterion::Score(left), Criterion::Score(right)) => right.total_cmp(left),
                // `None` orders below `Some`, so unparseable dates land after every real one.
                (Criterion::Date(left), Criterion::Date(right)) => right.cmp(left),
                (Criterion::Name(left), Criterion::Name(right)) => compare_names(left, right),
                _ => Ordering::Equal,
            })
    }
}

fn compare_names(left: &Option<String>, right: &Option<String>) -> Ordering {
    match (left, right) {
        (Some(left), Some(right)) => left.cmp(right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_mode_parses_case_insensitively() {
        assert_eq!("Score".parse::<SortMode>(), Ok(SortMode::Score));
        assert_eq!(" date".parse::<SortMode>(), Ok(SortMode::Date));
        assert_eq!(SortMode::parse("NAME"), Some(SortMode::Name));
        let error = "rating".parse::<SortMode>().expect_err("unknown mode");
        assert_eq!(error, UnknownSortMode("rating".to_string()));
        assert_eq!(SortMode::default(), SortMode::Score);
    }

    #[test]
    fn compare_names_places_missing_last() {
        let named = Some("zzzz top".to_string());
        assert_eq!(compare_names(&named, &None), Ordering::Less);
        assert_eq!(compare_names(&None, &named), Ordering::Greater);
        assert_eq!(compare_names(&None, &None), Ordering::Equal);
    }

    #[test]
    fn sort_mode_deserializes_any_casing() {
        let mode: SortMode = serde_json::from_str("\"Date\"").expect("known mode");
        assert_eq!(mode, SortMode::Date);
        assert!(serde_json::from_str::<SortMode>("\"rating\"").is_err());
    }
}
