use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{Application, StatusTag};
use super::status::ApplicationStatus;

/// Reviewer-selected narrowing of an application list. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplicantFilter {
    #[serde(default)]
    pub status: Option<ApplicationStatus>,
    #[serde(default)]
    pub promoted_only: bool,
    #[serde(default)]
    pub min_score: Option<f64>,
    #[serde(default)]
    pub search: Option<String>,
}

impl ApplicantFilter {
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && !self.promoted_only
            && self.min_score.is_none()
            && self.search_needle().is_none()
    }

    pub fn matches(&self, application: &Application) -> bool {
        self.matches_with(application, self.search_needle().as_deref())
    }

    /// Keep matching applications, preserving input order.
    pub fn apply(&self, applications: &[Application]) -> Vec<Application> {
        let needle = self.search_needle();
        applications
            .iter()
            .filter(|application| self.matches_with(application, needle.as_deref()))
            .cloned()
            .collect()
    }

    fn matches_with(&self, application: &Application, needle: Option<&str>) -> bool {
        if let Some(status) = self.status {
            if application.known_status() != Some(status) {
                return false;
            }
        }

        if self.promoted_only && !application.is_promoted {
            return false;
        }

        if let Some(minimum) = self.min_score {
            match application.match_score {
                Some(score) if score >= minimum => {}
                _ => return false,
            }
        }

        match needle {
            Some(needle) => application.matches_text(needle),
            None => true,
        }
    }

    fn search_needle(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_lowercase)
    }
}

/// Tab badge counts over an unfiltered list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub total: usize,
    pub by_status: BTreeMap<ApplicationStatus, usize>,
    pub unrecognized: usize,
}

impl StatusCounts {
    pub fn tally(applications: &[Application]) -> Self {
        let mut by_status: BTreeMap<ApplicationStatus, usize> = ApplicationStatus::ALL
            .into_iter()
            .map(|status| (status, 0))
            .collect();
        let mut unrecognized = 0;

        for application in applications {
            match &application.status {
                StatusTag::Known(status) => *by_status.entry(*status).or_insert(0) += 1,
                StatusTag::Unrecognized(_) => unrecognized += 1,
            }
        }

        Self {
            total: applications.len(),
            by_status,
            unrecognized,
        }
    }

    pub fn count(&self, status: ApplicationStatus) -> usize {
        self.by_status.get(&status).copied().unwrap_or(0)
    }
}
