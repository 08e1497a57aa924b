use std::collections::BTreeMap;

use serde::Serialize;

use super::domain::{Application, StatusTag};
use super::status::ApplicationStatus;

/// One kanban column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardColumn {
    pub status: ApplicationStatus,
    pub label: &'static str,
    pub color: &'static str,
    pub applications: Vec<Application>,
}

/// Applications partitioned into status columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusBoard {
    pub columns: Vec<BoardColumn>,
    /// Applications whose status is not part of the taxonomy.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unrecognized: Vec<Application>,
}

impl StatusBoard {
    /// Column contents for `status`; empty when the board has no such column.
    pub fn bucket(&self, status: ApplicationStatus) -> &[Application] {
        self.columns
            .iter()
            .find(|column| column.status == status)
            .map(|column| column.applications.as_slice())
            .unwrap_or(&[])
    }

    /// Number of applications placed in a column.
    pub fn placed(&self) -> usize {
        self.columns
            .iter()
            .map(|column| column.applications.len())
            .sum()
    }

    pub fn into_map(self) -> BTreeMap<ApplicationStatus, Vec<Application>> {
        self.columns
            .into_iter()
            .map(|column| (column.status, column.applications))
            .collect()
    }
}

/// Partition an already-sorted list into one column per entry of `statuses`.
///
/// Every requested status gets a column even when empty, and column contents keep
/// the input order, so call this after [`rank`](super::ranking::rank).
pub fn group(sorted: &[Application], statuses: &[ApplicationStatus]) -> StatusBoard {
    let mut columns: Vec<BoardColumn> = Vec::with_capacity(statuses.len());
    for status in statuses {
        if columns.iter().any(|column| column.status == *status) {
            continue;
        }
        columns.push(BoardColumn {
            status: *status,
            label: status.label(),
            color: status.color(),
            applications: Vec::new(),
        });
    }

    let mut unrecognized = Vec::new();
    for application in sorted {
        match &application.status {
            StatusTag::Known(status) => {
                if let Some(column) = columns.iter_mut().find(|column| column.status == *status) {
                    column.applications.push(application.clone());
                }
            }
            StatusTag::Unrecognized(_) => unrecognized.push(application.clone()),
        }
    }

    StatusBoard {
        columns,
        unrecognized,
    }
}

/// [`group`] over the full taxonomy in column order.
pub fn group_by_taxonomy(sorted: &[Application]) -> StatusBoard {
    group(sorted, &ApplicationStatus::ALL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_requested_statuses_collapse_to_one_column() {
        let applications = vec![Application::new("a", ApplicationStatus::Booked, "2024-01-01")];
        let board = group(
            &applications,
            &[ApplicationStatus::Booked, ApplicationStatus::Booked],
        );
        assert_eq!(board.columns.len(), 1);
        assert_eq!(board.bucket(ApplicationStatus::Booked).len(), 1);
    }

    #[test]
    fn known_status_outside_request_is_not_reported_as_unrecognized() {
        let applications = vec![Application::new("a", ApplicationStatus::Viewed, "2024-01-01")];
        let board = group(&applications, &[ApplicationStatus::Applied]);
        assert_eq!(board.placed(), 0);
        assert!(board.unrecognized.is_empty());
        assert!(board.bucket(ApplicationStatus::Viewed).is_empty());
    }
}
