use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle state of an application on a collab posting.
///
/// Declaration order is board column order, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum ApplicationStatus {
    Applied,
    Viewed,
    Shortlisted,
    Interview,
    Offered,
    Booked,
    Rejected,
}

/// Display metadata for one status column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusDescriptor {
    pub status: ApplicationStatus,
    pub label: &'static str,
    pub color: &'static str,
}

static TAXONOMY: [StatusDescriptor; 7] = [
    StatusDescriptor {
        status: ApplicationStatus::Applied,
        label: "Applied",
        color: "slate",
    },
    StatusDescriptor {
        status: ApplicationStatus::Viewed,
        label: "Viewed",
        color: "blue",
    },
    StatusDescriptor {
        status: ApplicationStatus::Shortlisted,
        label: "Shortlisted",
        color: "amber",
    },
    StatusDescriptor {
        status: ApplicationStatus::Interview,
        label: "Interview",
        color: "violet",
    },
    StatusDescriptor {
        status: ApplicationStatus::Offered,
        label: "Offered",
        color: "emerald",
    },
    StatusDescriptor {
        status: ApplicationStatus::Booked,
        label: "Booked",
        color: "green",
    },
    StatusDescriptor {
        status: ApplicationStatus::Rejected,
        label: "Rejected",
        color: "red",
    },
];

/// The ordered status table shared by every list and board presentation.
pub fn taxonomy() -> &'static [StatusDescriptor] {
    &TAXONOMY
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 7] = [
        ApplicationStatus::Applied,
        ApplicationStatus::Viewed,
        ApplicationStatus::Shortlisted,
        ApplicationStatus::Interview,
        ApplicationStatus::Offered,
        ApplicationStatus::Booked,
        ApplicationStatus::Rejected,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "applied",
            ApplicationStatus::Viewed => "viewed",
            ApplicationStatus::Shortlisted => "shortlisted",
            ApplicationStatus::Interview => "interview",
            ApplicationStatus::Offered => "offered",
            ApplicationStatus::Booked => "booked",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    pub fn descriptor(self) -> &'static StatusDescriptor {
        &TAXONOMY[self as usize]
    }

    pub fn label(self) -> &'static str {
        self.descriptor().label
    }

    pub fn color(self) -> &'static str {
        self.descriptor().color
    }

    /// Case-insensitive lookup of a status identifier.
    pub fn parse(value: &str) -> Option<Self> {
        let needle = value.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(needle))
    }
}

impl TryFrom<String> for ApplicationStatus {
    type Error = UnknownApplicationStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or(UnknownApplicationStatus(value))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown application status '{0}'")]
pub struct UnknownApplicationStatus(pub String);

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
