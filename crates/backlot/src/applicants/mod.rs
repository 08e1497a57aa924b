//! Applicant ranking, filtering, and status boards for collab postings.
//!
//! The core is pure: [`rank`] orders a list, [`group`] partitions a sorted list into
//! taxonomy columns, and [`ApplicantFilter`] narrows what a reviewer sees. The store,
//! service, and router wrap that core for the HTTP surface.

pub mod board;
pub mod domain;
pub mod filter;
pub mod import;
pub mod ranking;
pub mod repository;
pub mod router;
pub mod service;
pub mod status;
pub mod view;

#[cfg(test)]
mod tests;

pub use board::{group, group_by_taxonomy, BoardColumn, StatusBoard};
pub use domain::{parse_timestamp, Application, ApplicationId, ProfileSnapshot, StatusTag};
pub use filter::{ApplicantFilter, StatusCounts};
pub use import::{ApplicantImportError, ApplicantImporter};
pub use ranking::{compare, rank, SortMode, UnknownSortMode, MISSING_SCORE};
pub use repository::{ApplicationRepository, RepositoryError};
pub use router::applicant_router;
pub use service::{ApplicantBoardService, ApplicantServiceError, StatusChange, StatusUpdate};
pub use status::{taxonomy, ApplicationStatus, StatusDescriptor, UnknownApplicationStatus};
pub use view::{ApplicantView, ViewLayout, ViewQuery};
