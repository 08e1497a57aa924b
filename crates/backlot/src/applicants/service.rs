use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::domain::{Application, ApplicationId, StatusTag};
use super::ranking::SortMode;
use super::repository::{ApplicationRepository, RepositoryError};
use super::status::ApplicationStatus;
use super::view::{ApplicantView, ViewQuery};
use crate::config::RankingConfig;

/// Requested status transition, as sent by a reviewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: String,
}

/// Outcome of a recorded status transition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusChange {
    pub application_id: ApplicationId,
    pub previous: StatusTag,
    pub current: ApplicationStatus,
    pub application: Application,
}

/// Service composing the application store with the ranking pipeline.
pub struct ApplicantBoardService<R> {
    repository: Arc<R>,
    config: RankingConfig,
}

impl<R> ApplicantBoardService<R>
where
    R: ApplicationRepository + 'static,
{
    pub fn new(repository: Arc<R>, config: RankingConfig) -> Self {
        Self { repository, config }
    }

    pub fn default_sort(&self) -> SortMode {
        self.config.default_sort
    }

    /// Store a new application.
    pub fn submit(&self, application: Application) -> Result<Application, ApplicantServiceError> {
        let stored = self.repository.insert(application)?;
        Ok(stored)
    }

    pub fn get(&self, application_id: &ApplicationId) -> Result<Application, ApplicantServiceError> {
        let application = self
            .repository
            .fetch(application_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(application)
    }

    /// Rank, filter, and optionally group every application on a collab.
    pub fn view(
        &self,
        collab_id: &str,
        query: &ViewQuery,
    ) -> Result<ApplicantView, ApplicantServiceError> {
        let applications = self.repository.for_collab(collab_id)?;
        Ok(ApplicantView::build(&applications, query))
    }

    /// Move an application to another status. Any known status may follow any other.
    pub fn update_status(
        &self,
        application_id: &ApplicationId,
        update: StatusUpdate,
    ) -> Result<StatusChange, ApplicantServiceError> {
        let current = ApplicationStatus::parse(&update.status)
            .ok_or(ApplicantServiceError::UnknownStatus(update.status))?;

        let mut application = self
            .repository
            .fetch(application_id)?
            .ok_or(RepositoryError::NotFound)?;

        let previous = std::mem::replace(&mut application.status, StatusTag::Known(current));
        self.repository.update(application.clone())?;

        info!(
            application_id = %application_id,
            from = previous.as_str(),
            to = current.as_str(),
            "application status updated"
        );

        Ok(StatusChange {
            application_id: application_id.clone(),
            previous,
            current,
            application,
        })
    }
}

/// Error raised by the applicant service.
#[derive(Debug, thiserror::Error)]
pub enum ApplicantServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("unknown application status '{0}'")]
    UnknownStatus(String),
}
