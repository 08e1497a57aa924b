use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::applicants::domain::{Application, ApplicationId, ProfileSnapshot};
use crate::applicants::repository::{ApplicationRepository, RepositoryError};
use crate::applicants::status::ApplicationStatus;
use crate::applicants::{applicant_router, ApplicantBoardService};
use crate::config::RankingConfig;

pub(super) const COLLAB: &str = "collab-night-shoot";

pub(super) fn applicant(id: &str, status: ApplicationStatus, created_at: &str) -> Application {
    Application::new(id, status, created_at).in_collab(COLLAB)
}

pub(super) fn named(
    display_name: Option<&str>,
    full_name: Option<&str>,
    username: Option<&str>,
) -> ProfileSnapshot {
    ProfileSnapshot {
        display_name: display_name.map(str::to_string),
        full_name: full_name.map(str::to_string),
        username: username.map(str::to_string),
    }
}

pub(super) fn ids(applications: &[Application]) -> Vec<&str> {
    applications
        .iter()
        .map(|application| application.id.0.as_str())
        .collect()
}

/// A collab with a realistic spread across the board.
pub(super) fn crew_call() -> Vec<Application> {
    vec![
        applicant("gaffer", ApplicationStatus::Applied, "2024-05-01T09:00:00Z")
            .with_score(72.0)
            .with_profile(named(Some("Rosa Lind"), None, Some("rosa.l")))
            .with_cover_note("Gaffer with a 5-ton package"),
        applicant("grip", ApplicationStatus::Shortlisted, "2024-05-03T09:00:00Z")
            .with_score(88.0)
            .with_profile(named(None, Some("amir haddad"), None)),
        applicant("dit", ApplicationStatus::Applied, "2024-05-02T09:00:00Z")
            .promoted()
            .with_profile(named(None, None, Some("zed_dit"))),
        applicant("boom", ApplicationStatus::Interview, "2024-04-28T09:00:00Z")
            .with_score(64.5)
            .with_profile(named(Some("Beatrice Ko"), None, None)),
        applicant("mua", ApplicationStatus::Booked, "not a date").with_score(91.0),
        applicant("pa", ApplicationStatus::Rejected, "2024-05-04T09:00:00Z")
            .with_score(0.0)
            .with_profile(named(Some("cal"), None, None)),
    ]
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    records: Arc<Mutex<Vec<Application>>>,
}

impl ApplicationRepository for MemoryRepository {
    fn insert(&self, application: Application) -> Result<Application, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.iter().any(|existing| existing.id == application.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(application.clone());
        Ok(application)
    }

    fn update(&self, application: Application) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        match guard.iter_mut().find(|existing| existing.id == application.id) {
            Some(existing) => {
                *existing = application;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<Application>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.iter().find(|existing| &existing.id == id).cloned())
    }

    fn for_collab(&self, collab_id: &str) -> Result<Vec<Application>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .iter()
            .filter(|existing| existing.collab_id.as_deref() == Some(collab_id))
            .cloned()
            .collect())
    }
}

pub(super) struct UnavailableRepository;

impl ApplicationRepository for UnavailableRepository {
    fn insert(&self, _application: Application) -> Result<Application, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _application: Application) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &ApplicationId) -> Result<Option<Application>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn for_collab(&self, _collab_id: &str) -> Result<Vec<Application>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn build_service() -> (ApplicantBoardService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = ApplicantBoardService::new(repository.clone(), RankingConfig::default());
    for application in crew_call() {
        service.submit(application).expect("seed application");
    }
    (service, repository)
}

pub(super) fn router_with_service(
    service: ApplicantBoardService<MemoryRepository>,
) -> axum::Router {
    applicant_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
