use backlot::applicants::{
    Application, ApplicationId, ApplicationRepository, ApplicationStatus, ProfileSnapshot,
    RepositoryError, SortMode,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

pub(crate) const DEMO_COLLAB: &str = "collab-harbor-night-shoot";

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default)]
struct Records {
    by_id: HashMap<ApplicationId, Application>,
    order: Vec<ApplicationId>,
}

/// Process-local store; applications are listed in submission order.
#[derive(Default, Clone)]
pub(crate) struct InMemoryApplicationRepository {
    records: Arc<Mutex<Records>>,
}

impl ApplicationRepository for InMemoryApplicationRepository {
    fn insert(&self, application: Application) -> Result<Application, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.by_id.contains_key(&application.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.order.push(application.id.clone());
        guard
            .by_id
            .insert(application.id.clone(), application.clone());
        Ok(application)
    }

    fn update(&self, application: Application) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        match guard.by_id.get_mut(&application.id) {
            Some(existing) => {
                *existing = application;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<Application>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.by_id.get(id).cloned())
    }

    fn for_collab(&self, collab_id: &str) -> Result<Vec<Application>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .order
            .iter()
            .filter_map(|id| guard.by_id.get(id))
            .filter(|application| application.collab_id.as_deref() == Some(collab_id))
            .cloned()
            .collect())
    }
}

pub(crate) fn parse_sort(raw: &str) -> Result<SortMode, String> {
    raw.parse::<SortMode>().map_err(|err| err.to_string())
}

pub(crate) fn parse_status(raw: &str) -> Result<ApplicationStatus, String> {
    ApplicationStatus::parse(raw).ok_or_else(|| {
        let known: Vec<&str> = ApplicationStatus::ALL
            .iter()
            .map(|status| status.as_str())
            .collect();
        format!("unknown status '{raw}' (expected one of {})", known.join(", "))
    })
}

fn profile(
    display_name: Option<&str>,
    full_name: Option<&str>,
    username: &str,
) -> ProfileSnapshot {
    ProfileSnapshot {
        display_name: display_name.map(str::to_string),
        full_name: full_name.map(str::to_string),
        username: Some(username.to_string()),
    }
}

/// Applicants for the demo collab, spread across the board.
pub(crate) fn sample_applications() -> Vec<Application> {
    vec![
        Application::new("app-1001", ApplicationStatus::Applied, "2024-05-01T09:12:00Z")
            .in_collab(DEMO_COLLAB)
            .with_score(72.0)
            .with_profile(profile(Some("Rosa Lind"), Some("Rosa Lindqvist"), "rosa.l"))
            .with_cover_note("Gaffer, owns a 5-ton grip and electric package"),
        Application::new("app-1002", ApplicationStatus::Shortlisted, "2024-05-03T14:40:00Z")
            .in_collab(DEMO_COLLAB)
            .with_score(88.5)
            .with_profile(profile(None, Some("Amir Haddad"), "amirh")),
        Application::new("app-1003", ApplicationStatus::Applied, "2024-05-02T18:05:00Z")
            .in_collab(DEMO_COLLAB)
            .promoted()
            .with_profile(profile(None, None, "zed_dit"))
            .with_cover_note("DIT with on-set color pipeline"),
        Application::new("app-1004", ApplicationStatus::Interview, "2024-04-28T11:00:00Z")
            .in_collab(DEMO_COLLAB)
            .with_score(64.0)
            .with_profile(profile(Some("Beatrice Ko"), None, "bko")),
        Application::new("app-1005", ApplicationStatus::Booked, "2024-04-30")
            .in_collab(DEMO_COLLAB)
            .with_score(91.0)
            .with_profile(profile(Some("Mo Adeyemi"), None, "mo.mua")),
        Application::new("app-1006", ApplicationStatus::Rejected, "2024-05-04T08:30:00Z")
            .in_collab(DEMO_COLLAB)
            .with_score(0.0)
            .with_profile(profile(Some("cal"), None, "cal.pa")),
        Application::new("app-1007", ApplicationStatus::Viewed, "")
            .in_collab(DEMO_COLLAB)
            .with_score(55.0),
    ]
}

pub(crate) fn seed_repository(
    repository: &InMemoryApplicationRepository,
) -> Result<usize, RepositoryError> {
    let applications = sample_applications();
    let count = applications.len();
    for application in applications {
        repository.insert(application)?;
    }
    Ok(count)
}
