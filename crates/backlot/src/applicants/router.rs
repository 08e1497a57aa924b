use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{Application, ApplicationId};
use super::filter::ApplicantFilter;
use super::ranking::SortMode;
use super::repository::{ApplicationRepository, RepositoryError};
use super::service::{ApplicantBoardService, ApplicantServiceError, StatusUpdate};
use super::status::{taxonomy, ApplicationStatus, StatusDescriptor};
use super::view::{ApplicantView, ViewLayout, ViewQuery};

/// Router builder exposing ranking, board, and status endpoints.
pub fn applicant_router<R>(service: Arc<ApplicantBoardService<R>>) -> Router
where
    R: ApplicationRepository + 'static,
{
    Router::new()
        .route("/api/v1/applicants/rank", post(rank_handler::<R>))
        .route("/api/v1/applicants/statuses", get(statuses_handler))
        .route(
            "/api/v1/collabs/:collab_id/applications",
            get(collab_view_handler::<R>),
        )
        .route(
            "/api/v1/applications/:application_id",
            get(application_handler::<R>),
        )
        .route(
            "/api/v1/applications/:application_id/status",
            patch(status_update_handler::<R>),
        )
        .with_state(service)
}

/// Caller-supplied applications to rank without touching the store.
#[derive(Debug, Deserialize)]
pub(crate) struct RankRequest {
    pub(crate) applications: Vec<Application>,
    #[serde(default)]
    pub(crate) sort: Option<SortMode>,
    #[serde(default)]
    pub(crate) filter: ApplicantFilter,
    #[serde(default)]
    pub(crate) layout: ViewLayout,
}

/// Query string accepted by the collab applications listing.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ViewParams {
    pub(crate) sort: Option<String>,
    pub(crate) status: Option<String>,
    pub(crate) search: Option<String>,
    pub(crate) promoted_only: Option<bool>,
    pub(crate) min_score: Option<f64>,
    pub(crate) layout: Option<String>,
}

impl ViewParams {
    fn into_query(self, default_sort: SortMode) -> Result<ViewQuery, String> {
        let sort = match self.sort.as_deref() {
            Some(raw) if !raw.trim().is_empty() => {
                SortMode::parse(raw).ok_or_else(|| format!("unknown sort mode '{raw}'"))?
            }
            _ => default_sort,
        };

        let status = match self.status.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) if raw.eq_ignore_ascii_case("all") => None,
            Some(raw) => Some(
                ApplicationStatus::parse(raw).ok_or_else(|| format!("unknown status '{raw}'"))?,
            ),
        };

        let layout = match self.layout.as_deref().map(str::trim) {
            None | Some("") => ViewLayout::List,
            Some(raw) => ViewLayout::parse(raw).ok_or_else(|| format!("unknown layout '{raw}'"))?,
        };

        Ok(ViewQuery {
            sort,
            filter: ApplicantFilter {
                status,
                promoted_only: self.promoted_only.unwrap_or(false),
                min_score: self.min_score,
                search: self.search,
            },
            layout,
        })
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct StatusTaxonomyResponse {
    pub(crate) statuses: &'static [StatusDescriptor],
}

pub(crate) async fn rank_handler<R>(
    State(service): State<Arc<ApplicantBoardService<R>>>,
    Json(request): Json<RankRequest>,
) -> Json<ApplicantView>
where
    R: ApplicationRepository + 'static,
{
    let query = ViewQuery {
        sort: request.sort.unwrap_or_else(|| service.default_sort()),
        filter: request.filter,
        layout: request.layout,
    };
    Json(ApplicantView::build(&request.applications, &query))
}

pub(crate) async fn statuses_handler() -> Json<StatusTaxonomyResponse> {
    Json(StatusTaxonomyResponse {
        statuses: taxonomy(),
    })
}

pub(crate) async fn collab_view_handler<R>(
    State(service): State<Arc<ApplicantBoardService<R>>>,
    Path(collab_id): Path<String>,
    Query(params): Query<ViewParams>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    let query = match params.into_query(service.default_sort()) {
        Ok(query) => query,
        Err(message) => {
            return (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
        }
    };

    match service.view(&collab_id, &query) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(other) => error_response(other),
    }
}

pub(crate) async fn application_handler<R>(
    State(service): State<Arc<ApplicantBoardService<R>>>,
    Path(application_id): Path<String>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    let id = ApplicationId(application_id);
    match service.get(&id) {
        Ok(application) => (StatusCode::OK, Json(application)).into_response(),
        Err(other) => error_response(other),
    }
}

pub(crate) async fn status_update_handler<R>(
    State(service): State<Arc<ApplicantBoardService<R>>>,
    Path(application_id): Path<String>,
    Json(update): Json<StatusUpdate>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    let id = ApplicationId(application_id);
    match service.update_status(&id, update) {
        Ok(change) => (StatusCode::OK, Json(change)).into_response(),
        Err(other) => error_response(other),
    }
}

fn error_response(error: ApplicantServiceError) -> Response {
    let status = match &error {
        ApplicantServiceError::UnknownStatus(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ApplicantServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        ApplicantServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        ApplicantServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, Json(payload)).into_response()
}
