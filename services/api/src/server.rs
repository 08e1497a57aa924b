use crate::cli::ServeArgs;
use crate::infra::{seed_repository, AppState, InMemoryApplicationRepository};
use crate::routes::with_applicant_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use backlot::applicants::ApplicantBoardService;
use backlot::config::{AppConfig, AppEnvironment};
use backlot::error::AppError;
use backlot::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryApplicationRepository::default());
    if config.environment == AppEnvironment::Development {
        match seed_repository(&repository) {
            Ok(count) => info!(count, "seeded demo collab applications"),
            Err(err) => warn!(%err, "could not seed demo collab applications"),
        }
    }

    let applicant_service = Arc::new(ApplicantBoardService::new(repository, config.ranking));

    let app = with_applicant_routes(applicant_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        default_sort = config.ranking.default_sort.as_str(),
        "applicant board service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
