use crate::cli::ServeArgs;
use crate::infra::{
    load_matching_config, AppState, InMemoryAnswerArchive, InMemoryProgressionLedger,
    InMemorySubmissionRepository,
};
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use skillforge::config::AppConfig;
use skillforge::error::AppError;
use skillforge::telemetry;
use skillforge::workflows::guidance::{CareerCatalog, GuidanceService};
use skillforge::workflows::progression::{ProjectCatalog, SubmissionWorkflow};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let matching_config = load_matching_config(&config)?;
    let guidance = Arc::new(GuidanceService::new(
        Arc::new(CareerCatalog::standard()),
        Arc::new(matching_config),
        Arc::new(InMemoryAnswerArchive::default()),
    ));
    let progression = Arc::new(SubmissionWorkflow::new(
        Arc::new(InMemorySubmissionRepository::default()),
        Arc::new(InMemoryProgressionLedger::default()),
        Arc::new(ProjectCatalog::standard()),
    ));

    let app = with_service_routes(guidance, progression)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "skillforge guidance service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
