use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryApplicationStore};
use crate::routes::with_application_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use scholarship_intake::applications::{ScholarshipApplicationService, ScoringConfig};
use scholarship_intake::config::AppConfig;
use scholarship_intake::error::AppError;
use scholarship_intake::telemetry;
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

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let store = Arc::new(InMemoryApplicationStore::default());
    let application_service = Arc::new(
        ScholarshipApplicationService::new(store, ScoringConfig::default())
            .with_collection(config.store.collection.clone()),
    );

    let app = with_application_routes(application_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        collection = %config.store.collection,
        "scholarship intake service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
