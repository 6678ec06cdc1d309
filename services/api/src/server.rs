use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use name_match::config::AppConfig;
use name_match::error::AppError;
use name_match::matching::NameMatcher;
use name_match::telemetry;
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

    if config.auth.api_key.is_none() {
        warn!("APP_API_KEY is not set; every match request will be rejected");
    }

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        matcher: Arc::new(NameMatcher::from_config(&config.matching)),
        api_key: config.auth.api_key.as_deref().map(Arc::from),
    };

    let app = routes::router()
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        fold_german_digraphs = config.matching.fold_german_digraphs,
        "name match service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
