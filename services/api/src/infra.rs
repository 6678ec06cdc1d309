use metrics_exporter_prometheus::PrometheusHandle;
use name_match::error::AppError;
use name_match::matching::NameMatcher;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) matcher: Arc<NameMatcher>,
    pub(crate) api_key: Option<Arc<str>>,
}

/// Compares the presented key against the configured one.
///
/// An unconfigured key rejects every request rather than opening the
/// endpoint up.
pub(crate) fn authorize(expected: Option<&str>, presented: Option<&str>) -> Result<(), AppError> {
    match (expected, presented) {
        (Some(expected), Some(presented)) if expected == presented => Ok(()),
        _ => Err(AppError::Unauthorized),
    }
}
