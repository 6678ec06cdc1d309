use crate::infra::{authorize, AppState};
use axum::extract::Query;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use name_match::error::AppError;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// One comparison request: two raw name pairs, each side possibly absent.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct NameMatchRequest {
    #[serde(default)]
    pub(crate) api_key: Option<String>,
    #[serde(default)]
    pub(crate) name: Option<String>,
    #[serde(default)]
    pub(crate) contact_name: Option<String>,
    #[serde(default)]
    pub(crate) surname: Option<String>,
    #[serde(default)]
    pub(crate) contact_surname: Option<String>,
    #[serde(default)]
    pub(crate) include_normalized: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct NameMatchResponse {
    pub(crate) full_name_similarity: f64,
    pub(crate) surname_similarity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) normalized: Option<NormalizedNamesView>,
}

/// Normalized forms of the full-name pair, exposed for audit display.
#[derive(Debug, Serialize)]
pub(crate) struct NormalizedNamesView {
    pub(crate) name: String,
    pub(crate) contact_name: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ApiKeyQuery {
    #[serde(default)]
    pub(crate) api_key: Option<String>,
}

pub(crate) fn router() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/name-match", post(name_match_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn name_match_endpoint(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
    Query(query): Query<ApiKeyQuery>,
    Json(payload): Json<NameMatchRequest>,
) -> Result<Json<NameMatchResponse>, AppError> {
    let presented = headers
        .get("x-api-key")
        .and_then(|value| value.to_str().ok())
        .or(query.api_key.as_deref())
        .or(payload.api_key.as_deref());
    authorize(state.api_key.as_deref(), presented)?;

    let NameMatchRequest {
        name,
        contact_name,
        surname,
        contact_surname,
        include_normalized,
        ..
    } = payload;

    let full_name = state
        .matcher
        .compare(name.as_deref(), contact_name.as_deref());
    let surname_similarity = state
        .matcher
        .similarity(surname.as_deref(), contact_surname.as_deref());

    let normalized = include_normalized.then(|| NormalizedNamesView {
        name: full_name.normalized_left.clone(),
        contact_name: full_name.normalized_right.clone(),
    });

    Ok(Json(NameMatchResponse {
        full_name_similarity: full_name.score,
        surname_similarity,
        normalized,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use name_match::matching::NameMatcher;
    use serde_json::Value;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app_state(api_key: Option<&str>) -> AppState {
        let handle = PrometheusBuilder::new().build_recorder().handle();
        AppState {
            readiness: Arc::new(AtomicBool::new(true)),
            metrics: Arc::new(handle),
            matcher: Arc::new(NameMatcher::new(true)),
            api_key: api_key.map(Arc::from),
        }
    }

    fn authorized_request(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/name-match")
            .header("content-type", "application/json")
            .header("x-api-key", "sekrit")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    #[tokio::test]
    async fn scores_both_pairs_for_an_authorized_request() {
        let state = app_state(Some("sekrit"));
        let request = NameMatchRequest {
            name: Some("Jürgen".to_string()),
            contact_name: Some("Juergen".to_string()),
            surname: Some("Anna".to_string()),
            contact_surname: Some("Ana".to_string()),
            ..NameMatchRequest::default()
        };

        let Json(body) = name_match_endpoint(
            Extension(state),
            HeaderMap::new(),
            Query(ApiKeyQuery {
                api_key: Some("sekrit".to_string()),
            }),
            Json(request),
        )
        .await
        .expect("authorized request scores");

        assert_eq!(body.full_name_similarity, 1.0);
        assert_eq!(body.surname_similarity, 0.75);
        assert!(body.normalized.is_none());
    }

    #[tokio::test]
    async fn normalized_forms_are_returned_on_request() {
        let state = app_state(Some("sekrit"));
        let request = NameMatchRequest {
            api_key: Some("sekrit".to_string()),
            name: Some("  Jürgen   Müller ".to_string()),
            contact_name: Some("JUERGEN MUELLER".to_string()),
            include_normalized: true,
            ..NameMatchRequest::default()
        };

        let Json(body) = name_match_endpoint(
            Extension(state),
            HeaderMap::new(),
            Query(ApiKeyQuery::default()),
            Json(request),
        )
        .await
        .expect("authorized request scores");

        let normalized = body.normalized.expect("normalized block requested");
        assert_eq!(normalized.name, "jurgen muller");
        assert_eq!(normalized.contact_name, "jurgen muller");
        assert_eq!(body.full_name_similarity, 1.0);
    }

    #[tokio::test]
    async fn missing_key_is_rejected() {
        let state = app_state(Some("sekrit"));
        let error = name_match_endpoint(
            Extension(state),
            HeaderMap::new(),
            Query(ApiKeyQuery::default()),
            Json(NameMatchRequest::default()),
        )
        .await
        .expect_err("request without a key must fail");

        assert!(matches!(error, AppError::Unauthorized));
    }

    #[tokio::test]
    async fn unconfigured_server_key_rejects_every_request() {
        let state = app_state(None);
        let request = NameMatchRequest {
            api_key: Some("anything".to_string()),
            ..NameMatchRequest::default()
        };

        let error = name_match_endpoint(
            Extension(state),
            HeaderMap::new(),
            Query(ApiKeyQuery::default()),
            Json(request),
        )
        .await
        .expect_err("unconfigured key must fail closed");

        assert!(matches!(error, AppError::Unauthorized));
    }

    #[tokio::test]
    async fn router_round_trip_returns_scores_and_401s() {
        let app = router().layer(Extension(app_state(Some("sekrit"))));

        let response = app
            .clone()
            .oneshot(authorized_request(json!({
                "name": "Anna Schmidt",
                "contact_name": "Ana Schmidt",
                "surname": "Schmidt",
                "contact_surname": "Schmid"
            })))
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        let payload: Value = serde_json::from_slice(&body).expect("json");
        let full_name = payload
            .get("full_name_similarity")
            .and_then(Value::as_f64)
            .expect("full name score");
        assert!((full_name - 11.0 / 12.0).abs() < 1e-9);
        assert!(payload.get("normalized").is_none());

        let unauthorized = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/name-match")
                    .header("content-type", "application/json")
                    .header("x-api-key", "wrong")
                    .body(Body::from("{}"))
                    .expect("request"),
            )
            .await
            .expect("router dispatch");
        assert_eq!(unauthorized.status(), StatusCode::UNAUTHORIZED);

        let wrong_method = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/v1/name-match")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch");
        assert_eq!(wrong_method.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn query_parameter_key_is_accepted() {
        let app = router().layer(Extension(app_state(Some("sekrit"))));

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/name-match?api_key=sekrit")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        json!({ "name": "Anna", "contact_name": "Anna" }).to_string(),
                    ))
                    .expect("request"),
            )
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        let payload: Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(
            payload.get("full_name_similarity").and_then(Value::as_f64),
            Some(1.0)
        );
        // Absent surname pair: empty against empty is a perfect match.
        assert_eq!(
            payload.get("surname_similarity").and_then(Value::as_f64),
            Some(1.0)
        );
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let app = router().layer(Extension(app_state(Some("sekrit"))));
        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/health")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch");
        assert_eq!(response.status(), StatusCode::OK);
    }
}
