/// REST boundary for the insight service.
///
/// Routes:
/// - `GET /api/multithreading/pitfalls?topN=5`: ranked pitfall categories plus run metadata
/// - `GET /api/multithreading/categories`: the P1..P9 taxonomy
/// - `GET /api/health`: liveness and version
///
/// Failures are returned as RFC 7807 problem JSON.
use axum::{
    Router,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
};
use chrono::{DateTime, Utc};
use pitfall_core::api::{
    AnalysisMeta, CategoryListResponse, MultithreadingPitfallResponse, PitfallQueryParams,
};
use serde::Serialize;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::error::AppError;
use crate::service::InsightService;

/// Envelope for every successful API response.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<AnalysisMeta>,
    pub timestamp: DateTime<Utc>,
}

impl<T> ApiResponse<T> {
    fn new(data: T, meta: Option<AnalysisMeta>) -> Self {
        Self {
            data,
            meta,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    version: String,
}

pub fn router(service: InsightService) -> Router {
    Router::new()
        .route("/api/multithreading/pitfalls", get(multithreading_pitfalls))
        .route("/api/multithreading/categories", get(categories))
        .route("/api/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

async fn multithreading_pitfalls(
    State(service): State<InsightService>,
    query: Result<Query<PitfallQueryParams>, QueryRejection>,
) -> Result<Json<ApiResponse<MultithreadingPitfallResponse>>, AppError> {
    let Query(params) = query.map_err(|e| AppError::InvalidRequest(e.body_text()))?;
    let (response, meta) = service.multithreading_pitfalls(&params).await?;
    Ok(Json(ApiResponse::new(response, Some(meta))))
}

async fn categories(State(service): State<InsightService>) -> Json<ApiResponse<CategoryListResponse>> {
    Json(ApiResponse::new(service.categories(), None))
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// RFC 7807 problem details
#[derive(Debug, Serialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    problem_type: String,
    title: String,
    status: u16,
    detail: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }
        let problem = ProblemDetails {
            problem_type: "about:blank".to_string(),
            title: status.canonical_reason().unwrap_or("Error").to_string(),
            status: status.as_u16(),
            detail: self.to_string(),
        };
        (status, Json(problem)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::service::tests::{service, write_scenario};

    async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn pitfalls_endpoint_ranks_categories() {
        let dir = tempfile::tempdir().unwrap();
        write_scenario(dir.path());

        let (status, json) = get_json(
            router(service(dir.path())),
            "/api/multithreading/pitfalls?topN=2",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let pitfalls = json["data"]["pitfalls"].as_array().unwrap();
        assert_eq!(pitfalls.len(), 2);
        assert_eq!(pitfalls[0]["code"], "P2");
        assert_eq!(pitfalls[0]["count"], 3);
        assert_eq!(pitfalls[0]["examples"], serde_json::json!([101, 102, 103]));
        assert_eq!(pitfalls[1]["code"], "P1");
        assert_eq!(json["meta"]["corpusSize"], 5);
        assert_eq!(json["meta"]["classified"], 5);
        assert!(json["timestamp"].is_string());
    }

    #[tokio::test]
    async fn defaults_top_n_when_absent() {
        let dir = tempfile::tempdir().unwrap();
        write_scenario(dir.path());

        let (status, json) =
            get_json(router(service(dir.path())), "/api/multithreading/pitfalls").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["pitfalls"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn out_of_range_top_n_is_a_bad_request() {
        let dir = tempfile::tempdir().unwrap();

        for uri in [
            "/api/multithreading/pitfalls?topN=0",
            "/api/multithreading/pitfalls?topN=21",
            "/api/multithreading/pitfalls?topN=many",
        ] {
            let (status, json) = get_json(router(service(dir.path())), uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(json["status"], 400);
            assert_eq!(json["title"], "Bad Request");
        }
    }

    #[tokio::test]
    async fn missing_dataset_is_a_server_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone");

        let (status, json) = get_json(
            router(service(&missing)),
            "/api/multithreading/pitfalls?topN=3",
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(json["detail"].as_str().unwrap().contains("dataset error"));
    }

    #[tokio::test]
    async fn categories_endpoint_lists_taxonomy() {
        let dir = tempfile::tempdir().unwrap();
        let (status, json) =
            get_json(router(service(dir.path())), "/api/multithreading/categories").await;

        assert_eq!(status, StatusCode::OK);
        let categories = json["data"]["categories"].as_array().unwrap();
        assert_eq!(categories.len(), 9);
        assert_eq!(categories[1]["code"], "P2");
        assert_eq!(categories[1]["label"], "Deadlock");
        assert!(json.get("meta").is_none());
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let dir = tempfile::tempdir().unwrap();
        let (status, json) = get_json(router(service(dir.path())), "/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
    }
}
