//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use super::AppState;
use super::types::{CatalogResponse, ErrorResponse, SizingResponse};
use crate::config::SiteConfig;

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorResponse>)>;

/// Returns catalog tables and policy constants.
///
/// `GET /catalog` → 200 + `CatalogResponse` JSON
pub async fn get_catalog(State(state): State<Arc<AppState>>) -> Json<CatalogResponse> {
    Json(CatalogResponse::from_engine(&state.engine))
}

/// Sizes a site supplied as JSON (same shape as a TOML site file).
///
/// `POST /size` → 200 + `SizingResponse` JSON
/// malformed body or non-finite values → 400 + `ErrorResponse`
pub async fn post_size(
    State(state): State<Arc<AppState>>,
    body: Result<Json<SiteConfig>, JsonRejection>,
) -> ApiResult<SizingResponse> {
    let Json(cfg) = body.map_err(|e| {
        tracing::info!(error = %e.body_text(), "rejected sizing request");
        (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(e.body_text())))
    })?;
    size(&state, &cfg)
}

/// Sizes a built-in preset.
///
/// `GET /presets/{name}` → 200 + `SizingResponse` JSON
/// unknown preset → 404 + `ErrorResponse`
pub async fn get_preset(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> ApiResult<SizingResponse> {
    let cfg = SiteConfig::from_preset(&name)
        .map_err(|e| (StatusCode::NOT_FOUND, Json(ErrorResponse::new(e.to_string()))))?;
    size(&state, &cfg)
}

fn size(state: &AppState, cfg: &SiteConfig) -> ApiResult<SizingResponse> {
    SizingResponse::build(&state.engine, cfg)
        .map(Json)
        .map_err(|errors| {
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::from_config_errors(&errors)),
            )
        })
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use tower::util::ServiceExt;

    use super::*;
    use crate::api::router;
    use crate::sizing::SizingEngine;

    fn make_test_state() -> Arc<AppState> {
        Arc::new(AppState {
            engine: SizingEngine::new(),
        })
    }

    async fn body_json(resp: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn catalog_returns_200() {
        let app = router(make_test_state());
        let req = Request::builder()
            .uri("/catalog")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["models"].as_array().map(Vec::len), Some(3));
        assert_eq!(json["scenarios"][2]["scenario"], "generator_hybrid");
    }

    #[tokio::test]
    async fn size_returns_result() {
        let app = router(make_test_state());
        let body = r#"{"site":{"scenario":"grid_augmentation","transformer_kva":500,"contract_kw":400,"base_load_kw":30},
            "loads":[{"name":"Crane","kw":80,"starter":"vfd"},{"name":"Hoist","kw":30,"starter":"soft_starter"}]}"#;
        let req = Request::builder()
            .method("POST")
            .uri("/size")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["result"]["total_peak_load_kw"], 530.0);
        assert_eq!(json["result"]["recommended_model"]["id"], "bess-500");
        assert_eq!(json["result"]["fit_status"], "perfect");
    }

    #[tokio::test]
    async fn malformed_body_returns_400() {
        let app = router(make_test_state());
        let req = Request::builder()
            .method("POST")
            .uri("/size")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"site":{"transformer_kva":"big"}}"#))
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json = body_json(resp).await;
        assert!(json.get("error").is_some());
    }

    #[tokio::test]
    async fn unknown_preset_returns_404() {
        let app = router(make_test_state());
        let req = Request::builder()
            .uri("/presets/offshore")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
