use std::sync::Arc;

use axum::{routing::get, Json, Router};
use service::directory::DirectoryRepository;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::openapi::ApiDoc;

pub mod directories;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct ServerState {
    pub directories: Arc<dyn DirectoryRepository>,
}

impl ServerState {
    pub fn new(directories: Arc<dyn DirectoryRepository>) -> Self {
        Self { directories }
    }
}

#[utoipa::path(get, path = "/status", tag = "health", responses((status = 200, description = "Service alive", body = String, content_type = "text/plain")))]
pub async fn status() -> &'static str {
    "pong"
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router: docs at the root, health check and
/// the directory resource.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route("/status", get(status))
        .route("/directories", get(directories::list).post(directories::create))
        .route(
            "/directories/:id",
            get(directories::get)
                .put(directories::replace)
                .patch(directories::patch)
                .delete(directories::delete),
        )
        .with_state(state);

    let docs = Router::new()
        .route("/", get(openapi_json))
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()));

    docs.merge(api)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use service::directory::DirectoryStore;
    use tower::ServiceExt;

    async fn test_router() -> (Router, std::path::PathBuf) {
        let path = std::env::temp_dir()
            .join(format!("routes_{}", uuid::Uuid::new_v4()))
            .join("bd.json");
        let store = DirectoryStore::new(&path).await.expect("store init");
        (build_router(ServerState::new(store), CorsLayer::very_permissive()), path)
    }

    #[tokio::test]
    async fn status_answers_pong() {
        let (app, path) = test_router().await;
        let res = app
            .oneshot(Request::builder().uri("/status").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"pong");
        let _ = tokio::fs::remove_dir_all(path.parent().unwrap()).await;
    }

    #[tokio::test]
    async fn root_serves_openapi_document() {
        let (app, path) = test_router().await;
        let res = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let doc: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(doc["openapi"].as_str().unwrap().starts_with("3."));
        assert!(doc["paths"]["/directories/{id}"].is_object());
        assert!(doc["paths"]["/status"]["get"].is_object());
        let _ = tokio::fs::remove_dir_all(path.parent().unwrap()).await;
    }

    #[tokio::test]
    async fn unknown_path_is_404() {
        let (app, path) = test_router().await;
        let res = app
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let _ = tokio::fs::remove_dir_all(path.parent().unwrap()).await;
    }
}
