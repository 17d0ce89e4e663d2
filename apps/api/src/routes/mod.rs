pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::recommendation::handlers as recommendation;
use crate::state::AppState;
use crate::titles::handlers as titles;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Catalog
        .route("/api/v1/sectors", get(titles::handle_list_sectors))
        .route("/api/v1/titles/check", post(titles::handle_check_title))
        // Recommendations
        .route("/api/v1/recommendations", post(recommendation::handle_recommend))
        .route(
            "/api/v1/recommendations/arbitrate",
            post(recommendation::handle_arbitrate),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use jobmatch::{Engine, GuardMode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;

    fn app(guard_mode: GuardMode) -> Router {
        let config = Config {
            port: 0,
            rust_log: "info".to_string(),
            guard_mode,
            default_top_n: 5,
        };
        let engine = Engine::builtin(config.engine_config()).unwrap();
        build_router(AppState {
            engine: Arc::new(engine),
            config,
        })
    }

    async fn send(
        app: Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let response = app.oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    fn answers() -> Value {
        let mut map = serde_json::Map::new();
        for (i, choice) in ["A", "B", "C"].iter().cycle().take(30).enumerate() {
            map.insert(format!("q{}", i + 1), json!(choice));
        }
        Value::Object(map)
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(app(GuardMode::Permissive), Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "jobmatch-api");
        assert_eq!(body["guard_mode"], "permissive");
    }

    #[tokio::test]
    async fn test_list_sectors() {
        let (status, body) =
            send(app(GuardMode::Permissive), Method::GET, "/api/v1/sectors", None).await;
        assert_eq!(status, StatusCode::OK);
        let sectors = body["sectors"].as_array().unwrap();
        assert_eq!(sectors.len(), 5);
        assert!(sectors
            .iter()
            .any(|s| s["id"] == "droit" && s["has_alternate"] == true));
    }

    #[tokio::test]
    async fn test_recommend() {
        let (status, body) = send(
            app(GuardMode::Strict),
            Method::POST,
            "/api/v1/recommendations",
            Some(json!({"answers": answers(), "sector": "informatique", "top_n": 3})),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "body: {body}");
        assert_eq!(body["sector"], "informatique");
        assert_eq!(body["variant"], "default");
        assert_eq!(body["jobs"].as_array().unwrap().len(), 3);
        assert!(body["profile"]["HUMAN_CONTACT"].is_number());
        assert!(body["needs_arbitration"].is_boolean());
    }

    #[tokio::test]
    async fn test_recommend_unknown_sector_is_404() {
        let (status, body) = send(
            app(GuardMode::Permissive),
            Method::POST,
            "/api/v1/recommendations",
            Some(json!({"answers": {}, "sector": "astronomie"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_recommend_bad_answer_is_400() {
        let (status, body) = send(
            app(GuardMode::Permissive),
            Method::POST,
            "/api/v1/recommendations",
            Some(json!({"answers": {"q31": "A"}, "sector": "droit"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_arbitrate_keeps_only_whitelisted_candidates() {
        let (status, body) = send(
            app(GuardMode::Permissive),
            Method::POST,
            "/api/v1/recommendations/arbitrate",
            Some(json!({
                "answers": answers(),
                "sector": "droit",
                "rerank": {
                    "candidates": [
                        {"title": "Astronaute", "confidence": 0.99},
                        {"title": "juge des enfants", "confidence": 0.81}
                    ],
                    "follow_up_questions": [{"id": "f1"}]
                }
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "body: {body}");
        assert_eq!(body["jobs"], json!([{"title": "Juge des enfants", "score": 0.81}]));
        assert_eq!(body["needs_arbitration"], false);
        assert_eq!(body["follow_up_questions"], json!([{"id": "f1"}]));
    }

    #[tokio::test]
    async fn test_arbitrate_strict_invalid_title_is_422() {
        let (status, body) = send(
            app(GuardMode::Strict),
            Method::POST,
            "/api/v1/recommendations/arbitrate",
            Some(json!({
                "answers": answers(),
                "sector": "droit",
                "rerank": {"candidates": [{"title": "Astronaute", "confidence": 0.99}]}
            })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "INVALID_JOB_TITLE");
    }

    #[tokio::test]
    async fn test_check_title() {
        let (status, body) = send(
            app(GuardMode::Permissive),
            Method::POST,
            "/api/v1/titles/check",
            Some(json!({"sector": "culture_medias", "title": "  producteur"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"allowed": true, "canonical": "Producteur"}));
    }
}
