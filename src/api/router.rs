//! API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Routes are nested under `/api/`.
//!
//! Middleware stack (outermost → innermost):
//! 1. CORS → 2. Access logger

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::HeaderName;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;

/// Build the API router with all endpoints under `/api/`.
///
/// NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
pub fn api_router(ctx: ApiContext) -> Router {
    let routes = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/health-analysis", post(endpoints::analysis::analyze))
        .route("/chat", post(endpoints::chat::send))
        .route("/users/:user_id/searches", get(endpoints::searches::list))
        .route("/users/:user_id/dashboard", get(endpoints::dashboard::summary))
        .route(
            "/searches/:id",
            get(endpoints::searches::detail).delete(endpoints::searches::remove),
        )
        .route(
            "/profiles/:user_id",
            get(endpoints::profiles::fetch).put(endpoints::profiles::save),
        )
        .route("/emergency", get(endpoints::emergency::contacts))
        .with_state(ctx);

    Router::new()
        .nest("/api", routes)
        .layer(axum::middleware::from_fn(middleware::access_log::log_access))
        .layer(cors_layer())
}

/// Browser clients call from any origin.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers([
            AUTHORIZATION,
            CONTENT_TYPE,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
        ])
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::analysis::test_support::StaticCompletion;
    use crate::api::types::test_support::test_context;
    use crate::gateway::GatewayError;

    const FLU_REPLY: &str = "Possible conditions: Flu, Common Cold\n\
        Diet recommendations: Warm soup and fluids.\n\
        Activity recommendations: Rest in bed.";

    fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn response_json(response: axum::http::Response<Body>) -> Value {
        let body = axum::body::to_bytes(response.into_body(), 65536)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    fn chat_body(user_id: &str, message: &str) -> Value {
        json!({
            "history": [],
            "message": message,
            "severityLevel": "medium",
            "userId": user_id,
            "location": "  Pune ",
        })
    }

    #[tokio::test]
    async fn health_response_shape() {
        let (ctx, _tmp) = test_context(Arc::new(StaticCompletion::replying("ok")));
        let app = api_router(ctx);

        let response = app.oneshot(get_request("/api/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["version"], crate::config::APP_VERSION);
        assert_eq!(json["gatewayConfigured"], true);
    }

    #[tokio::test]
    async fn not_found_for_unknown_route() {
        let (ctx, _tmp) = test_context(Arc::new(StaticCompletion::replying("ok")));
        let app = api_router(ctx);

        let response = app.oneshot(get_request("/api/nonexistent")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn cors_preflight_allows_client_headers() {
        let (ctx, _tmp) = test_context(Arc::new(StaticCompletion::replying("ok")));
        let app = api_router(ctx);

        let req = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/health-analysis")
            .header("Origin", "https://app.example")
            .header("Access-Control-Request-Method", "POST")
            .header("Access-Control-Request-Headers", "apikey, x-client-info")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(req).await.unwrap();

        assert!(response.status().is_success());
        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "*"
        );
        let allowed = response.headers()["access-control-allow-headers"]
            .to_str()
            .unwrap()
            .to_ascii_lowercase();
        assert!(allowed.contains("apikey"));
        assert!(allowed.contains("x-client-info"));
    }

    #[tokio::test]
    async fn health_analysis_response_shape() {
        let (ctx, _tmp) = test_context(Arc::new(StaticCompletion::replying(FLU_REPLY)));
        let app = api_router(ctx);

        let req = json_request(
            Method::POST,
            "/api/health-analysis",
            json!({
                "messages": [{"role": "user", "content": "I have a fever"}],
                "severityLevel": "low",
                "userId": "user-1",
            }),
        );
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        assert_eq!(json["response"], FLU_REPLY);
        assert_eq!(json["diseases"], json!(["Flu", "Common Cold"]));
        assert_eq!(json["recommendations"]["diet"], "Warm soup and fluids.");
        assert_eq!(json["recommendations"]["activities"], "Rest in bed.");
        assert!(json["recommendations"].get("lifestyle").is_none());
        assert_eq!(json["emergency"], false);
    }

    #[tokio::test]
    async fn health_analysis_rate_limit_returns_429() {
        let (ctx, _tmp) = test_context(Arc::new(StaticCompletion::failing(|| {
            GatewayError::RateLimited
        })));
        let app = api_router(ctx);

        let req = json_request(
            Method::POST,
            "/api/health-analysis",
            json!({
                "messages": [{"role": "user", "content": "headache"}],
                "severityLevel": "low",
                "userId": "user-1",
            }),
        );
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

        let json = response_json(response).await;
        assert_eq!(json["error"], "Rate limit exceeded. Please try again later.");
        assert_eq!(json["code"], "RATE_LIMITED");
    }

    #[tokio::test]
    async fn health_analysis_payment_required_returns_402() {
        let (ctx, _tmp) = test_context(Arc::new(StaticCompletion::failing(|| {
            GatewayError::PaymentRequired
        })));
        let app = api_router(ctx);

        let req = json_request(
            Method::POST,
            "/api/health-analysis",
            json!({
                "messages": [{"role": "user", "content": "headache"}],
                "severityLevel": "medium",
            }),
        );
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYMENT_REQUIRED);
    }

    #[tokio::test]
    async fn health_analysis_rejects_bad_body() {
        let (ctx, _tmp) = test_context(Arc::new(StaticCompletion::replying("ok")));
        let app = api_router(ctx);

        let req = json_request(
            Method::POST,
            "/api/health-analysis",
            json!({"messages": [], "severityLevel": "extreme"}),
        );
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = response_json(response).await;
        assert_eq!(json["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn health_analysis_rejects_empty_messages() {
        let (ctx, _tmp) = test_context(Arc::new(StaticCompletion::replying("ok")));
        let app = api_router(ctx);

        let req = json_request(
            Method::POST,
            "/api/health-analysis",
            json!({"messages": [], "severityLevel": "low"}),
        );
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn chat_send_persists_search() {
        let (ctx, _tmp) = test_context(Arc::new(StaticCompletion::replying(FLU_REPLY)));

        let response = api_router(ctx.clone())
            .oneshot(json_request(
                Method::POST,
                "/api/chat",
                chat_body("user-1", "  fever and chills  "),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        assert_eq!(json["reply"]["role"], "assistant");
        assert_eq!(json["reply"]["content"], FLU_REPLY);
        assert_eq!(json["diseases"], json!(["Flu", "Common Cold"]));
        let search_id = json["searchId"].as_str().unwrap().to_string();

        let response = api_router(ctx)
            .oneshot(get_request(&format!("/api/searches/{search_id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let stored = response_json(response).await;
        assert_eq!(stored["user_id"], "user-1");
        assert_eq!(stored["symptoms"], "fever and chills");
        assert_eq!(stored["severity_level"], "medium");
        assert_eq!(stored["search_location"], "Pune");
        assert_eq!(stored["predicted_diseases"], json!(["Flu", "Common Cold"]));
        assert_eq!(stored["emergency_triggered"], false);
    }

    #[tokio::test]
    async fn chat_send_passes_history_to_generator() {
        let generator = Arc::new(StaticCompletion::replying("Drink water."));
        let (ctx, _tmp) = test_context(generator.clone());

        let body = json!({
            "history": [
                {"role": "user", "content": "I feel dizzy"},
                {"role": "assistant", "content": "Since when?"},
            ],
            "message": "Since this morning",
            "severityLevel": "low",
            "userId": "user-1",
        });
        let response = api_router(ctx)
            .oneshot(json_request(Method::POST, "/api/chat", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let seen = generator.seen.lock().unwrap();
        assert_eq!(seen[0].len(), 3);
        assert_eq!(seen[0][2].content, "Since this morning");
    }

    #[tokio::test]
    async fn chat_send_validates_empty_message() {
        let generator = Arc::new(StaticCompletion::replying("unused"));
        let (ctx, _tmp) = test_context(generator.clone());

        let response = api_router(ctx)
            .oneshot(json_request(Method::POST, "/api/chat", chat_body("user-1", "   ")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(generator.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn chat_failure_returns_fallback_and_persists_nothing() {
        let (ctx, _tmp) = test_context(Arc::new(StaticCompletion::failing(|| {
            GatewayError::RateLimited
        })));

        let response = api_router(ctx.clone())
            .oneshot(json_request(
                Method::POST,
                "/api/chat",
                chat_body("user-1", "headache"),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

        let json = response_json(response).await;
        assert_eq!(json["error"], "Rate limit exceeded. Please try again later.");
        assert_eq!(json["reply"]["role"], "assistant");
        assert_eq!(
            json["reply"]["content"],
            "I apologize, but I encountered an error. Please try again."
        );

        let response = api_router(ctx)
            .oneshot(get_request("/api/users/user-1/searches"))
            .await
            .unwrap();
        let json = response_json(response).await;
        assert_eq!(json["searches"], json!([]));
    }

    #[tokio::test]
    async fn searches_list_newest_first_and_delete() {
        let (ctx, _tmp) = test_context(Arc::new(StaticCompletion::replying(FLU_REPLY)));

        for message in ["first", "second", "third"] {
            let response = api_router(ctx.clone())
                .oneshot(json_request(
                    Method::POST,
                    "/api/chat",
                    chat_body("user-1", message),
                ))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let response = api_router(ctx.clone())
            .oneshot(get_request("/api/users/user-1/searches?limit=2"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        let searches = json["searches"].as_array().unwrap();
        assert_eq!(searches.len(), 2);
        assert_eq!(searches[0]["symptoms"], "third");
        assert_eq!(searches[1]["symptoms"], "second");

        let id = searches[0]["id"].as_str().unwrap().to_string();
        let uri = format!("/api/searches/{id}");
        let delete = Request::builder()
            .method(Method::DELETE)
            .uri(&uri)
            .body(Body::empty())
            .unwrap();
        let response = api_router(ctx.clone()).oneshot(delete).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = api_router(ctx.clone())
            .oneshot(get_request(&uri))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = api_router(ctx)
            .oneshot(get_request("/api/users/user-1/searches"))
            .await
            .unwrap();
        let json = response_json(response).await;
        assert_eq!(json["searches"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn search_detail_rejects_invalid_id() {
        let (ctx, _tmp) = test_context(Arc::new(StaticCompletion::replying("ok")));
        let response = api_router(ctx)
            .oneshot(get_request("/api/searches/not-a-uuid"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn delete_missing_search_returns_404() {
        let (ctx, _tmp) = test_context(Arc::new(StaticCompletion::replying("ok")));
        let req = Request::builder()
            .method(Method::DELETE)
            .uri(format!("/api/searches/{}", uuid::Uuid::new_v4()))
            .body(Body::empty())
            .unwrap();
        let response = api_router(ctx).oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn profile_upsert_and_fetch() {
        let (ctx, _tmp) = test_context(Arc::new(StaticCompletion::replying("ok")));

        let response = api_router(ctx.clone())
            .oneshot(get_request("/api/profiles/user-1"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = api_router(ctx.clone())
            .oneshot(json_request(
                Method::PUT,
                "/api/profiles/user-1",
                json!({
                    "full_name": "Asha Rao",
                    "age": 34,
                    "gender": "female",
                    "height": 162.5,
                    "weight": 58.0,
                    "medical_history": "",
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let saved = response_json(response).await;
        assert_eq!(saved["full_name"], "Asha Rao");
        assert!(saved["medical_history"].is_null());
        assert!(!saved["updated_at"].is_null());

        // Saving again replaces every field.
        let response = api_router(ctx.clone())
            .oneshot(json_request(
                Method::PUT,
                "/api/profiles/user-1",
                json!({"full_name": "Asha R."}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = api_router(ctx)
            .oneshot(get_request("/api/profiles/user-1"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        assert_eq!(json["user_id"], "user-1");
        assert_eq!(json["full_name"], "Asha R.");
        assert!(json["age"].is_null());
    }

    #[tokio::test]
    async fn profile_rejects_negative_age() {
        let (ctx, _tmp) = test_context(Arc::new(StaticCompletion::replying("ok")));
        let response = api_router(ctx)
            .oneshot(json_request(
                Method::PUT,
                "/api/profiles/user-1",
                json!({"age": -3}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn dashboard_shows_profile_and_five_recent_searches() {
        let (ctx, _tmp) = test_context(Arc::new(StaticCompletion::replying(FLU_REPLY)));

        let response = api_router(ctx.clone())
            .oneshot(get_request("/api/users/user-1/dashboard"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        assert!(json["profile"].is_null());
        assert_eq!(json["recent_searches"], json!([]));

        for i in 0..6 {
            let response = api_router(ctx.clone())
                .oneshot(json_request(
                    Method::POST,
                    "/api/chat",
                    chat_body("user-1", &format!("symptom {i}")),
                ))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }
        api_router(ctx.clone())
            .oneshot(json_request(
                Method::PUT,
                "/api/profiles/user-1",
                json!({"full_name": "Asha"}),
            ))
            .await
            .unwrap();

        let response = api_router(ctx)
            .oneshot(get_request("/api/users/user-1/dashboard"))
            .await
            .unwrap();
        let json = response_json(response).await;
        assert_eq!(json["profile"]["full_name"], "Asha");
        let recent = json["recent_searches"].as_array().unwrap();
        assert_eq!(recent.len(), 5);
        assert_eq!(recent[0]["symptoms"], "symptom 5");
    }

    #[tokio::test]
    async fn emergency_contacts_response_shape() {
        let (ctx, _tmp) = test_context(Arc::new(StaticCompletion::replying("ok")));

        let response = api_router(ctx.clone())
            .oneshot(get_request("/api/emergency?location=New%20Delhi"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        assert_eq!(json["callUri"], "tel:108");
        assert_eq!(
            json["hospitalsUrl"],
            "https://www.google.com/maps/search/hospitals+near+New%20Delhi"
        );

        let response = api_router(ctx)
            .oneshot(get_request("/api/emergency"))
            .await
            .unwrap();
        let json = response_json(response).await;
        assert!(json["hospitalsUrl"].is_null());
    }
}
