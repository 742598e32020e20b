// src/handlers/spots.rs
// DOCUMENTATION: HTTP handlers for spot operations
// PURPOSE: Parse requests, resolve the store client, call services

use crate::errors::SpotsError;
use crate::models::{CreateSpotRequest, NearQuery, SpotCreatedResponse, SpotListResponse};
use crate::services::{SpotService, SupabaseClient};
use actix_web::{http::header, web, HttpRequest, HttpResponse, Responder};

/// Extract the bearer credential from the authorization header
fn bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}

/// GET /spots
/// List spots visible to the caller
pub async fn list_spots(
    store: web::Data<SupabaseClient>,
    req: HttpRequest,
) -> Result<impl Responder, SpotsError> {
    let token = bearer_token(&req);
    let store = store.for_request(token.as_deref());

    let spots = SpotService::list_spots(&store).await?;
    Ok(HttpResponse::Ok().json(SpotListResponse {
        ok: true,
        count: spots.len(),
        spots,
    }))
}

/// GET /spots/near
/// Proximity search around a point
pub async fn near_spots(
    store: web::Data<SupabaseClient>,
    req: HttpRequest,
    query: web::Query<NearQuery>,
) -> Result<impl Responder, SpotsError> {
    let token = bearer_token(&req);
    let store = store.for_request(token.as_deref());

    let spots = SpotService::near_spots(&store, &query).await?;
    Ok(HttpResponse::Ok().json(SpotListResponse {
        ok: true,
        count: spots.len(),
        spots,
    }))
}

/// POST /spots
/// Create a new spot under the caller's identity
pub async fn create_spot(
    store: web::Data<SupabaseClient>,
    req: HttpRequest,
    body: web::Json<CreateSpotRequest>,
) -> Result<impl Responder, SpotsError> {
    let token = match bearer_token(&req) {
        Some(token) => token,
        None => return Err(SpotsError::Unauthorized),
    };
    let store = store.for_request(Some(&token));

    let spot = SpotService::create_spot(&store, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(SpotCreatedResponse { ok: true, spot }))
}

/// Configuration for spot routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/spots")
            .route("", web::get().to(list_spots))
            .route("", web::post().to(create_spot))
            .route("/near", web::get().to(near_spots)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use serde_json::{json, Value};

    /// Store client pointing at a closed port; requests that reach it fail
    /// fast, and the cases below never get that far anyway
    fn offline_store() -> SupabaseClient {
        SupabaseClient::from_config(&Config {
            supabase_url: "http://127.0.0.1:1".to_string(),
            supabase_anon_key: "anon-key".to_string(),
            server_address: "127.0.0.1".to_string(),
            server_port: 3000,
            environment: "test".to_string(),
            log_level: "debug".to_string(),
        })
    }

    #[actix_rt::test]
    async fn test_near_without_lat_is_rejected_before_any_remote_call() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(offline_store()))
                .service(web::scope("/api/v1").configure(config)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/v1/spots/near?lng=-68.83")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["ok"], Value::Bool(false));
        assert!(body["error"].as_str().unwrap().contains("lat"));
    }

    #[actix_rt::test]
    async fn test_create_without_authorization_header_is_unauthorized() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(offline_store()))
                .service(web::scope("/api/v1").configure(config)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/spots")
            .set_json(json!({"name": "Test", "lat": -32.89, "lng": -68.83}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["ok"], Value::Bool(false));
        assert_eq!(body["error"], Value::String("Not authorized".to_string()));
    }

    #[actix_rt::test]
    async fn test_create_with_unresolvable_identity_is_unauthorized() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(offline_store()))
                .service(web::scope("/api/v1").configure(config)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/spots")
            .insert_header((header::AUTHORIZATION, "Bearer not-a-real-token"))
            .set_json(json!({"name": "Test", "lat": -32.89, "lng": -68.83}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[::core::prelude::v1::test]
    fn test_bearer_token_extraction() {
        let req = test::TestRequest::get()
            .insert_header((header::AUTHORIZATION, "Bearer abc123"))
            .to_http_request();
        assert_eq!(bearer_token(&req), Some("abc123".to_string()));

        let req = test::TestRequest::get()
            .insert_header((header::AUTHORIZATION, "Basic abc123"))
            .to_http_request();
        assert_eq!(bearer_token(&req), None);

        let req = test::TestRequest::get().to_http_request();
        assert_eq!(bearer_token(&req), None);
    }
}
