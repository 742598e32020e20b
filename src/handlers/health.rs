// src/handlers/health.rs
// DOCUMENTATION: Health check handler
// PURPOSE: Simple endpoint to verify service status

use crate::config::Config;
use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

/// GET /health
/// Liveness probe; answers regardless of store availability
pub async fn health_check(config: web::Data<Config>) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "ok": true,
        "env": config.environment,
        "ts": chrono::Utc::now().to_rfc3339(),
    }))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use chrono::DateTime;
    use serde_json::Value;

    fn test_config() -> Config {
        Config {
            supabase_url: "http://127.0.0.1:1".to_string(),
            supabase_anon_key: "anon-key".to_string(),
            server_address: "127.0.0.1".to_string(),
            server_port: 3000,
            environment: "test".to_string(),
            log_level: "debug".to_string(),
        }
    }

    #[actix_rt::test]
    async fn test_health_reports_env_and_parseable_timestamp() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_config()))
                .service(web::scope("/api/v1").configure(config)),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/v1/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["ok"], Value::Bool(true));
        assert_eq!(body["env"], Value::String("test".to_string()));
        assert!(DateTime::parse_from_rfc3339(body["ts"].as_str().unwrap()).is_ok());
    }
}
