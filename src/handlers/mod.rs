// src/handlers/mod.rs
// DOCUMENTATION: Handlers module organization
// PURPOSE: Re-export handler components and mount them under the API prefix

pub mod index;
pub mod places;
pub mod reviews;

use actix_web::{web, HttpResponse};
use serde_json::json;

pub use index::config as index_config;
pub use places::config as places_config;
pub use reviews::config as reviews_config;

/// Mount every API route under `/api/v1`
pub fn api_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(index_config)
            .configure(places_config)
            .configure(reviews_config),
    );
}

/// Fallback for unmatched routes
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(json!({ "error": "Not found" }))
}
