// src/handlers/index.rs
// DOCUMENTATION: Service status and record statistics
// PURPOSE: Liveness probe and per-kind record counts

use crate::errors::ApiError;
use crate::models::Kind;
use crate::storage::Storage;
use actix_web::{web, HttpResponse, Responder};
use serde_json::{json, Map, Value};

/// GET /status
pub async fn status() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "OK" }))
}

/// GET /stats
/// Number of stored records of each kind
pub async fn stats(storage: web::Data<dyn Storage>) -> Result<impl Responder, ApiError> {
    let mut counts = Map::new();
    for kind in Kind::ALL {
        let count = storage.count(kind).await?;
        counts.insert(kind.collection_name().to_string(), Value::from(count));
    }

    Ok(HttpResponse::Ok().json(counts))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/status", web::get().to(status))
        .route("/stats", web::get().to(stats));
}
