// src/handlers/reviews.rs
// DOCUMENTATION: HTTP handlers for review operations

use crate::errors::ApiError;
use crate::models::{Entity, Record};
use crate::services::ReviewService;
use crate::storage::Storage;
use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

/// GET /places/{place_id}/reviews
pub async fn list_place_reviews(
    storage: web::Data<dyn Storage>,
    path: web::Path<String>,
) -> Result<impl Responder, ApiError> {
    let reviews = ReviewService::list_by_place(storage.get_ref(), &path.into_inner()).await?;
    let body: Vec<Record> = reviews.into_iter().map(Entity::into_record).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// POST /places/{place_id}/reviews
pub async fn create_review(
    storage: web::Data<dyn Storage>,
    path: web::Path<String>,
    body: web::Bytes,
) -> Result<impl Responder, ApiError> {
    let review = ReviewService::create_review(storage.get_ref(), &path.into_inner(), &body).await?;
    Ok(HttpResponse::Created().json(review.into_record()))
}

/// GET /reviews/{review_id}
pub async fn get_review(
    storage: web::Data<dyn Storage>,
    path: web::Path<String>,
) -> Result<impl Responder, ApiError> {
    let review = ReviewService::get_review(storage.get_ref(), &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(review.into_record()))
}

/// PUT /reviews/{review_id}
pub async fn update_review(
    storage: web::Data<dyn Storage>,
    path: web::Path<String>,
    body: web::Bytes,
) -> Result<impl Responder, ApiError> {
    let review = ReviewService::update_review(storage.get_ref(), &path.into_inner(), &body).await?;
    Ok(HttpResponse::Ok().json(review.into_record()))
}

/// DELETE /reviews/{review_id}
pub async fn delete_review(
    storage: web::Data<dyn Storage>,
    path: web::Path<String>,
) -> Result<impl Responder, ApiError> {
    ReviewService::delete_review(storage.get_ref(), &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({})))
}

/// Configuration for review routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/places/{place_id}/reviews", web::get().to(list_place_reviews))
        .route("/places/{place_id}/reviews", web::post().to(create_review))
        .route("/reviews/{review_id}", web::get().to(get_review))
        .route("/reviews/{review_id}", web::put().to(update_review))
        .route("/reviews/{review_id}", web::delete().to(delete_review));
}
