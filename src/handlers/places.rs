// src/handlers/places.rs
// DOCUMENTATION: HTTP handlers for place operations
// PURPOSE: Parse requests, call services, return responses

use crate::errors::ApiError;
use crate::models::{Entity, Record};
use crate::services::PlaceService;
use crate::storage::Storage;
use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

/// GET /cities/{city_id}/places
/// List the places of a city
pub async fn list_city_places(
    storage: web::Data<dyn Storage>,
    path: web::Path<String>,
) -> Result<impl Responder, ApiError> {
    let places = PlaceService::list_by_city(storage.get_ref(), &path.into_inner()).await?;
    let body: Vec<Record> = places.into_iter().map(Entity::into_record).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// POST /cities/{city_id}/places
/// Create a new place in a city
pub async fn create_place(
    storage: web::Data<dyn Storage>,
    path: web::Path<String>,
    body: web::Bytes,
) -> Result<impl Responder, ApiError> {
    let place = PlaceService::create_place(storage.get_ref(), &path.into_inner(), &body).await?;
    Ok(HttpResponse::Created().json(place.into_record()))
}

/// GET /places/{place_id}
pub async fn get_place(
    storage: web::Data<dyn Storage>,
    path: web::Path<String>,
) -> Result<impl Responder, ApiError> {
    let place = PlaceService::get_place(storage.get_ref(), &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(place.into_record()))
}

/// PUT /places/{place_id}
/// Update a place
pub async fn update_place(
    storage: web::Data<dyn Storage>,
    path: web::Path<String>,
    body: web::Bytes,
) -> Result<impl Responder, ApiError> {
    let place = PlaceService::update_place(storage.get_ref(), &path.into_inner(), &body).await?;
    Ok(HttpResponse::Ok().json(place.into_record()))
}

/// DELETE /places/{place_id}
/// Delete a place and its reviews
pub async fn delete_place(
    storage: web::Data<dyn Storage>,
    path: web::Path<String>,
) -> Result<impl Responder, ApiError> {
    PlaceService::delete_place(storage.get_ref(), &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({})))
}

/// Configuration for place routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/cities/{city_id}/places", web::get().to(list_city_places))
        .route("/cities/{city_id}/places", web::post().to(create_place))
        .route("/places/{place_id}", web::get().to(get_place))
        .route("/places/{place_id}", web::put().to(update_place))
        .route("/places/{place_id}", web::delete().to(delete_place));
}
