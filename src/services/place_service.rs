// src/services/place_service.rs
// DOCUMENTATION: Business logic for places
// PURPOSE: Intermediary between handlers and repository; owns validation order and flushing

use crate::db::{CityRepository, PlaceRepository, UserRepository};
use crate::errors::ApiError;
use crate::models::{CreatePlaceRequest, Kind, Place, UpdatePlaceRequest, PLACE_PROTECTED_KEYS};
use crate::services::payload;
use crate::storage::Storage;

pub struct PlaceService;

impl PlaceService {
    /// List the places of a city
    pub async fn list_by_city(storage: &dyn Storage, city_id: &str) -> Result<Vec<Place>, ApiError> {
        let city = CityRepository::get_by_id(storage, city_id).await?;
        PlaceRepository::list_by_city(storage, &city.id).await
    }

    pub async fn get_place(storage: &dyn Storage, id: &str) -> Result<Place, ApiError> {
        PlaceRepository::get_by_id(storage, id).await
    }

    /// Delete a place and its reviews, then flush
    pub async fn delete_place(storage: &dyn Storage, id: &str) -> Result<(), ApiError> {
        PlaceRepository::get_by_id(storage, id).await?;
        let reviews_removed = PlaceRepository::delete_place(storage, id).await?;
        storage.save().await?;

        log::info!("Deleted place {} and {} review(s)", id, reviews_removed);
        Ok(())
    }

    /// Create a place under a city
    /// DOCUMENTATION: Checks run in a fixed order so the reported error is
    /// deterministic: city, body shape, user_id, name, user, then field types.
    /// The path's city id is bound onto the record; a body `city_id` is discarded.
    pub async fn create_place(
        storage: &dyn Storage,
        city_id: &str,
        body: &[u8],
    ) -> Result<Place, ApiError> {
        let city = CityRepository::get_by_id(storage, city_id).await?;

        let mut payload = payload::parse_object(body)?;
        let user_id = match payload.get("user_id") {
            Some(value) => value.clone(),
            None => return Err(ApiError::bad_request("Missing user_id")),
        };
        if !payload.contains_key("name") {
            return Err(ApiError::bad_request("Missing name"));
        }

        let user_id = user_id
            .as_str()
            .ok_or_else(|| ApiError::not_found(Kind::User, &user_id.to_string()))?;
        UserRepository::get_by_id(storage, user_id).await?;

        payload.remove("city_id");
        let req: CreatePlaceRequest = payload::into_request(payload)?;

        let place = Place::new(city.id, req);
        PlaceRepository::create_place(storage, place.clone()).await?;
        storage.save().await?;

        log::info!("Created place {} in city {}", place.id, place.city_id);
        Ok(place)
    }

    /// Update a place
    /// DOCUMENTATION: Protected keys and keys that are not place fields are
    /// ignored; place fields must be well-typed. Always flushes, even when
    /// nothing changed. A place deleted mid-update stays deleted (NotFound).
    pub async fn update_place(
        storage: &dyn Storage,
        id: &str,
        body: &[u8],
    ) -> Result<Place, ApiError> {
        let mut place = PlaceRepository::get_by_id(storage, id).await?;

        let mut payload = payload::parse_non_empty_object(body)?;
        payload::strip_keys(&mut payload, &PLACE_PROTECTED_KEYS);
        let req: UpdatePlaceRequest = payload::into_request(payload)?;

        if place.apply(req) {
            PlaceRepository::update_place(storage, place.clone()).await?;
        }
        storage.save().await?;

        Ok(place)
    }
}
