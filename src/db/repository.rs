// src/db/repository.rs
// DOCUMENTATION: Typed access layer over the storage facade
// PURPOSE: Abstract record lookups and mutations from business logic

use crate::errors::ApiError;
use crate::models::{City, Entity, Kind, Place, User};
use crate::storage::Storage;

/// Fetch a record of type `T`, `None` when absent
pub async fn find<T: Entity>(storage: &dyn Storage, id: &str) -> Result<Option<T>, ApiError> {
    Ok(storage.get(T::KIND, id).await?.and_then(T::from_record))
}

/// Fetch a record of type `T`, NotFound when absent
pub async fn get<T: Entity>(storage: &dyn Storage, id: &str) -> Result<T, ApiError> {
    find(storage, id)
        .await?
        .ok_or_else(|| ApiError::not_found(T::KIND, id))
}

/// Children of type `T` owned by `parent_id`, oldest first
pub async fn children<T: Entity>(storage: &dyn Storage, parent_id: &str) -> Result<Vec<T>, ApiError> {
    Ok(storage
        .children(T::KIND, parent_id)
        .await?
        .into_iter()
        .filter_map(T::from_record)
        .collect())
}

/// Read-only lookups for cities
pub struct CityRepository;

impl CityRepository {
    pub async fn get_by_id(storage: &dyn Storage, id: &str) -> Result<City, ApiError> {
        get(storage, id).await
    }
}

/// Read-only lookups for users
pub struct UserRepository;

impl UserRepository {
    pub async fn get_by_id(storage: &dyn Storage, id: &str) -> Result<User, ApiError> {
        get(storage, id).await
    }
}

/// PlaceRepository: All storage operations for places
/// DOCUMENTATION: Mutations are staged; callers flush with `Storage::save`
pub struct PlaceRepository;

impl PlaceRepository {
    pub async fn get_by_id(storage: &dyn Storage, id: &str) -> Result<Place, ApiError> {
        get(storage, id).await
    }

    /// Places of a city in creation order
    pub async fn list_by_city(storage: &dyn Storage, city_id: &str) -> Result<Vec<Place>, ApiError> {
        children(storage, city_id).await
    }

    /// Insert a new place, NotFound if its city is gone
    pub async fn create_place(storage: &dyn Storage, place: Place) -> Result<(), ApiError> {
        let city_id = place.city_id.clone();
        if !storage.attach(place.into_record()).await? {
            return Err(ApiError::not_found(Kind::City, &city_id));
        }
        Ok(())
    }

    /// Overwrite an existing place, NotFound if it was deleted meanwhile
    pub async fn update_place(storage: &dyn Storage, place: Place) -> Result<(), ApiError> {
        let id = place.id.clone();
        if !storage.replace(place.into_record()).await? {
            return Err(ApiError::not_found(Kind::Place, &id));
        }
        Ok(())
    }

    /// Remove a place together with its reviews
    /// DOCUMENTATION: The place goes first so no review can be attached to it
    /// afterwards. Returns the number of reviews removed alongside.
    pub async fn delete_place(storage: &dyn Storage, id: &str) -> Result<usize, ApiError> {
        if !storage.delete(Kind::Place, id).await? {
            return Err(ApiError::not_found(Kind::Place, id));
        }

        let review_ids: Vec<String> = storage
            .children(Kind::Review, id)
            .await?
            .iter()
            .map(|review| review.id().to_string())
            .collect();

        for review_id in &review_ids {
            storage.delete(Kind::Review, review_id).await?;
        }

        Ok(review_ids.len())
    }
}
