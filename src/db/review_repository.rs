// src/db/review_repository.rs
// DOCUMENTATION: Review storage operations
// PURPOSE: Handle CRUD operations for place reviews

use super::repository::{children, get};
use crate::errors::ApiError;
use crate::models::{Entity, Kind, Review};
use crate::storage::Storage;

pub struct ReviewRepository;

impl ReviewRepository {
    pub async fn get_by_id(storage: &dyn Storage, id: &str) -> Result<Review, ApiError> {
        get(storage, id).await
    }

    /// Get reviews for a place
    /// DOCUMENTATION: Keyed through the parent index, oldest first
    pub async fn get_reviews_by_place(
        storage: &dyn Storage,
        place_id: &str,
    ) -> Result<Vec<Review>, ApiError> {
        children(storage, place_id).await
    }

    /// Insert a new review, NotFound if its place is gone
    pub async fn create_review(storage: &dyn Storage, review: Review) -> Result<(), ApiError> {
        let place_id = review.place_id.clone();
        if !storage.attach(review.into_record()).await? {
            return Err(ApiError::not_found(Kind::Place, &place_id));
        }
        Ok(())
    }

    /// Overwrite an existing review, NotFound if it was deleted meanwhile
    pub async fn update_review(storage: &dyn Storage, review: Review) -> Result<(), ApiError> {
        let id = review.id.clone();
        if !storage.replace(review.into_record()).await? {
            return Err(ApiError::not_found(Kind::Review, &id));
        }
        Ok(())
    }

    pub async fn delete_review(storage: &dyn Storage, id: &str) -> Result<(), ApiError> {
        if storage.delete(Kind::Review, id).await? {
            Ok(())
        } else {
            Err(ApiError::not_found(Kind::Review, id))
        }
    }
}
