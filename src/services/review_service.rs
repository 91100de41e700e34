// src/services/review_service.rs
// DOCUMENTATION: Business logic for reviews
// PURPOSE: Validate review payloads against their place and author, then persist

use crate::db::{PlaceRepository, ReviewRepository, UserRepository};
use crate::errors::ApiError;
use crate::models::{CreateReviewRequest, Kind, Review, UpdateReviewRequest, REVIEW_PROTECTED_KEYS};
use crate::services::payload;
use crate::storage::Storage;

pub struct ReviewService;

impl ReviewService {
    /// List the reviews of a place (keyed lookup of the place, never a scan)
    pub async fn list_by_place(storage: &dyn Storage, place_id: &str) -> Result<Vec<Review>, ApiError> {
        let place = PlaceRepository::get_by_id(storage, place_id).await?;
        ReviewRepository::get_reviews_by_place(storage, &place.id).await
    }

    pub async fn get_review(storage: &dyn Storage, id: &str) -> Result<Review, ApiError> {
        ReviewRepository::get_by_id(storage, id).await
    }

    pub async fn delete_review(storage: &dyn Storage, id: &str) -> Result<(), ApiError> {
        ReviewRepository::delete_review(storage, id).await?;
        storage.save().await?;

        log::info!("Deleted review {}", id);
        Ok(())
    }

    /// Create a review under a place
    /// DOCUMENTATION: Unlike places, the author is looked up before the
    /// `text` check: place, body shape, user_id, user, text, then field types.
    pub async fn create_review(
        storage: &dyn Storage,
        place_id: &str,
        body: &[u8],
    ) -> Result<Review, ApiError> {
        let place = PlaceRepository::get_by_id(storage, place_id).await?;

        let mut payload = payload::parse_non_empty_object(body)?;
        let user_id = match payload.get("user_id") {
            Some(value) => value.clone(),
            None => return Err(ApiError::bad_request("Missing user_id")),
        };

        let user_id = user_id
            .as_str()
            .ok_or_else(|| ApiError::not_found(Kind::User, &user_id.to_string()))?;
        UserRepository::get_by_id(storage, user_id).await?;

        if !payload.contains_key("text") {
            return Err(ApiError::bad_request("Missing text"));
        }

        payload.remove("place_id");
        let req: CreateReviewRequest = payload::into_request(payload)?;

        let review = Review::new(place.id, req);
        ReviewRepository::create_review(storage, review.clone()).await?;
        storage.save().await?;

        log::info!("Created review {} on place {}", review.id, review.place_id);
        Ok(review)
    }

    /// Update a review; only `text` is mutable
    pub async fn update_review(
        storage: &dyn Storage,
        id: &str,
        body: &[u8],
    ) -> Result<Review, ApiError> {
        let mut review = ReviewRepository::get_by_id(storage, id).await?;

        let mut payload = payload::parse_non_empty_object(body)?;
        payload::strip_keys(&mut payload, &REVIEW_PROTECTED_KEYS);
        let req: UpdateReviewRequest = payload::into_request(payload)?;

        if review.apply(req) {
            ReviewRepository::update_review(storage, review.clone()).await?;
        }
        storage.save().await?;

        Ok(review)
    }
}
