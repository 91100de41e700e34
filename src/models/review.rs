// src/models/review.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Keys an update request may carry but never changes
pub const REVIEW_PROTECTED_KEYS: [&str; 6] = [
    "id",
    "user_id",
    "place_id",
    "created_at",
    "updated_at",
    "__class__",
];

/// Review left by a user on a place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub place_id: String,
    pub user_id: String,
    pub text: String,
}

/// Request to create a new review
/// DOCUMENTATION: Body of POST /places/{place_id}/reviews once the path's
/// place id has been bound
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateReviewRequest {
    pub user_id: String,

    #[validate(length(max = 1024))]
    pub text: String,
}

/// Request to update a review; only `text` is mutable, other keys are ignored
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateReviewRequest {
    #[validate(length(max = 1024))]
    pub text: Option<String>,
}

impl Review {
    pub fn new(place_id: impl Into<String>, req: CreateReviewRequest) -> Self {
        let now = Utc::now();
        Review {
            id: Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
            place_id: place_id.into(),
            user_id: req.user_id,
            text: req.text,
        }
    }

    /// Apply the provided fields; returns whether the record changed
    pub fn apply(&mut self, req: UpdateReviewRequest) -> bool {
        match req.text {
            Some(text) => {
                self.text = text;
                self.updated_at = Utc::now();
                true
            }
            None => false,
        }
    }
}
