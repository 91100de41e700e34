// src/test_support.rs
// DOCUMENTATION: Shared fixtures for unit tests
// PURPOSE: In-memory storage seeded with the parents places and reviews hang off

use crate::models::{
    City, CreatePlaceRequest, CreateReviewRequest, Entity, Kind, Place, Record, Review, User,
};
use crate::storage::{FileStorage, Storage, StorageError};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub fn memory_storage() -> Arc<FileStorage> {
    Arc::new(FileStorage::in_memory())
}

pub async fn seed_city(storage: &dyn Storage, name: &str) -> City {
    let city = City::new("state-test", name);
    storage.new(city.clone().into_record()).await.unwrap();
    city
}

pub async fn seed_user(storage: &dyn Storage, email: &str) -> User {
    let user = User::new(email, "Test", "User");
    storage.new(user.clone().into_record()).await.unwrap();
    user
}

pub async fn seed_place(storage: &dyn Storage, city: &City, user: &User, name: &str) -> Place {
    let place = Place::new(
        city.id.clone(),
        CreatePlaceRequest {
            user_id: user.id.clone(),
            name: name.to_string(),
            description: String::new(),
            number_rooms: 2,
            number_bathrooms: 1,
            max_guest: 4,
            price_by_night: 100,
            latitude: 37.77,
            longitude: -122.41,
        },
    );
    storage.new(place.clone().into_record()).await.unwrap();
    place
}

pub async fn seed_review(storage: &dyn Storage, place: &Place, user: &User, text: &str) -> Review {
    let review = Review::new(
        place.id.clone(),
        CreateReviewRequest {
            user_id: user.id.clone(),
            text: text.to_string(),
        },
    );
    storage.new(review.clone().into_record()).await.unwrap();
    review
}

/// Storage that deletes one record right after the first time it is read,
/// standing in for a concurrent DELETE between a lookup and the write
pub struct DeleteAfterGet {
    inner: Arc<FileStorage>,
    target: (Kind, String),
    fired: AtomicBool,
}

impl DeleteAfterGet {
    pub fn new(inner: Arc<FileStorage>, kind: Kind, id: &str) -> Self {
        Self {
            inner,
            target: (kind, id.to_string()),
            fired: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl Storage for DeleteAfterGet {
    async fn get(&self, kind: Kind, id: &str) -> Result<Option<Record>, StorageError> {
        let found = self.inner.get(kind, id).await?;
        if (kind, id) == (self.target.0, self.target.1.as_str())
            && !self.fired.swap(true, Ordering::SeqCst)
        {
            self.inner.delete(kind, id).await?;
        }
        Ok(found)
    }

    async fn all(&self, kind: Kind) -> Result<Vec<Record>, StorageError> {
        self.inner.all(kind).await
    }

    async fn children(&self, kind: Kind, parent_id: &str) -> Result<Vec<Record>, StorageError> {
        self.inner.children(kind, parent_id).await
    }

    async fn count(&self, kind: Kind) -> Result<usize, StorageError> {
        self.inner.count(kind).await
    }

    async fn new(&self, record: Record) -> Result<(), StorageError> {
        self.inner.new(record).await
    }

    async fn replace(&self, record: Record) -> Result<bool, StorageError> {
        self.inner.replace(record).await
    }

    async fn attach(&self, record: Record) -> Result<bool, StorageError> {
        self.inner.attach(record).await
    }

    async fn delete(&self, kind: Kind, id: &str) -> Result<bool, StorageError> {
        self.inner.delete(kind, id).await
    }

    async fn save(&self) -> Result<(), StorageError> {
        self.inner.save().await
    }
}

/// Build the full application around `$storage` (an `Arc<dyn Storage>`)
macro_rules! init_test_app {
    ($storage:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::from($storage))
                .wrap(actix_web::middleware::NormalizePath::trim())
                .configure($crate::handlers::api_config)
                .default_service(actix_web::web::to($crate::handlers::not_found)),
        )
        .await
    };
}

pub(crate) use init_test_app;
