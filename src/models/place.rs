// src/models/place.rs
// DOCUMENTATION: Core data structures for places
// PURPOSE: Defines the stored place record and the typed request bodies that build and patch it

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Keys an update request may carry but never changes
/// DOCUMENTATION: Identity, timestamps and relationships are fixed after creation
pub const PLACE_PROTECTED_KEYS: [&str; 6] = [
    "id",
    "user_id",
    "city_id",
    "created_at",
    "updated_at",
    "__class__",
];

/// Represents a complete place record
/// DOCUMENTATION: Serialized flat into the store file and API responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Unique identifier (UUID v4)
    pub id: String,

    /// When record was created
    pub created_at: DateTime<Utc>,

    /// When record was last modified
    pub updated_at: DateTime<Utc>,

    /// Owning city, bound from the request path at creation
    pub city_id: String,

    /// Owning user
    pub user_id: String,

    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub number_rooms: u32,

    #[serde(default)]
    pub number_bathrooms: u32,

    #[serde(default)]
    pub max_guest: u32,

    #[serde(default)]
    pub price_by_night: u32,

    #[serde(default)]
    pub latitude: f64,

    #[serde(default)]
    pub longitude: f64,
}

/// Request DTO for creating a new place
/// DOCUMENTATION: Body of POST /cities/{city_id}/places once the path's city
/// id has been bound. Unknown and server-managed keys are rejected.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreatePlaceRequest {
    pub user_id: String,

    #[validate(length(max = 128))]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 1024))]
    pub description: String,

    #[serde(default)]
    pub number_rooms: u32,

    #[serde(default)]
    pub number_bathrooms: u32,

    #[serde(default)]
    pub max_guest: u32,

    #[serde(default)]
    pub price_by_night: u32,

    #[serde(default)]
    #[validate(custom = "validate_latitude")]
    pub latitude: f64,

    #[serde(default)]
    #[validate(custom = "validate_longitude")]
    pub longitude: f64,
}

/// Request DTO for updating an existing place
/// DOCUMENTATION: Body of PUT /places/{id} after protected keys are stripped.
/// All fields are optional - only provided fields are updated, keys that are
/// not place fields are ignored
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdatePlaceRequest {
    #[validate(length(max = 128))]
    pub name: Option<String>,

    #[validate(length(max = 1024))]
    pub description: Option<String>,

    pub number_rooms: Option<u32>,

    pub number_bathrooms: Option<u32>,

    pub max_guest: Option<u32>,

    pub price_by_night: Option<u32>,

    #[validate(custom = "validate_latitude")]
    pub latitude: Option<f64>,

    #[validate(custom = "validate_longitude")]
    pub longitude: Option<f64>,
}

fn validate_latitude(latitude: f64) -> Result<(), ValidationError> {
    if (-90.0..=90.0).contains(&latitude) {
        Ok(())
    } else {
        Err(ValidationError::new("latitude_out_of_range"))
    }
}

fn validate_longitude(longitude: f64) -> Result<(), ValidationError> {
    if (-180.0..=180.0).contains(&longitude) {
        Ok(())
    } else {
        Err(ValidationError::new("longitude_out_of_range"))
    }
}

impl Place {
    /// Build a new place owned by `city_id` from a validated request
    pub fn new(city_id: impl Into<String>, req: CreatePlaceRequest) -> Self {
        let now = Utc::now();
        Place {
            id: Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
            city_id: city_id.into(),
            user_id: req.user_id,
            name: req.name,
            description: req.description,
            number_rooms: req.number_rooms,
            number_bathrooms: req.number_bathrooms,
            max_guest: req.max_guest,
            price_by_night: req.price_by_night,
            latitude: req.latitude,
            longitude: req.longitude,
        }
    }

    /// Apply every provided field of `req`
    /// DOCUMENTATION: Refreshes `updated_at` only when something was set.
    /// Returns whether the record changed.
    pub fn apply(&mut self, req: UpdatePlaceRequest) -> bool {
        let mut changed = false;

        if let Some(name) = req.name {
            self.name = name;
            changed = true;
        }
        if let Some(description) = req.description {
            self.description = description;
            changed = true;
        }
        if let Some(number_rooms) = req.number_rooms {
            self.number_rooms = number_rooms;
            changed = true;
        }
        if let Some(number_bathrooms) = req.number_bathrooms {
            self.number_bathrooms = number_bathrooms;
            changed = true;
        }
        if let Some(max_guest) = req.max_guest {
            self.max_guest = max_guest;
            changed = true;
        }
        if let Some(price_by_night) = req.price_by_night {
            self.price_by_night = price_by_night;
            changed = true;
        }
        if let Some(latitude) = req.latitude {
            self.latitude = latitude;
            changed = true;
        }
        if let Some(longitude) = req.longitude {
            self.longitude = longitude;
            changed = true;
        }

        if changed {
            self.updated_at = Utc::now();
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_request(body: serde_json::Value) -> CreatePlaceRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_new_place_binds_city_and_defaults() {
        let req = create_request(json!({ "user_id": "u1", "name": "Loft" }));
        let place = Place::new("c1", req);

        assert_eq!(place.city_id, "c1");
        assert_eq!(place.user_id, "u1");
        assert_eq!(place.name, "Loft");
        assert_eq!(place.description, "");
        assert_eq!(place.number_rooms, 0);
        assert_eq!(place.created_at, place.updated_at);
        assert!(Uuid::parse_str(&place.id).is_ok());
    }

    #[test]
    fn test_create_request_rejects_unknown_and_forbidden_fields() {
        let unknown = json!({ "user_id": "u1", "name": "Loft", "pool": true });
        assert!(serde_json::from_value::<CreatePlaceRequest>(unknown).is_err());

        let forbidden = json!({ "user_id": "u1", "name": "Loft", "id": "fixed" });
        assert!(serde_json::from_value::<CreatePlaceRequest>(forbidden).is_err());
    }

    #[test]
    fn test_create_request_rejects_negative_counts() {
        let body = json!({ "user_id": "u1", "name": "Loft", "max_guest": -2 });
        assert!(serde_json::from_value::<CreatePlaceRequest>(body).is_err());
    }

    #[test]
    fn test_create_request_validates_coordinates() {
        let req = create_request(json!({ "user_id": "u1", "name": "Loft", "latitude": 91.0 }));
        assert!(req.validate().is_err());

        let req = create_request(json!({ "user_id": "u1", "name": "Loft", "latitude": 37.77 }));
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_update_request_validates_optional_coordinates() {
        let req: UpdatePlaceRequest =
            serde_json::from_value(json!({ "longitude": -181.5, "pool": true })).unwrap();
        assert!(req.validate().is_err());

        let req: UpdatePlaceRequest = serde_json::from_value(json!({ "latitude": -45.0 })).unwrap();
        assert!(req.validate().is_ok());
        assert!(UpdatePlaceRequest::default().validate().is_ok());
    }

    #[test]
    fn test_apply_sets_only_provided_fields() {
        let mut place = Place::new("c1", create_request(json!({ "user_id": "u1", "name": "Loft" })));
        let before = place.clone();

        let changed = place.apply(UpdatePlaceRequest {
            price_by_night: Some(120),
            ..Default::default()
        });

        assert!(changed);
        assert_eq!(place.price_by_night, 120);
        assert_eq!(place.name, before.name);
        assert!(place.updated_at >= before.updated_at);
    }

    #[test]
    fn test_apply_empty_update_keeps_timestamp() {
        let mut place = Place::new("c1", create_request(json!({ "user_id": "u1", "name": "Loft" })));
        let before = place.clone();

        assert!(!place.apply(UpdatePlaceRequest::default()));
        assert_eq!(place, before);
    }
}
