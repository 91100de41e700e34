// src/models/record.rs
// DOCUMENTATION: Tagged envelope for every record kind kept in storage
// PURPOSE: Lets the storage layer handle cities, users, places and reviews uniformly

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{City, Place, Review, User};

/// Record kinds known to the storage layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Kind {
    City,
    User,
    Place,
    Review,
}

impl Kind {
    pub const ALL: [Kind; 4] = [Kind::City, Kind::User, Kind::Place, Kind::Review];

    /// Class name used in serialized records and storage keys
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::City => "City",
            Kind::User => "User",
            Kind::Place => "Place",
            Kind::Review => "Review",
        }
    }

    /// Plural name used by the stats endpoint
    pub fn collection_name(&self) -> &'static str {
        match self {
            Kind::City => "cities",
            Kind::User => "users",
            Kind::Place => "places",
            Kind::Review => "reviews",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Any record kept in storage
/// DOCUMENTATION: Serializes as the record's flat attribute set plus a
/// `__class__` discriminator, which is also the API representation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "__class__")]
pub enum Record {
    City(City),
    User(User),
    Place(Place),
    Review(Review),
}

impl Record {
    pub fn kind(&self) -> Kind {
        match self {
            Record::City(_) => Kind::City,
            Record::User(_) => Kind::User,
            Record::Place(_) => Kind::Place,
            Record::Review(_) => Kind::Review,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Record::City(city) => &city.id,
            Record::User(user) => &user.id,
            Record::Place(place) => &place.id,
            Record::Review(review) => &review.id,
        }
    }

    /// Id of the owning record (city for a place, place for a review)
    pub fn parent_id(&self) -> Option<&str> {
        match self {
            Record::Place(place) => Some(&place.city_id),
            Record::Review(review) => Some(&review.place_id),
            Record::City(_) | Record::User(_) => None,
        }
    }

    /// Kind of the owning record
    pub fn parent_kind(&self) -> Option<Kind> {
        match self {
            Record::Place(_) => Some(Kind::City),
            Record::Review(_) => Some(Kind::Place),
            Record::City(_) | Record::User(_) => None,
        }
    }

    /// Creation timestamp, used to order children collections
    pub fn created_at(&self) -> chrono::DateTime<chrono::Utc> {
        match self {
            Record::City(city) => city.created_at,
            Record::User(user) => user.created_at,
            Record::Place(place) => place.created_at,
            Record::Review(review) => review.created_at,
        }
    }

    /// Storage key in the `<Class>.<id>` form used by the store file
    pub fn key(&self) -> String {
        format!("{}.{}", self.kind(), self.id())
    }
}

/// Typed access to a single record kind
pub trait Entity: Sized {
    const KIND: Kind;

    fn into_record(self) -> Record;

    fn from_record(record: Record) -> Option<Self>;
}

impl Entity for City {
    const KIND: Kind = Kind::City;

    fn into_record(self) -> Record {
        Record::City(self)
    }

    fn from_record(record: Record) -> Option<Self> {
        match record {
            Record::City(city) => Some(city),
            _ => None,
        }
    }
}

impl Entity for User {
    const KIND: Kind = Kind::User;

    fn into_record(self) -> Record {
        Record::User(self)
    }

    fn from_record(record: Record) -> Option<Self> {
        match record {
            Record::User(user) => Some(user),
            _ => None,
        }
    }
}

impl Entity for Place {
    const KIND: Kind = Kind::Place;

    fn into_record(self) -> Record {
        Record::Place(self)
    }

    fn from_record(record: Record) -> Option<Self> {
        match record {
            Record::Place(place) => Some(place),
            _ => None,
        }
    }
}

impl Entity for Review {
    const KIND: Kind = Kind::Review;

    fn into_record(self) -> Record {
        Record::Review(self)
    }

    fn from_record(record: Record) -> Option<Self> {
        match record {
            Record::Review(review) => Some(review),
            _ => None,
        }
    }
}
