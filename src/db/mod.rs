// src/db/mod.rs
// DOCUMENTATION: Storage access module organization
// PURPOSE: Re-export repository components

pub mod repository;
pub mod review_repository;

pub use repository::{CityRepository, PlaceRepository, UserRepository};
pub use review_repository::*;
