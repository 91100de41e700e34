// src/services/mod.rs
// DOCUMENTATION: Services module organization
// PURPOSE: Re-export service components

pub mod payload;
pub mod place_service;
pub mod review_service;

pub use place_service::*;
pub use review_service::*;
