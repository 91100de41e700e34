// src/models/mod.rs
// DOCUMENTATION: Models module organization
// PURPOSE: Re-export model components

pub mod city;
pub mod place;
pub mod record;
pub mod review;
pub mod user;

pub use city::*;
pub use place::*;
pub use record::*;
pub use review::*;
pub use user::*;
