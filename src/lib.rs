// src/lib.rs
// DOCUMENTATION: Library root shared by the server and the seed tool
// PURPOSE: Expose configuration, storage, models, services and handlers

pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod services;
pub mod storage;

#[cfg(test)]
pub(crate) mod test_support;
