//! Domain services
//!
//! Contracts the extraction engine depends on. Implementations live in the
//! infrastructure layer.

pub mod extraction_services;

pub use extraction_services::{FetchAdapter, HttpFetcher};
