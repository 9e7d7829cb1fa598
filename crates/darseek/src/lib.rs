//! Geo-radius search and ranking over real-estate listings.
//!
//! The crate owns the search subsystem end to end: validating untrusted
//! query parameters into a typed filter, evaluating the radius query
//! against a listings store, and shaping the paginated HTTP response.
//! Listing ownership, authentication, uploads, and moderation live in
//! external collaborators and never appear here.

pub mod config;
pub mod error;
pub mod search;
pub mod telemetry;
