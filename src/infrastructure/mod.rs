//! Infrastructure layer
//!
//! Concrete adapters for the application ports, the cache service and the
//! HTTP surface.

pub mod adapters;
pub mod cache;
pub mod http;
