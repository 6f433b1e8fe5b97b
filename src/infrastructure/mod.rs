//! Infrastructure layer: database, cache and external lookups.

pub mod cache;
pub mod geoip;
pub mod persistence;
