//! Domain layer containing business entities and logic.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`click_event`] - Raw click event model
//! - [`click_worker`] - Asynchronous click enrichment worker
//!
//! # Click Processing Flow
//!
//! 1. HTTP handler resolves the redirect and sends a
//!    [`click_event::ClickEvent`] to a bounded channel
//! 2. [`click_worker::run_click_worker`] enriches events off the request
//!    path (device classification, geolocation)
//! 3. Enriched records are persisted via [`repositories::AnalyticsRepository`]

pub mod click_event;
pub mod click_worker;
pub mod entities;
pub mod repositories;
