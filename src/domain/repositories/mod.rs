//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; concrete implementations
//! live in `crate::infrastructure::persistence`. Mock implementations are
//! auto-generated via `mockall` for testing.

pub mod analytics_repository;
pub mod link_repository;

pub use analytics_repository::{
    AnalyticsRepository, AnalyticsSummary, LocationCount, ReferrerCount,
};
pub use link_repository::LinkRepository;

#[cfg(test)]
pub use analytics_repository::MockAnalyticsRepository;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
