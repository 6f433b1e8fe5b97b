//! Link creation and resolution service.

use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::generate_code;
use serde_json::json;

/// Bound on insert attempts for randomly generated codes. A unique
/// violation on insert is treated as a collision and retried.
const MAX_ALLOCATION_ATTEMPTS: usize = 3;

/// Service for creating and resolving shortened links.
///
/// Handles URL scheme validation and short code allocation. Custom aliases
/// are used verbatim; the store's unique constraint is the final arbiter
/// for both allocation paths.
pub struct LinkService {
    link_repository: Arc<dyn LinkRepository>,
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(link_repository: Arc<dyn LinkRepository>) -> Self {
        Self { link_repository }
    }

    /// Creates a short link.
    ///
    /// # Arguments
    ///
    /// - `long_url` - The original URL; must begin with `http://` or `https://`
    /// - `custom_alias` - Optional custom short code, taken verbatim
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL scheme is invalid (before
    /// any store mutation), [`AppError::Conflict`] if the alias is already
    /// bound, and [`AppError::Internal`] if random allocation exhausts its
    /// attempt budget.
    pub async fn create_short_link(
        &self,
        long_url: String,
        custom_alias: Option<String>,
    ) -> Result<Link, AppError> {
        if !long_url.starts_with("http://") && !long_url.starts_with("https://") {
            return Err(AppError::bad_request(
                "URL must start with http:// or https://",
                json!({ "long_url": long_url }),
            ));
        }

        if let Some(alias) = custom_alias {
            // The pre-check gives a precise error for the common case; a
            // race with a concurrent insert still surfaces as Conflict
            // through the unique constraint.
            if self.link_repository.exists(&alias).await? {
                return Err(AppError::conflict(
                    "Custom alias already in use",
                    json!({ "code": alias }),
                ));
            }

            return self
                .link_repository
                .create(NewLink {
                    code: alias,
                    long_url,
                })
                .await;
        }

        self.allocate_random(long_url).await
    }

    /// Retrieves a link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches the code.
    pub async fn get_link_by_code(&self, code: &str) -> Result<Link, AppError> {
        self.link_repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))
    }

    /// Constructs the full short URL from the service base URL and a code.
    pub fn get_short_url(&self, base_url: &str, code: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), code)
    }

    /// Inserts a link under a fresh random code, retrying on collision.
    async fn allocate_random(&self, long_url: String) -> Result<Link, AppError> {
        for _ in 0..MAX_ALLOCATION_ATTEMPTS {
            let new_link = NewLink {
                code: generate_code(),
                long_url: long_url.clone(),
            };

            match self.link_repository.create(new_link).await {
                Ok(link) => return Ok(link),
                Err(AppError::Conflict { .. }) => continue,
                Err(e) => return Err(e),
            }
        }

        Err(AppError::internal(
            "Failed to allocate short code",
            json!({ "reason": "Too many collisions" }),
        ))
    }
}
