//! API layer: REST handlers and DTOs.

pub mod dto;
pub mod handlers;
