//! Application layer: service orchestration over domain traits.

pub mod services;
