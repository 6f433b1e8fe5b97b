//! Core business data structures.

pub mod click;
pub mod link;

pub use click::{DeviceType, NewClick};
pub use link::{Link, NewLink};
