//! Small pure helpers shared across layers.

pub mod client_ip;
pub mod code_generator;
pub mod user_agent;
