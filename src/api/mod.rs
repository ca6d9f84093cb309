// Content API module.
// Provides the client and types for the Kemono/Coomer REST API.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::{ApiRequest, Reply, ResourceClient, ResponseKind};
pub use types::*;
