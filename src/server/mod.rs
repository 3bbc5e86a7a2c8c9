//! HTTP surface: JSON endpoints over the configured datasets.

pub mod api;
pub mod error;

pub use api::{ApiState, router};
pub use error::ApiError;
