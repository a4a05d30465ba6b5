//! Shared types used across the REST and GraphQL layers.

mod pagination;
mod response;

pub use pagination::PaginationParams;
pub use response::{ApiResponse, Created};
