//! HTTP transport for the calculation store
//!
//! Routes map one-to-one onto store operations. Every body is a
//! `{ success, data, error }` envelope; saves add the generated `id`.

pub mod response;
pub mod server;

pub use response::{ApiError, ApiResponse, SaveResponse};
pub use server::{build_router, ApiServer};
