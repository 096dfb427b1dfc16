//! Learning Copilot API Module
//!
//! The API module exposes the content operations over HTTP.

pub mod error;
pub mod handlers;
pub mod models;
pub mod server;

pub use error::ApiError;
pub use handlers::*;
pub use models::*;
pub use server::*;
