//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID set/propagated)
//!     → handlers/ (check path ids + body, build upstream payload)
//!     → upstream client (one call) → relay
//!     → response.rs (error mapping to {"errors": ...})
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::{RequestIdExt, X_REQUEST_ID};
pub use response::{ApiError, ApiResult};
pub use server::{AppState, HttpServer};
