//! Upstream backend subsystem.
//!
//! # Data Flow
//! ```text
//! validated payload + Endpoint
//!     → client.rs (resolve template, one HTTP call, buffer reply)
//!     → relay.rs (success body / rejection message / malformed)
//!     → http layer turns the Relay into a response
//! ```

pub mod client;
pub mod relay;

pub use client::{Endpoint, UpstreamClient, UpstreamError, UpstreamReply};
pub use relay::{classify, Relay};
