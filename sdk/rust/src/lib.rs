//! Typed client for the organization console gateway.

mod client;

pub use client::{ClientError, GatewayClient, Job, JobDraft, Member};
