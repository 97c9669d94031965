//! AWS-oriented adapters and handlers for the contact form relay.
//!
//! This crate owns runtime integration details (the Lambda handler, the mail
//! transport seam and process configuration) and re-exports the domain crate
//! as `relay`.

pub mod adapters;
pub mod config;
pub mod handlers;
pub mod telemetry;

pub use contact_relay_core as relay;
