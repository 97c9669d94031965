//! Contact form relay domain primitives.
//!
//! This crate owns submission validation, notification rendering and the
//! outbound email contract. It intentionally excludes AWS SDK and Lambda
//! runtime concerns.

pub mod error;
pub mod message;
pub mod submission;
