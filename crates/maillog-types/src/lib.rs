//! Shared types and adapter interfaces for the maillog workspace
//!
//! This crate defines the value model for stored settings, the email log
//! record types, the storage adapter traits implemented by the adapter
//! crates, and the common error type.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod error;
pub mod log_adapter;
pub mod option_adapter;
pub mod prelude;
pub mod types;
pub mod utils;

// vim: ts=4
