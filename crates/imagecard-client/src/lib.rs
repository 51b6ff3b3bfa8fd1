#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

//! Typed HTTP client for the imagecard relay

mod client;
pub mod error;

pub use client::RelayHttpClient;
pub use error::{ClientError, Result};
