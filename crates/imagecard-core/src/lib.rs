#![allow(clippy::must_use_candidate)]

//! Types shared by the relay, its HTTP client, and the card controller

mod orientation;
mod types;

pub use orientation::{Orientation, UnknownOrientation};
pub use types::{ErrorBody, GenerateResponse, GenerationFailure, GenerationRequest, GenerationResult};

/// Path of the relay endpoint
pub const GENERATE_PATH: &str = "/generate";
