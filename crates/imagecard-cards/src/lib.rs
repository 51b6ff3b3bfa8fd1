#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

//! Client-side cards: one prompt, one image, one flip state each
//!
//! [`CardState`] is the per-card state machine, [`Deck`] the ordered
//! collection addressed by stable [`CardId`]s, and [`Controller`] drives
//! submissions against a [`RelayClient`] as one task per request.

mod card;
mod controller;
mod deck;
mod error;
mod relay;

pub use card::{CardPhase, CardState};
pub use controller::Controller;
pub use deck::{CardId, Completion, DEFAULT_PROMPT, Deck, Submission};
pub use error::{CardError, Result};
pub use relay::RelayClient;
