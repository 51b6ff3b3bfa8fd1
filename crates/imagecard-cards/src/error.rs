use crate::deck::CardId;

pub type Result<T> = std::result::Result<T, CardError>;

/// Rejected card operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CardError {
    #[error("card {0} not found")]
    NotFound(CardId),

    /// A request is already in flight for this card
    #[error("a generation is already in progress for this card")]
    Busy,

    #[error("prompt is empty")]
    EmptyPrompt,

    /// Regenerate needs a previous successful request
    #[error("no previous generation to repeat")]
    NothingToRegenerate,
}
