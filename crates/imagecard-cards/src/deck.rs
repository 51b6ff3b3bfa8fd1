use std::fmt;

use imagecard_core::{GenerationRequest, GenerationResult, Orientation};
use uuid::Uuid;

use crate::{
    card::CardState,
    error::{CardError, Result},
};

/// Prompt of the card a new deck starts with
pub const DEFAULT_PROMPT: &str = "A beautiful sunset over the mountains";

/// Stable card identity, unaffected by removals elsewhere in the deck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardId(Uuid);

impl CardId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A request to send on behalf of a card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub card: CardId,
    pub request: GenerationRequest,
}

/// Outcome of a submission, routed back to its card
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub card: CardId,
    pub result: GenerationResult,
}

/// Ordered collection of cards
///
/// Cards are addressed by [`CardId`]; display order is insertion order.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<(CardId, CardState)>,
}

impl Default for Deck {
    /// One card pre-filled with [`DEFAULT_PROMPT`]
    fn default() -> Self {
        let mut deck = Self::empty();
        deck.insert(CardState::new(DEFAULT_PROMPT));
        deck
    }
}

impl Deck {
    pub const fn empty() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Append a blank card
    pub fn add_card(&mut self) -> CardId {
        self.insert(CardState::default())
    }

    /// Append an existing card state
    pub fn insert(&mut self, state: CardState) -> CardId {
        let id = CardId::new();
        self.cards.push((id, state));
        tracing::debug!(card = %id, total = self.cards.len(), "card added");
        id
    }

    /// Delete a card, keeping the others in order
    ///
    /// A request still in flight for the card is not cancelled; its
    /// completion is dropped when it arrives.
    pub fn remove(&mut self, id: CardId) -> Result<CardState> {
        let index = self.position(id)?;
        let (_, state) = self.cards.remove(index);
        tracing::debug!(card = %id, total = self.cards.len(), "card removed");
        Ok(state)
    }

    pub fn get(&self, id: CardId) -> Option<&CardState> {
        self.cards.iter().find(|(card, _)| *card == id).map(|(_, state)| state)
    }

    /// Card ids in display order
    pub fn ids(&self) -> impl Iterator<Item = CardId> + '_ {
        self.cards.iter().map(|(id, _)| *id)
    }

    /// Cards in display order
    pub fn iter(&self) -> impl Iterator<Item = (CardId, &CardState)> {
        self.cards.iter().map(|(id, state)| (*id, state))
    }

    pub fn change_input(&mut self, id: CardId, input: impl Into<String>) -> Result<()> {
        self.card_mut(id)?.change_input(input)
    }

    pub fn change_orientation(&mut self, id: CardId, orientation: Orientation) -> Result<()> {
        self.card_mut(id)?.change_orientation(orientation)
    }

    pub fn flip(&mut self, id: CardId) -> Result<()> {
        self.card_mut(id)?.flip();
        Ok(())
    }

    /// Move a card to loading and hand back the request to send
    pub fn submit(&mut self, id: CardId) -> Result<Submission> {
        let request = self.card_mut(id)?.submit()?;
        Ok(Submission { card: id, request })
    }

    /// Repeat a card's last successful request
    pub fn regenerate(&mut self, id: CardId) -> Result<Submission> {
        let request = self.card_mut(id)?.regenerate()?;
        Ok(Submission { card: id, request })
    }

    /// Apply a completion
    ///
    /// Returns `false` when the card is gone or not waiting for a result.
    pub fn resolve(&mut self, completion: Completion) -> bool {
        let Ok(card) = self.card_mut(completion.card) else {
            tracing::debug!(card = %completion.card, "dropping completion for removed card");
            return false;
        };

        card.resolve(completion.result)
    }

    fn position(&self, id: CardId) -> Result<usize> {
        self.cards
            .iter()
            .position(|(card, _)| *card == id)
            .ok_or(CardError::NotFound(id))
    }

    fn card_mut(&mut self, id: CardId) -> Result<&mut CardState> {
        let index = self.position(id)?;
        Ok(&mut self.cards[index].1)
    }
}
