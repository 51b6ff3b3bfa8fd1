use std::{collections::HashMap, sync::Arc};

use imagecard_client::error::GENERIC_FAILURE;
use imagecard_core::{GenerationFailure, GenerationResult, Orientation};
use tokio::task::{self, JoinSet};

use crate::{
    card::CardState,
    deck::{CardId, Completion, Deck, Submission},
    error::Result,
    relay::RelayClient,
};

/// Drives a [`Deck`] against a relay
///
/// Every submission runs as its own tokio task; results are collected and
/// applied by [`Controller::next_completion`], so card state is only ever
/// mutated through `&mut self`. A task that panics resolves its card as a
/// failure. Must be used inside a tokio runtime.
pub struct Controller {
    deck: Deck,
    relay: Arc<dyn RelayClient>,
    tasks: JoinSet<GenerationResult>,
    owners: HashMap<task::Id, CardId>,
}

impl Controller {
    /// Controller over the default one-card deck
    pub fn new(relay: Arc<dyn RelayClient>) -> Self {
        Self::with_deck(relay, Deck::default())
    }

    pub fn with_deck(relay: Arc<dyn RelayClient>, deck: Deck) -> Self {
        Self {
            deck,
            relay,
            tasks: JoinSet::new(),
            owners: HashMap::new(),
        }
    }

    pub const fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn card(&self, id: CardId) -> Option<&CardState> {
        self.deck.get(id)
    }

    /// Requests sent but not yet applied
    pub fn in_flight(&self) -> usize {
        self.tasks.len()
    }

    pub fn add_card(&mut self) -> CardId {
        self.deck.add_card()
    }

    pub fn remove(&mut self, id: CardId) -> Result<CardState> {
        self.deck.remove(id)
    }

    pub fn change_input(&mut self, id: CardId, input: impl Into<String>) -> Result<()> {
        self.deck.change_input(id, input)
    }

    pub fn change_orientation(&mut self, id: CardId, orientation: Orientation) -> Result<()> {
        self.deck.change_orientation(id, orientation)
    }

    pub fn flip(&mut self, id: CardId) -> Result<()> {
        self.deck.flip(id)
    }

    /// Submit a card's prompt and start its request
    pub fn submit(&mut self, id: CardId) -> Result<()> {
        let submission = self.deck.submit(id)?;
        self.dispatch(submission);
        Ok(())
    }

    /// Re-run a card's last successful request
    pub fn regenerate(&mut self, id: CardId) -> Result<()> {
        let submission = self.deck.regenerate(id)?;
        self.dispatch(submission);
        Ok(())
    }

    fn dispatch(&mut self, submission: Submission) {
        let Submission { card, request } = submission;
        let relay = Arc::clone(&self.relay);

        tracing::debug!(%card, size = %request.size, "dispatching generation request");

        let handle = self.tasks.spawn(async move { relay.generate(&request).await });
        self.owners.insert(handle.id(), card);
    }

    /// Wait for the next finished request and apply it
    ///
    /// Returns the card it belonged to, or `None` when nothing is in
    /// flight. The card may have been removed in the meantime.
    pub async fn next_completion(&mut self) -> Option<CardId> {
        let (task, result) = match self.tasks.join_next_with_id().await? {
            Ok((task, result)) => (task, result),
            Err(e) => {
                tracing::error!(error = %e, "generation task did not complete");
                (e.id(), Err(GenerationFailure::new(GENERIC_FAILURE)))
            }
        };

        // Every spawned task is registered before it can be joined
        let card = self.owners.remove(&task)?;

        match &result {
            Ok(_) => tracing::debug!(%card, "generation succeeded"),
            Err(failure) => tracing::debug!(%card, error = %failure, "generation failed"),
        }

        self.deck.resolve(Completion { card, result });

        Some(card)
    }

    /// Apply completions until nothing is in flight
    pub async fn settle(&mut self) {
        while self.next_completion().await.is_some() {}
    }
}
