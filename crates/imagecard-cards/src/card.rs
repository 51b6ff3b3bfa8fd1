use imagecard_core::{GenerationRequest, GenerationResult, Orientation};

use crate::error::{CardError, Result};

/// Where a card is in its request lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardPhase {
    /// Nothing requested yet, or the last result was dismissed
    Idle,
    /// A request is in flight
    Loading,
    /// An image is available
    ResolvedSuccess,
    /// The last request failed
    ResolvedError,
}

/// State of one card
///
/// `flipped == false` shows the prompt form, `true` the result face.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardState {
    input: String,
    is_loading: bool,
    selected_size: Orientation,
    image: Option<String>,
    error: Option<String>,
    flipped: bool,
    /// Request currently in flight
    pending: Option<GenerationRequest>,
    /// Last request that produced an image
    last_request: Option<GenerationRequest>,
}

impl Default for CardState {
    fn default() -> Self {
        Self::new("")
    }
}

impl CardState {
    /// Fresh card showing its front face
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            is_loading: false,
            selected_size: Orientation::default(),
            image: None,
            error: None,
            flipped: false,
            pending: None,
            last_request: None,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub const fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub const fn selected_size(&self) -> Orientation {
        self.selected_size
    }

    /// Base64 payload of the current image
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub const fn flipped(&self) -> bool {
        self.flipped
    }

    pub const fn last_request(&self) -> Option<&GenerationRequest> {
        self.last_request.as_ref()
    }

    /// Whether the submit control is enabled
    pub fn can_submit(&self) -> bool {
        !self.is_loading && !self.input.trim().is_empty()
    }

    pub const fn phase(&self) -> CardPhase {
        if self.is_loading {
            CardPhase::Loading
        } else if self.error.is_some() {
            CardPhase::ResolvedError
        } else if self.image.is_some() {
            CardPhase::ResolvedSuccess
        } else {
            CardPhase::Idle
        }
    }

    /// Replace the prompt text
    pub fn change_input(&mut self, input: impl Into<String>) -> Result<()> {
        self.ensure_idle()?;
        self.input = input.into();
        Ok(())
    }

    /// Pick another size; clears the error but keeps the current image
    pub fn change_orientation(&mut self, orientation: Orientation) -> Result<()> {
        self.ensure_idle()?;
        self.selected_size = orientation;
        self.error = None;
        Ok(())
    }

    /// Turn the card over, dismissing any error
    pub fn flip(&mut self) {
        self.flipped = !self.flipped;
        self.error = None;
    }

    /// Start a request for the current prompt and size
    ///
    /// Clears the previous image and error first. With a blank prompt nothing
    /// is requested and the card stays where it is.
    pub fn submit(&mut self) -> Result<GenerationRequest> {
        self.ensure_idle()?;

        self.image = None;
        self.error = None;

        if self.input.trim().is_empty() {
            return Err(CardError::EmptyPrompt);
        }

        let request = GenerationRequest::new(self.input.clone(), self.selected_size);
        self.begin(request.clone());
        self.flipped = true;

        Ok(request)
    }

    /// Repeat the last successful request, clearing only the image
    pub fn regenerate(&mut self) -> Result<GenerationRequest> {
        self.ensure_idle()?;

        let request = self.last_request.clone().ok_or(CardError::NothingToRegenerate)?;
        self.image = None;
        self.begin(request.clone());

        Ok(request)
    }

    /// Apply the outcome of the in-flight request
    ///
    /// Returns `false` and changes nothing when no request is in flight.
    pub fn resolve(&mut self, result: GenerationResult) -> bool {
        if !self.is_loading {
            return false;
        }

        let request = self.pending.take();
        self.is_loading = false;

        match result {
            Ok(image) => {
                self.image = Some(image);
                self.error = None;
                self.last_request = request;
            }
            Err(failure) => {
                self.image = None;
                self.error = Some(failure.message);
            }
        }

        true
    }

    fn begin(&mut self, request: GenerationRequest) {
        self.pending = Some(request);
        self.is_loading = true;
    }

    const fn ensure_idle(&self) -> Result<()> {
        if self.is_loading { Err(CardError::Busy) } else { Ok(()) }
    }
}
