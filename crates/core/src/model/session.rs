use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::{
    AdvanceTimer, FileRef, GenerationFailure, GenerationToken, IgnoreReason, InputDraft, Item,
    Review, ReviewProgress, ReviewSettings, SelectOutcome, SessionId, StudyInput, TimerHandle,
    ValidationError,
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("a generation request is already in flight")]
    AlreadyGenerating,

    #[error("submit is only available while collecting input")]
    NotCollecting,
}

/// Where the session is. `Error` behaves like `Collecting` but keeps the
/// failure for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Collecting,
    Generating(GenerationToken),
    Reviewing(Review),
    Error(GenerationFailure),
}

/// Flattened mode for rendering, with the complete sub-state split out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Collecting,
    Generating,
    Reviewing,
    Complete,
    Error,
}

/// The in-flight generation call. Only lives while the session is generating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    session_id: SessionId,
    token: GenerationToken,
    input: StudyInput,
}

impl PendingRequest {
    #[must_use]
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    #[must_use]
    pub fn token(&self) -> GenerationToken {
        self.token
    }

    #[must_use]
    pub fn input(&self) -> &StudyInput {
        &self.input
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Applied,
    /// The response belongs to a request the session no longer waits on.
    Discarded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackOutcome {
    Reset,
    /// Back was pressed while generating; the request's response will be discarded.
    Abandoned(GenerationToken),
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Client-side study session: collect input, wait for generation, review items.
///
/// All transitions are synchronous. The two suspension points (the generation
/// call and the post-answer delay) live outside: `begin_submit` hands out a
/// `PendingRequest` and `resolve` takes its result back, `select_answer` hands
/// out an `AdvanceTimer` and `fire_advance`/`tick` take it back. Stale tokens
/// and handles are ignored, so late completions cannot touch a newer state.
#[derive(Debug, Clone)]
pub struct StudySession {
    id: SessionId,
    settings: ReviewSettings,
    mode: Mode,
    draft: InputDraft,
    validation_error: Option<ValidationError>,
    last_token: GenerationToken,
    last_timer: TimerHandle,
}

impl Default for StudySession {
    fn default() -> Self {
        Self::new(ReviewSettings::default())
    }
}

impl StudySession {
    #[must_use]
    pub fn new(settings: ReviewSettings) -> Self {
        Self {
            id: SessionId::random(),
            settings,
            mode: Mode::Collecting,
            draft: InputDraft::default(),
            validation_error: None,
            last_token: GenerationToken::new(0),
            last_timer: TimerHandle::new(0),
        }
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn settings(&self) -> ReviewSettings {
        self.settings
    }

    #[must_use]
    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        match &self.mode {
            Mode::Collecting => Phase::Collecting,
            Mode::Generating(_) => Phase::Generating,
            Mode::Reviewing(review) if review.is_complete() => Phase::Complete,
            Mode::Reviewing(_) => Phase::Reviewing,
            Mode::Error(_) => Phase::Error,
        }
    }

    #[must_use]
    pub fn draft(&self) -> &InputDraft {
        &self.draft
    }

    #[must_use]
    pub fn validation_error(&self) -> Option<&ValidationError> {
        self.validation_error.as_ref()
    }

    #[must_use]
    pub fn error(&self) -> Option<&GenerationFailure> {
        match &self.mode {
            Mode::Error(failure) => Some(failure),
            _ => None,
        }
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error().map(GenerationFailure::message)
    }

    #[must_use]
    pub fn pending_token(&self) -> Option<GenerationToken> {
        match self.mode {
            Mode::Generating(token) => Some(token),
            _ => None,
        }
    }

    #[must_use]
    pub fn review(&self) -> Option<&Review> {
        match &self.mode {
            Mode::Reviewing(review) => Some(review),
            _ => None,
        }
    }

    /// Items of the current review; empty outside of reviewing.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        self.review().map(Review::items).unwrap_or(&[])
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.review().map_or(0, Review::cursor)
    }

    #[must_use]
    pub fn current_item(&self) -> Option<&Item> {
        self.review().and_then(Review::current_item)
    }

    #[must_use]
    pub fn progress(&self) -> Option<ReviewProgress> {
        self.review().map(Review::progress)
    }

    #[must_use]
    pub fn pending_advance(&self) -> Option<AdvanceTimer> {
        self.review().and_then(Review::pending_advance)
    }

    // ─── Draft editing ─────────────────────────────────────────────────────────

    fn accepts_input(&self) -> bool {
        matches!(self.mode, Mode::Collecting | Mode::Error(_))
    }

    /// Replace the typed text. Ignored unless the input area is showing.
    pub fn set_text(&mut self, text: impl Into<String>) -> bool {
        if !self.accepts_input() {
            return false;
        }
        self.draft.text = text.into();
        self.validation_error = None;
        true
    }

    pub fn attach_file(&mut self, file: FileRef) -> bool {
        if !self.accepts_input() {
            return false;
        }
        self.draft.file = Some(file);
        self.validation_error = None;
        true
    }

    pub fn clear_file(&mut self) -> bool {
        if !self.accepts_input() {
            return false;
        }
        self.draft.file = None;
        self.validation_error = None;
        true
    }

    // ─── Submit / resolve ──────────────────────────────────────────────────────

    /// Validate the draft and enter `Generating`.
    ///
    /// The caller issues exactly one generation call for the returned request
    /// and reports back through [`StudySession::resolve`].
    ///
    /// # Errors
    ///
    /// Returns `SubmitError::Validation` (state unchanged, inline message
    /// recorded) when the draft has no usable input,
    /// `SubmitError::AlreadyGenerating` while a request is in flight and
    /// `SubmitError::NotCollecting` while reviewing.
    pub fn begin_submit(&mut self) -> Result<PendingRequest, SubmitError> {
        match self.mode {
            Mode::Generating(_) => return Err(SubmitError::AlreadyGenerating),
            Mode::Reviewing(_) => return Err(SubmitError::NotCollecting),
            Mode::Collecting | Mode::Error(_) => {}
        }

        let input = match self.draft.collect() {
            Ok(input) => input,
            Err(err) => {
                self.validation_error = Some(err.clone());
                return Err(err.into());
            }
        };

        self.validation_error = None;
        self.last_token = self.last_token.next();
        self.mode = Mode::Generating(self.last_token);

        Ok(PendingRequest {
            session_id: self.id,
            token: self.last_token,
            input,
        })
    }

    /// Apply the outcome of a generation call.
    ///
    /// Only the request the session is still waiting on is applied; anything
    /// else is discarded without touching state.
    pub fn resolve(
        &mut self,
        token: GenerationToken,
        result: Result<Vec<Item>, GenerationFailure>,
    ) -> Resolution {
        if self.pending_token() != Some(token) {
            return Resolution::Discarded;
        }

        self.mode = match result {
            Ok(items) => Mode::Reviewing(Review::new(items)),
            Err(failure) => Mode::Error(failure),
        };
        Resolution::Applied
    }

    // ─── Review ────────────────────────────────────────────────────────────────

    /// Answer the current item and schedule the cursor advance.
    ///
    /// Selections on any other item, on an answered item, or on a choice the
    /// item does not have are ignored: nothing changes and no timer is issued.
    pub fn select_answer(
        &mut self,
        item_index: usize,
        choice_index: usize,
        now: DateTime<Utc>,
    ) -> SelectOutcome {
        let handle = self.last_timer.next();
        let due_at = now + self.settings.advance_delay();
        let Mode::Reviewing(review) = &mut self.mode else {
            return SelectOutcome::Ignored(IgnoreReason::NotReviewing);
        };

        let outcome = review.select(item_index, choice_index, handle, due_at);
        if outcome.is_scheduled() {
            self.last_timer = handle;
        }
        outcome
    }

    /// Fire a scheduled advance. Returns `false` for stale or cancelled handles.
    pub fn fire_advance(&mut self, handle: TimerHandle) -> bool {
        match &mut self.mode {
            Mode::Reviewing(review) => review.fire(handle),
            _ => false,
        }
    }

    /// Fire the pending advance if it is due at `now`.
    pub fn tick(&mut self, now: DateTime<Utc>) -> bool {
        let Some(handle) = self.review().and_then(|review| review.due(now)) else {
            return false;
        };
        self.fire_advance(handle)
    }

    /// Drop a scheduled advance without moving the cursor.
    pub fn cancel_advance(&mut self, handle: TimerHandle) -> bool {
        match &mut self.mode {
            Mode::Reviewing(review) => review.cancel(handle),
            _ => false,
        }
    }

    // ─── Navigation ────────────────────────────────────────────────────────────

    /// Return to the input area, dropping items, cursor, pending advance and
    /// any error. The draft is kept.
    pub fn go_back(&mut self) -> BackOutcome {
        let previous = std::mem::replace(&mut self.mode, Mode::Collecting);
        self.validation_error = None;
        match previous {
            Mode::Generating(token) => BackOutcome::Abandoned(token),
            Mode::Collecting | Mode::Reviewing(_) | Mode::Error(_) => BackOutcome::Reset,
        }
    }
}
