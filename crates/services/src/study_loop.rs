use std::sync::Arc;

use tracing::{debug, info, warn};

use study_core::model::{
    GenerationToken, Item, PendingRequest, Resolution, ReviewSettings, SelectOutcome,
    StudySession, SubmitError,
};

use crate::Clock;
use crate::error::GenerationError;
use crate::generation::FlashcardGenerator;

/// Result of one generation call, waiting to be applied to the session that
/// asked for it.
#[derive(Debug)]
pub struct GenerationOutcome {
    pub token: GenerationToken,
    pub result: Result<Vec<Item>, GenerationError>,
}

/// Drives a `StudySession` against a generation backend.
///
/// The generation call is awaited without holding the session, so the caller
/// can keep handling input (e.g. Back) while it is in flight.
#[derive(Clone)]
pub struct StudyLoopService {
    clock: Clock,
    settings: ReviewSettings,
    generator: Arc<dyn FlashcardGenerator>,
}

impl StudyLoopService {
    #[must_use]
    pub fn new(clock: Clock, generator: Arc<dyn FlashcardGenerator>) -> Self {
        Self {
            clock,
            settings: ReviewSettings::default(),
            generator,
        }
    }

    #[must_use]
    pub fn with_settings(mut self, settings: ReviewSettings) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn new_session(&self) -> StudySession {
        StudySession::new(self.settings)
    }

    /// Issue the generation call for a request obtained from
    /// [`StudySession::begin_submit`].
    pub async fn generate(&self, pending: PendingRequest) -> GenerationOutcome {
        let token = pending.token();
        info!(
            session = %pending.session_id(),
            %token,
            input = pending.input().kind(),
            "requesting flashcards"
        );

        let result = self.generator.generate(pending.input()).await;
        match &result {
            Ok(items) => info!(%token, count = items.len(), "flashcards generated"),
            Err(err) if err.is_malformed() => {
                warn!(%token, error = %err, "generation backend broke the response contract");
            }
            Err(err) => warn!(%token, error = %err, "flashcard generation failed"),
        }

        GenerationOutcome { token, result }
    }

    /// Apply a finished call. Responses for abandoned requests are discarded.
    pub fn apply(&self, session: &mut StudySession, outcome: GenerationOutcome) -> Resolution {
        let token = outcome.token;
        let result = outcome.result.map_err(|err| err.failure());
        let resolution = session.resolve(token, result);
        if resolution == Resolution::Discarded {
            debug!(session = %session.id(), %token, "discarding stale generation response");
        }
        resolution
    }

    /// Submit and wait in one step, for callers that do not interleave input
    /// with the request.
    ///
    /// # Errors
    ///
    /// Returns `SubmitError` when the session refuses the submit; the generator
    /// is not called in that case.
    pub async fn submit(&self, session: &mut StudySession) -> Result<Resolution, SubmitError> {
        let pending = match session.begin_submit() {
            Ok(pending) => pending,
            Err(err) => {
                debug!(session = %session.id(), error = %err, "submit rejected");
                return Err(err);
            }
        };
        let outcome = self.generate(pending).await;
        Ok(self.apply(session, outcome))
    }

    /// Answer the current item, stamping the schedule with the service clock.
    pub fn select_answer(
        &self,
        session: &mut StudySession,
        item_index: usize,
        choice_index: usize,
    ) -> SelectOutcome {
        let outcome = session.select_answer(item_index, choice_index, self.clock.now());
        if let SelectOutcome::Ignored(reason) = outcome {
            debug!(session = %session.id(), item_index, choice_index, ?reason, "selection ignored");
        }
        outcome
    }

    /// Fire the pending advance if it is due by the service clock.
    pub fn tick(&self, session: &mut StudySession) -> bool {
        session.tick(self.clock.now())
    }
}
