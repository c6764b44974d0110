mod failure;
mod ids;
mod input;
mod item;
mod review;
mod session;

pub use failure::{FailureKind, GENERIC_FAILURE_MESSAGE, GenerationFailure, INVALID_RESPONSE_MESSAGE};
pub use ids::{GenerationToken, SessionId, TimerHandle};
pub use input::{FileRef, InputDraft, StudyInput, ValidationError, collect};
pub use item::{Item, ItemError, MAX_CHOICES, choice_label};
pub use review::{
    AdvanceTimer, DEFAULT_ADVANCE_DELAY_MS, IgnoreReason, Review, ReviewProgress, ReviewSettings,
    SelectOutcome,
};
pub use session::{
    BackOutcome, Mode, PendingRequest, Phase, Resolution, StudySession, SubmitError,
};
