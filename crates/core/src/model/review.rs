use chrono::{DateTime, Duration, Utc};

use crate::model::{Item, TimerHandle};

/// How long answer feedback stays visible before the next item replaces it.
pub const DEFAULT_ADVANCE_DELAY_MS: i64 = 900;

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewSettings {
    advance_delay: Duration,
}

impl ReviewSettings {
    /// Negative delays are clamped to zero.
    #[must_use]
    pub fn new(advance_delay: Duration) -> Self {
        Self {
            advance_delay: advance_delay.max(Duration::zero()),
        }
    }

    #[must_use]
    pub fn advance_delay(&self) -> Duration {
        self.advance_delay
    }
}

impl Default for ReviewSettings {
    fn default() -> Self {
        Self::new(Duration::milliseconds(DEFAULT_ADVANCE_DELAY_MS))
    }
}

//
// ─── DEFERRED ADVANCE ──────────────────────────────────────────────────────────
//

/// A scheduled move of the cursor past an answered item.
///
/// The owner of the event loop waits until `due_at`, then hands `handle` back
/// to the session. A handle that was cancelled or belongs to an abandoned
/// review is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvanceTimer {
    pub handle: TimerHandle,
    pub item_index: usize,
    pub due_at: DateTime<Utc>,
}

impl AdvanceTimer {
    /// Time left before the timer is due, never negative.
    #[must_use]
    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        (self.due_at - now).max(Duration::zero())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IgnoreReason {
    NotReviewing,
    NotCurrentItem { item_index: usize, cursor: usize },
    AlreadyAnswered,
    AdvancePending,
    UnknownChoice { choice_index: usize },
}

/// Result of a selection attempt. Ignored selections mutate nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    Scheduled(AdvanceTimer),
    Ignored(IgnoreReason),
}

impl SelectOutcome {
    #[must_use]
    pub fn timer(&self) -> Option<AdvanceTimer> {
        match self {
            SelectOutcome::Scheduled(timer) => Some(*timer),
            SelectOutcome::Ignored(_) => None,
        }
    }

    #[must_use]
    pub fn is_scheduled(&self) -> bool {
        matches!(self, SelectOutcome::Scheduled(_))
    }
}

//
// ─── PROGRESS ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewProgress {
    pub total: usize,
    pub answered: usize,
    pub correct: usize,
    pub remaining: usize,
    pub is_complete: bool,
}

//
// ─── REVIEW ────────────────────────────────────────────────────────────────────
//

/// The item list and cursor of one reviewing phase.
///
/// The cursor only moves forward, one step per fired timer, and stops at
/// `items.len()`, which is the complete state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    items: Vec<Item>,
    cursor: usize,
    pending: Option<AdvanceTimer>,
}

impl Review {
    pub(crate) fn new(items: Vec<Item>) -> Self {
        Self {
            items,
            cursor: 0,
            pending: None,
        }
    }

    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn current_item(&self) -> Option<&Item> {
        self.items.get(self.cursor)
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.cursor >= self.items.len()
    }

    #[must_use]
    pub fn pending_advance(&self) -> Option<AdvanceTimer> {
        self.pending
    }

    #[must_use]
    pub fn progress(&self) -> ReviewProgress {
        let answered = self.items.iter().filter(|item| item.is_answered()).count();
        let correct = self
            .items
            .iter()
            .filter(|item| item.is_correct() == Some(true))
            .count();
        ReviewProgress {
            total: self.items.len(),
            answered,
            correct,
            remaining: self.items.len().saturating_sub(self.cursor),
            is_complete: self.is_complete(),
        }
    }

    pub(crate) fn select(
        &mut self,
        item_index: usize,
        choice_index: usize,
        handle: TimerHandle,
        due_at: DateTime<Utc>,
    ) -> SelectOutcome {
        if item_index != self.cursor {
            return SelectOutcome::Ignored(IgnoreReason::NotCurrentItem {
                item_index,
                cursor: self.cursor,
            });
        }
        let Some(item) = self.items.get_mut(item_index) else {
            // cursor == len: the set is finished.
            return SelectOutcome::Ignored(IgnoreReason::NotCurrentItem {
                item_index,
                cursor: self.cursor,
            });
        };
        if item.is_answered() {
            return SelectOutcome::Ignored(IgnoreReason::AlreadyAnswered);
        }
        if self.pending.is_some() {
            return SelectOutcome::Ignored(IgnoreReason::AdvancePending);
        }
        if !item.select(choice_index) {
            return SelectOutcome::Ignored(IgnoreReason::UnknownChoice { choice_index });
        }

        let timer = AdvanceTimer {
            handle,
            item_index,
            due_at,
        };
        self.pending = Some(timer);
        SelectOutcome::Scheduled(timer)
    }

    pub(crate) fn fire(&mut self, handle: TimerHandle) -> bool {
        match self.pending {
            Some(timer) if timer.handle == handle => {
                self.pending = None;
                self.cursor = (self.cursor + 1).min(self.items.len());
                true
            }
            _ => false,
        }
    }

    pub(crate) fn due(&self, now: DateTime<Utc>) -> Option<TimerHandle> {
        self.pending
            .filter(|timer| timer.due_at <= now)
            .map(|timer| timer.handle)
    }

    pub(crate) fn cancel(&mut self, handle: TimerHandle) -> bool {
        if self.pending.is_some_and(|timer| timer.handle == handle) {
            self.pending = None;
            return true;
        }
        false
    }
}
