use thiserror::Error;

/// Choices beyond this count are dropped when an item is built.
pub const MAX_CHOICES: usize = 4;

//
// ─── ITEM ERRORS ───────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ItemError {
    #[error("item has no choices")]
    NoChoices,

    #[error("correct index {index} does not reference one of {len} choices")]
    CorrectIndexOutOfRange { index: usize, len: usize },
}

//
// ─── ITEM ──────────────────────────────────────────────────────────────────────
//

/// One generated multiple-choice question.
///
/// `selected_index` starts empty and can be set exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    prompt: String,
    choices: Vec<String>,
    correct_index: usize,
    selected_index: Option<usize>,
}

impl Item {
    /// Build an unanswered item.
    ///
    /// Only the first [`MAX_CHOICES`] choices are kept. Fewer are accepted.
    /// The prompt is taken as given, blank included.
    ///
    /// # Errors
    ///
    /// Returns `ItemError::NoChoices` when no choices remain and
    /// `ItemError::CorrectIndexOutOfRange` when `correct_index` does not point at a kept choice.
    pub fn new(
        prompt: impl Into<String>,
        mut choices: Vec<String>,
        correct_index: usize,
    ) -> Result<Self, ItemError> {
        choices.truncate(MAX_CHOICES);
        if choices.is_empty() {
            return Err(ItemError::NoChoices);
        }
        if correct_index >= choices.len() {
            return Err(ItemError::CorrectIndexOutOfRange {
                index: correct_index,
                len: choices.len(),
            });
        }

        Ok(Self {
            prompt: prompt.into(),
            choices,
            correct_index,
            selected_index: None,
        })
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    #[must_use]
    pub fn has_choice(&self, index: usize) -> bool {
        index < self.choices.len()
    }

    #[must_use]
    pub fn is_answered(&self) -> bool {
        self.selected_index.is_some()
    }

    /// `None` until answered.
    #[must_use]
    pub fn is_correct(&self) -> Option<bool> {
        self.selected_index
            .map(|selected| selected == self.correct_index)
    }

    /// Record the learner's choice. Returns `false` and leaves the item untouched
    /// if it is already answered or the choice is not present.
    pub(crate) fn select(&mut self, choice_index: usize) -> bool {
        if self.is_answered() || !self.has_choice(choice_index) {
            return false;
        }
        self.selected_index = Some(choice_index);
        true
    }
}

/// Letter shown next to a choice (`A` for 0 through `D` for 3).
#[must_use]
pub fn choice_label(index: usize) -> Option<char> {
    if index >= MAX_CHOICES {
        return None;
    }
    u8::try_from(index).ok().map(|offset| char::from(b'A' + offset))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abcd() -> Vec<String> {
        ["A", "B", "C", "D"].into_iter().map(String::from).collect()
    }

    #[test]
    fn new_item_is_unanswered() {
        let item = Item::new("What is photosynthesis?", abcd(), 2).unwrap();
        assert!(!item.is_answered());
        assert_eq!(item.is_correct(), None);
        assert_eq!(item.choices().len(), 4);
    }

    #[test]
    fn extra_choices_are_dropped() {
        let mut choices = abcd();
        choices.push("E".into());
        let item = Item::new("Q", choices, 3).unwrap();
        assert_eq!(item.choices().len(), MAX_CHOICES);
    }

    #[test]
    fn correct_index_must_reference_kept_choice() {
        let mut choices = abcd();
        choices.push("E".into());
        let err = Item::new("Q", choices, 4).unwrap_err();
        assert_eq!(err, ItemError::CorrectIndexOutOfRange { index: 4, len: 4 });

        let err = Item::new("Q", vec!["only".into()], 1).unwrap_err();
        assert_eq!(err, ItemError::CorrectIndexOutOfRange { index: 1, len: 1 });
    }

    #[test]
    fn empty_choices_are_rejected() {
        assert_eq!(Item::new("Q", Vec::new(), 0).unwrap_err(), ItemError::NoChoices);
    }

    #[test]
    fn blank_prompt_is_kept_as_given() {
        let item = Item::new("", abcd(), 1).unwrap();
        assert_eq!(item.prompt(), "");
        assert_eq!(item.correct_index(), 1);
    }

    #[test]
    fn select_is_single_shot() {
        let mut item = Item::new("Q", abcd(), 1).unwrap();
        assert!(item.select(0));
        assert!(!item.select(1));
        assert_eq!(item.selected_index(), Some(0));
        assert_eq!(item.is_correct(), Some(false));
    }

    #[test]
    fn select_rejects_missing_choice() {
        let mut item = Item::new("Q", vec!["yes".into(), "no".into()], 0).unwrap();
        assert!(!item.select(3));
        assert!(!item.is_answered());
    }

    #[test]
    fn labels_cover_four_choices() {
        assert_eq!(choice_label(0), Some('A'));
        assert_eq!(choice_label(3), Some('D'));
        assert_eq!(choice_label(4), None);
    }
}
