use study_core::model::{Item, Phase, StudySession, choice_label};

pub const APP_TITLE: &str = "AI Study Tool";
pub const TEXT_PLACEHOLDER: &str = "Paste notes or type here…";
pub const LOADING_MESSAGE: &str = "Generating flashcards — please wait...";
pub const COMPLETE_MESSAGE: &str = "You've finished the set — press Back to try another text.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChoiceStyle {
    Idle,
    Correct,
    Incorrect,
    Muted,
}

impl ChoiceStyle {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            ChoiceStyle::Idle => "choice-card",
            ChoiceStyle::Correct => "choice-card choice-correct",
            ChoiceStyle::Incorrect => "choice-card choice-incorrect",
            ChoiceStyle::Muted => "choice-card choice-muted",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChoiceVm {
    pub index: usize,
    pub label: String,
    pub text: String,
    pub style: ChoiceStyle,
    pub clickable: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemVm {
    pub item_index: usize,
    pub prompt: String,
    pub position_label: String,
    pub choices: Vec<ChoiceVm>,
    pub feedback: Option<&'static str>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CollectVm {
    pub text: String,
    pub file_path: String,
    pub attached_label: Option<String>,
    pub message: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompleteVm {
    pub message: &'static str,
    pub score_label: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScreenVm {
    Collect(CollectVm),
    Review(ItemVm),
    Complete(CompleteVm),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StudyVm {
    pub screen: ScreenVm,
    pub loading: bool,
    pub can_go_back: bool,
}

#[must_use]
pub fn map_study_screen(session: &StudySession) -> StudyVm {
    let phase = session.phase();
    let screen = match phase {
        Phase::Collecting | Phase::Generating | Phase::Error => {
            ScreenVm::Collect(map_collect(session))
        }
        Phase::Reviewing => match session.current_item() {
            Some(item) => ScreenVm::Review(map_item(
                item,
                session.cursor(),
                session.items().len(),
            )),
            None => ScreenVm::Complete(map_complete(session)),
        },
        Phase::Complete => ScreenVm::Complete(map_complete(session)),
    };

    StudyVm {
        screen,
        loading: phase == Phase::Generating,
        can_go_back: matches!(phase, Phase::Reviewing | Phase::Complete),
    }
}

fn map_collect(session: &StudySession) -> CollectVm {
    let draft = session.draft();
    let message = session
        .validation_error()
        .map(ToString::to_string)
        .or_else(|| session.error_message().map(str::to_string));

    CollectVm {
        text: draft.text.clone(),
        file_path: draft
            .file
            .as_ref()
            .map(|file| file.path().display().to_string())
            .unwrap_or_default(),
        attached_label: draft
            .file
            .as_ref()
            .filter(|file| !file.name().is_empty())
            .map(|file| format!("Attached: {}", file.name())),
        message,
    }
}

#[must_use]
pub fn map_item(item: &Item, item_index: usize, total: usize) -> ItemVm {
    let answered = item.is_answered();
    let choices = item
        .choices()
        .iter()
        .enumerate()
        .map(|(index, text)| {
            let style = if !answered {
                ChoiceStyle::Idle
            } else if index == item.correct_index() {
                ChoiceStyle::Correct
            } else if item.selected_index() == Some(index) {
                ChoiceStyle::Incorrect
            } else {
                ChoiceStyle::Muted
            };
            ChoiceVm {
                index,
                label: choice_label(index).map_or_else(String::new, |label| format!("{label}.")),
                text: text.clone(),
                style,
                clickable: !answered,
            }
        })
        .collect();

    let feedback = item.is_correct().map(|correct| {
        if correct { "Correct!" } else { "Not quite." }
    });

    ItemVm {
        item_index,
        prompt: item.prompt().to_string(),
        position_label: format!("Question {} of {total}", item_index + 1),
        choices,
        feedback,
    }
}

fn map_complete(session: &StudySession) -> CompleteVm {
    let score_label = session
        .progress()
        .filter(|progress| progress.total > 0)
        .map(|progress| format!("{} / {} correct", progress.correct, progress.total));
    CompleteVm {
        message: COMPLETE_MESSAGE,
        score_label,
    }
}
