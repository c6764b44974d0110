use dioxus::prelude::*;

use crate::views::StudyIntent;
use crate::vm::{
    APP_TITLE, ChoiceVm, CollectVm, CompleteVm, ItemVm, LOADING_MESSAGE, TEXT_PLACEHOLDER,
};

#[component]
pub fn CollectPanel(vm: CollectVm, loading: bool, on_intent: EventHandler<StudyIntent>) -> Element {
    let mut show_path = use_signal(|| false);
    let path_visible = show_path() || !vm.file_path.is_empty();

    rsx! {
        h1 { class: "app-title", "{APP_TITLE}" }

        div { class: "chat-input",
            button {
                class: "attach-btn",
                id: "study-attach",
                r#type: "button",
                title: "Attach PDF",
                onclick: move |_| {
                    let visible = show_path();
                    show_path.set(!visible);
                },
                "+"
            }
            textarea {
                class: "chat-textarea",
                id: "study-text",
                placeholder: TEXT_PLACEHOLDER,
                value: "{vm.text}",
                oninput: move |evt| on_intent.call(StudyIntent::EditText(evt.value())),
                onkeydown: move |evt: KeyboardEvent| {
                    // Shift+Enter keeps the newline.
                    if evt.data.key() == Key::Enter
                        && !evt.data.modifiers().contains(Modifiers::SHIFT)
                    {
                        evt.prevent_default();
                        on_intent.call(StudyIntent::Submit);
                    }
                },
            }
            button {
                class: "upload-btn",
                id: "study-submit",
                r#type: "button",
                disabled: loading,
                onclick: move |_| on_intent.call(StudyIntent::Submit),
                if loading { "…" } else { "↑" }
            }
        }

        if path_visible {
            input {
                class: "file-path",
                id: "study-file",
                r#type: "text",
                placeholder: "Path to a PDF",
                value: "{vm.file_path}",
                oninput: move |evt| on_intent.call(StudyIntent::EditFilePath(evt.value())),
            }
        }
        if let Some(label) = vm.attached_label.as_ref() {
            div { class: "attached-note", "{label}" }
        }
        if let Some(message) = vm.message.as_ref() {
            div { class: "error-note", id: "study-error", "{message}" }
        }
    }
}

#[component]
pub fn ReviewCard(item: ItemVm, on_intent: EventHandler<StudyIntent>) -> Element {
    let item_index = item.item_index;

    rsx! {
        div { class: "review-card",
            div { class: "review-position", "{item.position_label}" }
            div { class: "flashcard-note", "{item.prompt}" }
            div { class: "choice-grid",
                for choice in item.choices.iter() {
                    ChoiceCard {
                        key: "{choice.index}",
                        item_index,
                        choice: choice.clone(),
                        on_intent,
                    }
                }
            }
            if let Some(feedback) = item.feedback {
                div { class: "feedback-note", "{feedback}" }
            }
        }
    }
}

#[component]
fn ChoiceCard(item_index: usize, choice: ChoiceVm, on_intent: EventHandler<StudyIntent>) -> Element {
    let choice_index = choice.index;
    let clickable = choice.clickable;

    rsx! {
        div {
            class: choice.style.class(),
            id: "choice-{choice_index}",
            onclick: move |_| {
                if clickable {
                    on_intent.call(StudyIntent::Choose { item_index, choice_index });
                }
            },
            div { class: "choice-label", "{choice.label}" }
            div { class: "choice-text", "{choice.text}" }
        }
    }
}

#[component]
pub fn CompletePanel(vm: CompleteVm) -> Element {
    rsx! {
        div { class: "flashcard-note complete-note", "{vm.message}" }
        if let Some(score) = vm.score_label.as_ref() {
            div { class: "score-note", "{score}" }
        }
    }
}

#[component]
pub fn LoadingOverlay() -> Element {
    rsx! {
        div { class: "loading-overlay",
            div { class: "loading-box", "{LOADING_MESSAGE}" }
        }
    }
}
