//! JSON shapes exchanged with the generation endpoint.

use serde::Deserialize;
use serde_json::Value;

use study_core::model::{GENERIC_FAILURE_MESSAGE, Item};

use crate::error::MalformedResponse;

#[derive(Debug, Deserialize)]
struct FlashcardDto {
    question: String,
    choices: Vec<String>,
    answer_index: i64,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Parse a success body `{ "flashcards": [ {question, choices, answer_index}, ... ] }`.
///
/// # Errors
///
/// Returns `MalformedResponse` when the body is not JSON, `flashcards` is
/// missing or not a list, or any element fails to become an `Item`.
pub(crate) fn parse_flashcards(body: &str) -> Result<Vec<Item>, MalformedResponse> {
    let value: Value = serde_json::from_str(body).map_err(|_| MalformedResponse::NotJson)?;
    let cards = match value.get("flashcards") {
        None | Some(Value::Null) => return Err(MalformedResponse::MissingFlashcards),
        Some(Value::Array(cards)) => cards,
        Some(_) => return Err(MalformedResponse::FlashcardsNotList),
    };

    cards
        .iter()
        .enumerate()
        .map(|(index, raw)| parse_flashcard(index, raw))
        .collect()
}

fn parse_flashcard(index: usize, raw: &Value) -> Result<Item, MalformedResponse> {
    let dto = FlashcardDto::deserialize(raw).map_err(|err| MalformedResponse::InvalidFlashcard {
        index,
        reason: err.to_string(),
    })?;
    let correct_index =
        usize::try_from(dto.answer_index).map_err(|_| MalformedResponse::InvalidFlashcard {
            index,
            reason: format!("answer_index {} is negative", dto.answer_index),
        })?;

    Item::new(dto.question, dto.choices, correct_index)
        .map_err(|source| MalformedResponse::InvalidItem { index, source })
}

/// Human-readable message from a failed response body.
///
/// Prefers the backend's `{"error": "..."}` field, then the raw body, then a
/// generic message.
pub(crate) fn error_message(body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if !parsed.error.trim().is_empty() {
            return parsed.error;
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        GENERIC_FAILURE_MESSAGE.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use study_core::model::ItemError;

    #[test]
    fn parses_flashcards() {
        let body = r#"{"flashcards":[{"question":"What is photosynthesis?","choices":["A","B","C","D"],"answer_index":2}]}"#;
        let items = parse_flashcards(body).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].prompt(), "What is photosynthesis?");
        assert_eq!(items[0].correct_index(), 2);
        assert!(!items[0].is_answered());
    }

    #[test]
    fn empty_list_is_valid() {
        assert!(parse_flashcards(r#"{"flashcards":[]}"#).unwrap().is_empty());
    }

    #[test]
    fn blank_question_does_not_reject_the_set() {
        let body = r#"{"flashcards":[
            {"question":"Q1","choices":["A","B","C","D"],"answer_index":0},
            {"question":"","choices":["A","B","C","D"],"answer_index":1}
        ]}"#;
        let items = parse_flashcards(body).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].prompt(), "");
        assert_eq!(items[1].correct_index(), 1);
    }

    #[test]
    fn rejects_non_list_and_missing_field() {
        assert_eq!(
            parse_flashcards(r#"{"flashcards":{"question":"Q"}}"#).unwrap_err(),
            MalformedResponse::FlashcardsNotList
        );
        assert_eq!(
            parse_flashcards(r#"{"cards":[]}"#).unwrap_err(),
            MalformedResponse::MissingFlashcards
        );
        assert_eq!(
            parse_flashcards("<html>").unwrap_err(),
            MalformedResponse::NotJson
        );
    }

    #[test]
    fn rejects_item_missing_fields() {
        let body = r#"{"flashcards":[{"question":"Q","choices":["A","B"]}]}"#;
        assert!(matches!(
            parse_flashcards(body).unwrap_err(),
            MalformedResponse::InvalidFlashcard { index: 0, .. }
        ));
    }

    #[test]
    fn rejects_out_of_range_answer() {
        let body = r#"{"flashcards":[
            {"question":"Q1","choices":["A","B","C","D"],"answer_index":0},
            {"question":"Q2","choices":["A","B"],"answer_index":3}
        ]}"#;
        assert_eq!(
            parse_flashcards(body).unwrap_err(),
            MalformedResponse::InvalidItem {
                index: 1,
                source: ItemError::CorrectIndexOutOfRange { index: 3, len: 2 },
            }
        );
    }

    #[test]
    fn rejects_negative_answer() {
        let body = r#"{"flashcards":[{"question":"Q","choices":["A"],"answer_index":-1}]}"#;
        assert!(matches!(
            parse_flashcards(body).unwrap_err(),
            MalformedResponse::InvalidFlashcard { index: 0, .. }
        ));
    }

    #[test]
    fn error_message_prefers_error_field() {
        assert_eq!(
            error_message(r#"{"error":"No text found in the provided file or box."}"#),
            "No text found in the provided file or box."
        );
        assert_eq!(error_message("  Bad gateway \n"), "Bad gateway");
        assert_eq!(error_message(""), GENERIC_FAILURE_MESSAGE);
    }
}
