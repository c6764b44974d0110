use study_core::model::{Item, Phase};

use super::StudyIntent;
use super::test_harness::{Canned, CannedGenerator, setup_study_harness};

fn flashcards() -> Vec<Item> {
    vec![
        Item::new(
            "What is photosynthesis?",
            vec![
                "Cell division".into(),
                "Protein folding".into(),
                "Light to chemical energy".into(),
                "Respiration".into(),
            ],
            2,
        )
        .unwrap(),
        Item::new(
            "Where does it happen?",
            vec!["Nucleus".into(), "Chloroplast".into()],
            1,
        )
        .unwrap(),
    ]
}

#[tokio::test(flavor = "current_thread")]
async fn collect_screen_renders_input() {
    let generator = CannedGenerator::new(Canned::Items(flashcards()));
    let harness = setup_study_harness(generator);

    let html = harness.render();
    assert!(html.contains("AI Study Tool"), "missing title in {html}");
    assert!(html.contains("Paste notes or type here"), "missing placeholder in {html}");
    assert!(!html.contains("Back"), "unexpected back button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn empty_submit_shows_validation_message() {
    let generator = CannedGenerator::new(Canned::Items(flashcards()));
    let mut harness = setup_study_harness(generator.clone());

    harness.dispatch(StudyIntent::Submit);
    harness.settle().await;

    let html = harness.render();
    assert!(
        html.contains("Please paste text or attach a PDF."),
        "missing validation message in {html}"
    );
    assert_eq!(harness.phase(), Phase::Collecting);
    assert_eq!(generator.calls(), 0);
}

#[tokio::test(flavor = "current_thread")]
async fn submitted_text_reviews_through_the_set() {
    let generator = CannedGenerator::new(Canned::Items(flashcards()));
    let mut harness = setup_study_harness(generator.clone());

    harness.dispatch(StudyIntent::EditText("Photosynthesis notes".into()));
    harness.dispatch(StudyIntent::Submit);
    harness.settle().await;

    assert_eq!(harness.phase(), Phase::Reviewing);
    let html = harness.render();
    assert!(html.contains("What is photosynthesis?"), "missing prompt in {html}");
    assert!(html.contains("Question 1 of 2"), "missing position in {html}");
    assert!(html.contains("Back"), "missing back button in {html}");

    harness.dispatch(StudyIntent::Choose {
        item_index: 0,
        choice_index: 2,
    });
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Question 2 of 2"), "did not advance: {html}");

    harness.dispatch(StudyIntent::Choose {
        item_index: 1,
        choice_index: 0,
    });
    harness.settle().await;
    assert_eq!(harness.phase(), Phase::Complete);
    let html = harness.render();
    assert!(html.contains("finished the set"), "missing completion note in {html}");
    assert!(html.contains("1 / 2 correct"), "missing score in {html}");
    assert_eq!(generator.calls(), 1);
}

#[tokio::test(flavor = "current_thread")]
async fn malformed_reply_shows_error_and_keeps_text() {
    let generator = CannedGenerator::new(Canned::Malformed);
    let mut harness = setup_study_harness(generator);

    harness.dispatch(StudyIntent::EditText("Cell notes".into()));
    harness.dispatch(StudyIntent::Submit);
    harness.settle().await;

    assert_eq!(harness.phase(), Phase::Error);
    let html = harness.render();
    assert!(
        html.contains("Invalid response from server"),
        "missing error in {html}"
    );
    assert!(html.contains("Cell notes"), "draft text lost: {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn back_returns_to_input() {
    let generator = CannedGenerator::new(Canned::Items(flashcards()));
    let mut harness = setup_study_harness(generator);

    harness.dispatch(StudyIntent::EditText("Photosynthesis notes".into()));
    harness.dispatch(StudyIntent::Submit);
    harness.settle().await;
    assert_eq!(harness.phase(), Phase::Reviewing);

    harness.dispatch(StudyIntent::Back);
    assert_eq!(harness.phase(), Phase::Collecting);
    let html = harness.render();
    assert!(html.contains("AI Study Tool"), "missing title in {html}");
    assert!(!html.contains("What is photosynthesis?"), "stale item in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn attached_path_is_labelled() {
    let generator = CannedGenerator::new(Canned::Items(flashcards()));
    let mut harness = setup_study_harness(generator);

    harness.dispatch(StudyIntent::EditFilePath("/tmp/chapter.pdf".into()));
    let html = harness.render();
    assert!(html.contains("Attached: chapter.pdf"), "missing label in {html}");

    harness.dispatch(StudyIntent::EditFilePath("  ".into()));
    let html = harness.render();
    assert!(!html.contains("Attached:"), "label not cleared in {html}");
}
