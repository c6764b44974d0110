use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Duration;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use services::{Clock, FlashcardGenerator, GenerationError, MalformedResponse, StudyLoopService};
use study_core::model::{Item, Phase, ReviewSettings, StudyInput};
use study_core::time::fixed_now;

use crate::context::{UiApp, build_app_context};
use crate::views::{StudyIntent, StudyView};

use super::study::StudyTestHandles;

pub enum Canned {
    Items(Vec<Item>),
    Malformed,
}

pub struct CannedGenerator {
    reply: Canned,
    calls: AtomicUsize,
}

impl CannedGenerator {
    pub fn new(reply: Canned) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FlashcardGenerator for CannedGenerator {
    async fn generate(&self, _input: &StudyInput) -> Result<Vec<Item>, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Canned::Items(items) => Ok(items.clone()),
            Canned::Malformed => Err(MalformedResponse::MissingFlashcards.into()),
        }
    }
}

struct TestApp {
    study_loop: Arc<StudyLoopService>,
}

impl UiApp for TestApp {
    fn study_loop(&self) -> Arc<StudyLoopService> {
        Arc::clone(&self.study_loop)
    }
}

#[derive(Props, Clone)]
struct StudyHarnessProps {
    app: Arc<TestApp>,
    handles: StudyTestHandles,
}

impl PartialEq for StudyHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn StudyHarness(props: StudyHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(app));
    use_context_provider(|| props.handles.clone());
    rsx! { StudyView {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    handles: StudyTestHandles,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub fn dispatch(&mut self, intent: StudyIntent) {
        let dispatch = self.handles.dispatch();
        self.dom.in_runtime(|| dispatch.call(intent));
        drive_dom(&mut self.dom);
    }

    /// Let spawned generation and advance tasks run to completion.
    pub async fn settle(&mut self) {
        for _ in 0..3 {
            let _ = tokio::time::timeout(
                std::time::Duration::from_millis(50),
                self.dom.wait_for_work(),
            )
            .await;
            self.dom.render_immediate(&mut NoOpMutations);
            self.dom.process_events();
        }
    }

    pub fn phase(&self) -> Phase {
        let session = self.handles.session();
        self.dom.in_runtime(|| session.read().phase())
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// Advance delay is zero so answered items move on as soon as the task runs.
pub fn setup_study_harness(generator: Arc<dyn FlashcardGenerator>) -> ViewHarness {
    let study_loop = StudyLoopService::new(Clock::fixed(fixed_now()), generator)
        .with_settings(ReviewSettings::new(Duration::zero()));
    let app = Arc::new(TestApp {
        study_loop: Arc::new(study_loop),
    });
    let handles = StudyTestHandles::default();

    let dom = VirtualDom::new_with_props(
        StudyHarness,
        StudyHarnessProps {
            app,
            handles: handles.clone(),
        },
    );

    let mut harness = ViewHarness { dom, handles };
    harness.rebuild();
    harness
}
