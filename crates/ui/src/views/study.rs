use dioxus::prelude::*;
use tracing::debug;

use study_core::model::FileRef;

use crate::context::AppContext;
use crate::views::components::{CollectPanel, CompletePanel, LoadingOverlay, ReviewCard};
use crate::vm::{ScreenVm, StudyVm, map_study_screen};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;
#[cfg(test)]
use study_core::model::StudySession;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StudyIntent {
    EditText(String),
    EditFilePath(String),
    Submit,
    Choose { item_index: usize, choice_index: usize },
    Back,
}

#[component]
pub fn StudyView() -> Element {
    let ctx = use_context::<AppContext>();
    let study_loop = ctx.study_loop();
    let session = {
        let study_loop = study_loop.clone();
        use_signal(move || study_loop.new_session())
    };

    let dispatch_intent = {
        let study_loop = study_loop.clone();
        use_callback(move |intent: StudyIntent| {
            let mut session = session;
            match intent {
                StudyIntent::EditText(text) => {
                    session.write().set_text(text);
                }
                StudyIntent::EditFilePath(path) => {
                    let path = path.trim();
                    if path.is_empty() {
                        session.write().clear_file();
                    } else {
                        session.write().attach_file(FileRef::new(path));
                    }
                }
                StudyIntent::Submit => {
                    let submitted = session.write().begin_submit();
                    let pending = match submitted {
                        Ok(pending) => pending,
                        Err(err) => {
                            debug!(error = %err, "submit rejected");
                            return;
                        }
                    };
                    let study_loop = study_loop.clone();
                    spawn(async move {
                        let outcome = study_loop.generate(pending).await;
                        let mut session = session;
                        study_loop.apply(&mut session.write(), outcome);
                    });
                }
                StudyIntent::Choose {
                    item_index,
                    choice_index,
                } => {
                    let outcome =
                        study_loop.select_answer(&mut session.write(), item_index, choice_index);
                    let Some(timer) = outcome.timer() else {
                        return;
                    };
                    let clock = study_loop.clock();
                    spawn(async move {
                        let wait = timer.remaining(clock.now()).to_std().unwrap_or_default();
                        tokio::time::sleep(wait).await;
                        let mut session = session;
                        session.write().fire_advance(timer.handle);
                    });
                }
                StudyIntent::Back => {
                    let outcome = session.write().go_back();
                    debug!(?outcome, "back");
                }
            }
        })
    };

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<StudyTestHandles>() {
                handles.register(dispatch_intent, session);
            }
        }
    }

    let StudyVm {
        screen, loading, ..
    } = map_study_screen(&session.read());

    rsx! {
        div { class: "app-container",
            match screen {
                ScreenVm::Collect(collect) => rsx! {
                    CollectPanel {
                        vm: collect,
                        loading,
                        on_intent: dispatch_intent,
                    }
                },
                ScreenVm::Review(item) => rsx! {
                    StudyFrame { on_intent: dispatch_intent,
                        ReviewCard { item, on_intent: dispatch_intent }
                    }
                },
                ScreenVm::Complete(complete) => rsx! {
                    StudyFrame { on_intent: dispatch_intent,
                        CompletePanel { vm: complete }
                    }
                },
            }

            if loading {
                LoadingOverlay {}
            }
        }
    }
}

#[component]
fn StudyFrame(on_intent: EventHandler<StudyIntent>, children: Element) -> Element {
    rsx! {
        div { class: "study-frame",
            div { class: "study-frame__nav",
                button {
                    class: "back-btn",
                    id: "study-back",
                    r#type: "button",
                    onclick: move |_| on_intent.call(StudyIntent::Back),
                    "← Back"
                }
            }
            {children}
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct StudyTestHandles {
    dispatch: Rc<RefCell<Option<Callback<StudyIntent>>>>,
    session: Rc<RefCell<Option<Signal<StudySession>>>>,
}

#[cfg(test)]
impl StudyTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<StudyIntent>, session: Signal<StudySession>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.session.borrow_mut() = Some(session);
    }

    pub(crate) fn dispatch(&self) -> Callback<StudyIntent> {
        (*self.dispatch.borrow()).expect("study dispatch registered")
    }

    pub(crate) fn session(&self) -> Signal<StudySession> {
        (*self.session.borrow()).expect("study session registered")
    }
}
