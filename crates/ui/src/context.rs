use std::sync::Arc;

use services::StudyLoopService;

pub trait UiApp: Send + Sync {
    fn study_loop(&self) -> Arc<StudyLoopService>;
}

#[derive(Clone)]
pub struct AppContext {
    study_loop: Arc<StudyLoopService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &dyn UiApp) -> Self {
        Self {
            study_loop: app.study_loop(),
        }
    }

    #[must_use]
    pub fn study_loop(&self) -> Arc<StudyLoopService> {
        Arc::clone(&self.study_loop)
    }
}

// Provided by the composition root in `crates/app`.
#[must_use]
pub fn build_app_context(app: Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app.as_ref())
}
