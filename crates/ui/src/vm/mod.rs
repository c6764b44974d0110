mod study_vm;

pub use study_vm::{
    APP_TITLE, COMPLETE_MESSAGE, ChoiceStyle, ChoiceVm, CollectVm, CompleteVm, ItemVm,
    LOADING_MESSAGE, ScreenVm, StudyVm, TEXT_PLACEHOLDER, map_item, map_study_screen,
};
