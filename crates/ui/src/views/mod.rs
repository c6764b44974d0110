mod components;
mod study;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use components::{CollectPanel, CompletePanel, LoadingOverlay, ReviewCard};
pub use study::{StudyIntent, StudyView};
