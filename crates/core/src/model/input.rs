use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationError {
    #[error("Please paste text or attach a PDF.")]
    MissingInput,

    #[error("Only PDF files can be attached ({name}).")]
    UnsupportedFile { name: String },
}

/// A file the learner picked. The core never opens it; reading the bytes is
/// the generation client's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRef {
    path: PathBuf,
    name: String,
}

impl FileRef {
    /// Reference a file by path, using its final component as the display name.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { path, name }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.path.as_os_str().is_empty()
    }

    #[must_use]
    pub fn is_pdf(&self) -> bool {
        Path::new(&self.name)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
    }
}

/// Validated study material, ready to hand to the generation client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudyInput {
    Text(String),
    File(FileRef),
}

impl StudyInput {
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            StudyInput::Text(_) => "text",
            StudyInput::File(_) => "file",
        }
    }
}

/// Gather study material from the input area.
///
/// A non-empty file reference wins over text; text is only used when no file
/// is attached, and only after trimming.
///
/// # Errors
///
/// Returns `ValidationError::MissingInput` when neither is present and
/// `ValidationError::UnsupportedFile` when the attachment is not a PDF.
pub fn collect(file: Option<&FileRef>, text: &str) -> Result<StudyInput, ValidationError> {
    if let Some(file) = file.filter(|file| !file.is_empty()) {
        if !file.is_pdf() {
            return Err(ValidationError::UnsupportedFile {
                name: file.name().to_string(),
            });
        }
        return Ok(StudyInput::File(file.clone()));
    }

    let text = text.trim();
    if text.is_empty() {
        return Err(ValidationError::MissingInput);
    }
    Ok(StudyInput::Text(text.to_string()))
}

/// What the input area currently holds. Kept across failed attempts so a retry
/// starts from the learner's own text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputDraft {
    pub text: String,
    pub file: Option<FileRef>,
}

impl InputDraft {
    /// # Errors
    ///
    /// See [`collect`].
    pub fn collect(&self) -> Result<StudyInput, ValidationError> {
        collect(self.file.as_ref(), &self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_is_trimmed() {
        let input = collect(None, "  Photosynthesis notes \n").unwrap();
        assert_eq!(input, StudyInput::Text("Photosynthesis notes".into()));
    }

    #[test]
    fn missing_input_is_rejected() {
        assert_eq!(collect(None, "").unwrap_err(), ValidationError::MissingInput);
        assert_eq!(collect(None, " \t\n").unwrap_err(), ValidationError::MissingInput);
    }

    #[test]
    fn file_takes_precedence_over_text() {
        let file = FileRef::new("/tmp/notes.pdf");
        let input = collect(Some(&file), "ignored").unwrap();
        assert_eq!(input, StudyInput::File(file));
    }

    #[test]
    fn empty_file_ref_falls_back_to_text() {
        let file = FileRef::new("");
        let input = collect(Some(&file), "text").unwrap();
        assert_eq!(input.kind(), "text");
    }

    #[test]
    fn pdf_extension_is_case_insensitive() {
        assert!(FileRef::new("/tmp/Chapter1.PDF").is_pdf());
        assert!(!FileRef::new("/tmp/notes.txt").is_pdf());
    }

    #[test]
    fn non_pdf_file_is_rejected_even_with_text() {
        let file = FileRef::new("/tmp/notes.docx");
        let err = collect(Some(&file), "some text").unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnsupportedFile {
                name: "notes.docx".into()
            }
        );
    }

    #[test]
    fn draft_collects_its_fields() {
        let draft = InputDraft {
            text: "cells".into(),
            file: None,
        };
        assert_eq!(draft.collect().unwrap(), StudyInput::Text("cells".into()));
    }
}
