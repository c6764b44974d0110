use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use url::Url;

use study_core::model::{FileRef, Item, StudyInput};

use crate::config::GenerationConfig;
use crate::error::GenerationError;

use super::wire;

const PDF_MIME: &str = "application/pdf";

/// Turns study material into a question set.
#[async_trait]
pub trait FlashcardGenerator: Send + Sync {
    /// # Errors
    ///
    /// Returns `GenerationError` when the call fails or the answer is unusable.
    async fn generate(&self, input: &StudyInput) -> Result<Vec<Item>, GenerationError>;
}

/// Generation client for the `POST /process` endpoint.
#[derive(Clone)]
pub struct HttpGenerationClient {
    client: Client,
    endpoint: Url,
}

impl HttpGenerationClient {
    /// # Errors
    ///
    /// Returns `GenerationError::Transport` if the HTTP client cannot be built.
    pub fn new(config: &GenerationConfig) -> Result<Self, GenerationError> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            client,
            endpoint: config.process_url(),
        })
    }

    async fn form_for(input: &StudyInput) -> Result<Form, GenerationError> {
        match input {
            StudyInput::Text(text) => Ok(Form::new().text("text", text.clone())),
            StudyInput::File(file) => Ok(Form::new().part("file", Self::file_part(file).await?)),
        }
    }

    async fn file_part(file: &FileRef) -> Result<Part, GenerationError> {
        let bytes = tokio::fs::read(file.path())
            .await
            .map_err(|source| GenerationError::File {
                path: file.path().to_path_buf(),
                source,
            })?;
        let part = Part::bytes(bytes)
            .file_name(file.name().to_string())
            .mime_str(PDF_MIME)?;
        Ok(part)
    }
}

#[async_trait]
impl FlashcardGenerator for HttpGenerationClient {
    async fn generate(&self, input: &StudyInput) -> Result<Vec<Item>, GenerationError> {
        let form = Self::form_for(input).await?;

        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(GenerationError::HttpStatus {
                status,
                message: wire::error_message(&body),
            });
        }

        Ok(wire::parse_flashcards(&body)?)
    }
}
