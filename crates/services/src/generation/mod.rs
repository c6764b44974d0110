mod client;
mod wire;

pub use client::{FlashcardGenerator, HttpGenerationClient};
