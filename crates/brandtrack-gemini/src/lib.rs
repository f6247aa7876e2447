//! Google Gemini text-generation client for brandtrack.

pub mod client;
pub mod error;
pub mod types;

pub use client::{GeminiClient, GeminiConfig};
pub use error::GeminiError;
