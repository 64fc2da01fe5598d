//! Google Gemini API client.
//!
//! Implements the `GenerateClient` trait for Gemini models via the
//! Generative Language API.

mod api;
mod client;
mod config;

pub use client::{GeminiClient, GeminiFactory};
pub use config::GeminiConfig;
