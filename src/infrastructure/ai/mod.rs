//! AI recommendation provider.

pub mod client;

pub use client::GeminiClient;
