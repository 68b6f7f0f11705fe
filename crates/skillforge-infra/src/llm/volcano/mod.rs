//! Volcano Engine (Ark) LLM provider implementation.
//!
//! Talks to the Ark "responses" API, whose answer may arrive either as an
//! assistant message or, when that is missing, as a reasoning summary.

pub mod client;
pub mod types;

pub use client::VolcanoProvider;
