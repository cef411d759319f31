//! OpenAI-compatible chat completions backend.
//!
//! Any provider speaking `POST {base}/chat/completions` plugs in by
//! implementing [`ChatCompletionsConfig`].

pub mod client;
pub(crate) mod request;
pub(crate) mod response;

pub use client::{ChatCompletionsClient, ChatCompletionsConfig};
