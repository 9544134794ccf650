//! Chat-completion client for drafting constituent emails.
//!
//! The crate exposes a small trait, [`LlmClient`], so the service can be
//! exercised against a mock while production traffic goes to an
//! OpenAI-compatible `/chat/completions` endpoint via [`OpenAiClient`].
//!
//! ```ignore
//! use speakup_llm::{ChatMessage, CompletionRequest, LlmClient, OpenAiClient};
//!
//! let client = OpenAiClient::new("https://api.openai.com/v1", "sk-...");
//! let request = CompletionRequest::new("gpt-4-turbo", 0.7)
//!     .with_message(ChatMessage::system("You write emails."))
//!     .with_message(ChatMessage::user("Draft a note to my senator."));
//! let text = client.complete(&request).await?;
//! ```

#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::print_stdout,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]

mod client;
mod types;

pub use client::{LlmClient, LlmError, OpenAiClient};
pub use types::{ChatMessage, CompletionRequest, Role};

#[cfg(any(test, feature = "test-utils"))]
pub use client::mock;
