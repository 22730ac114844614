//! Structured-output LLM client: chat-completions transport plus recovery of
//! JSON documents from free-text completions.

pub mod chat_api;
pub mod chat_client;
pub mod error;
pub mod structured;
