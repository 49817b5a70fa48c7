//! Infrastructure layer for Lectern.
//!
//! Contains implementations of the traits defined in `lectern-core`:
//! the DashMap-backed forecast store, the OpenAI/Azure OpenAI chat-completion
//! client, and the `lectern.toml` loader.

pub mod config;
pub mod llm;
pub mod memory;
