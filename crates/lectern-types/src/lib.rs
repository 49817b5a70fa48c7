//! Shared domain types for Lectern.
//!
//! This crate contains the types used across both demos: forecast records
//! and their request shapes, chat key phrases and demo variants, provider
//! agnostic LLM request/response types, configuration, and error enums.
//!
//! Zero infrastructure dependencies -- serde, uuid, chrono, thiserror,
//! schemars and secrecy only.

pub mod chat;
pub mod config;
pub mod error;
pub mod forecast;
pub mod llm;
