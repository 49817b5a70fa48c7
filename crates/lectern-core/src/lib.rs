//! Business logic and trait definitions for Lectern.
//!
//! - `forecast`: the `ForecastStore` trait and the `ForecastService` that
//!   validates requests and drives the store
//! - `chat`: prompt strategies and the `KeyPhraseService`
//! - `llm`: the `LlmProvider` abstraction implemented in lectern-infra
//!
//! This crate never depends on lectern-infra.

pub mod chat;
pub mod forecast;
pub mod llm;
