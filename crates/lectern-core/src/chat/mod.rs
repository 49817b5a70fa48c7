//! Key-phrase chat gateway: prompt strategies and the service that calls
//! the model and interprets its structured reply.

pub mod prompt;
pub mod service;
