//! Forecast CRUD: the store abstraction and the service that validates
//! requests before touching it.

pub mod service;
pub mod store;
