//! Request extraction helpers.

pub mod body;
pub mod query;
