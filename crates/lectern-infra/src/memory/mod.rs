//! In-process stores.

pub mod forecast;
