//! Command implementations.

pub mod build;
pub mod search;
pub mod serve;
