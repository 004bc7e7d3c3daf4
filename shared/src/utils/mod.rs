//! Utility functions shared across server crates

pub mod duration;
pub mod validation;
