//! Shared module - Common types and utilities
//!
//! Types that every feature depends on. No feature depends on another
//! feature through this module.

#[macro_use]
pub mod macros;
pub mod models;

pub use models::*;
