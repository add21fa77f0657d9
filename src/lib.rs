//! Takeoutfix - Extension reconciliation for photo and video exports
//!
//! This library crate exposes the core functionality for integration testing.

pub mod config;
pub mod preflight;
pub mod reconcile;
pub mod rename;
