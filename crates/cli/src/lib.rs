//! FraudGuard CLI - command orchestration
//!
//! This crate provides the `fraudguard` binary; the commands live here so
//! they can be driven from tests without spawning a process.

pub mod commands;
pub mod context;

pub use context::AppContext;
