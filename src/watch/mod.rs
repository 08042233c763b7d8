// src/watch/mod.rs

//! File watching and change detection.
//!
//! This module is responsible for:
//! - Compiling watch glob patterns per task (`patterns.rs`).
//! - Wiring up a cross-platform filesystem watcher (`notify`) and batching
//!   its events (`watcher.rs`).
//! - Content hashing so saves that change nothing trigger nothing.
//!
//! It does **not** run tasks; it only turns filesystem changes into
//! task-level triggers for the engine.

pub mod cache;
pub mod event_handler;
pub mod patterns;
pub mod watcher;

pub use patterns::{WatchRegistration, build_registrations};
pub use watcher::{WatcherHandle, spawn_watcher};
