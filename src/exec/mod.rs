// src/exec/mod.rs

//! Task execution layer for watch mode.
//!
//! Runs the transform tasks off the async threads and reports back to the
//! orchestration runtime via `RuntimeEvent`s.
//!
//! - [`executor_loop`] owns the loop that receives dispatched tasks.
//! - [`task_runner`] runs one task on the blocking pool.
//! - [`backend`] provides the `ExecutorBackend` trait and a concrete
//!   `RealExecutorBackend` that the runtime uses in production, and which
//!   tests can replace with a fake implementation.

pub mod backend;
pub mod executor_loop;
pub mod task_runner;

pub use backend::{ExecutorBackend, RealExecutorBackend};
pub use executor_loop::spawn_executor;
pub use task_runner::execute;
