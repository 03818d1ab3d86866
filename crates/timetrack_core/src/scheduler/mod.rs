//! Periodic elapsed-time accumulation.
//!
//! # Responsibility
//! - Drive `TimerStore::tick` on a fixed wall-clock cadence.
//! - Tie the recurring task to a scoped owner so it cannot outlive it.
//!
//! # Invariants
//! - At most one recurring task per scheduler.
//! - Dropping a scheduler cancels its task.

pub mod tick;
