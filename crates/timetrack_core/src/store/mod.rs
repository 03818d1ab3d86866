//! Timer collection snapshots and the owned store container.
//!
//! # Responsibility
//! - Define copy-on-write collection operations over immutable snapshots.
//! - Own the current snapshot and publish every successor to subscribers.
//!
//! # Invariants
//! - All `id` values in a snapshot are distinct.
//! - Operations never mutate a snapshot another caller may hold.
//! - Unknown IDs are silent no-ops, never errors.

pub mod snapshot;
pub mod timer_store;
