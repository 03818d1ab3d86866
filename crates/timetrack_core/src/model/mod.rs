//! Timer domain model.
//!
//! # Responsibility
//! - Define the canonical timer record shared by store, scheduler and hosts.
//! - Provide the factory that assigns fresh identities.
//!
//! # Invariants
//! - Every timer is identified by a stable `TimerId`.
//! - `elapsed` is an unsigned millisecond count and never goes negative.

pub mod timer;
