//! Core use-case services.
//!
//! # Responsibility
//! - Expose the host-facing timer API on top of store and scheduler.
//! - Keep UI/FFI layers decoupled from snapshot and task plumbing.

pub mod timer_service;
