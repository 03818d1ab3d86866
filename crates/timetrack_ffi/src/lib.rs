//! Host-facing bindings for the timer tracker core.

pub mod api;
