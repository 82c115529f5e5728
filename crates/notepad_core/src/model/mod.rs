//! Domain model for persisted notes.
//!
//! # Responsibility
//! - Define the canonical note record shared by store, service and callers.
//! - Own identifier and creation-time assignment.
//!
//! # Invariants
//! - `id` and `created_at` are assigned once at creation and never change.
//! - Deletion is a hard delete; there are no tombstones.

pub mod note;
