//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate note store calls into screen-level use cases.
//! - Keep front ends decoupled from storage details.

pub mod note_service;
