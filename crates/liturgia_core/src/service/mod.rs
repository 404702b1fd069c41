//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate document building, exports and repository calls into
//!   shell-level APIs.
//! - Keep CLI/web shells decoupled from storage and rendering details.

pub mod mass_service;
