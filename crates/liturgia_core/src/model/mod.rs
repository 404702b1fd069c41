//! Liturgical domain model.
//!
//! # Responsibility
//! - Define canonical data structures used by mass assembly, hours and the
//!   daily calendar.
//! - Own the printed form of small liturgical texts (readings, psalms, ...).
//!
//! # Invariants
//! - Celebrations carry parsed calendar dates, never raw strings.
//! - Part keys are stable identifiers; titles are display-only.

pub mod celebration;
pub mod part;
pub mod texts;
