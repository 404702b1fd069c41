//! Mass part (segment) model.
//!
//! # Invariants
//! - `key` is unique within one document and never changes.
//! - `order` is fixed at creation; render position is `(order, sequence)`.
//! - Empty `content` means "unset" and the part is omitted at render time.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One named, orderable block of Mass text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    pub key: String,
    pub title: String,
    pub content: String,
    pub order: u32,
    /// Insertion sequence inside the owning document; tie-breaker for `order`.
    pub(crate) sequence: u32,
}

impl Part {
    pub(crate) fn new(
        key: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
        order: u32,
        sequence: u32,
    ) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            content: content.into(),
            order,
            sequence,
        }
    }

    /// Whether the part carries text and will be rendered.
    pub fn has_content(&self) -> bool {
        !self.content.is_empty()
    }

    /// Insertion sequence used to break ties between equal `order` values.
    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    /// Canonical render ordering.
    pub fn render_cmp(&self, other: &Self) -> Ordering {
        (self.order, self.sequence).cmp(&(other.order, other.sequence))
    }
}
