//! Custom Mass builder: part catalog and the editable document.

pub mod document;
pub mod registry;
