//! Renderers turning a `MassDocument` into text, PDF and DOCX.
//!
//! # Responsibility
//! - Share one error taxonomy across output formats.
//! - Share one line-break policy between the paginated formats.
//!
//! # Invariants
//! - Renderers only read `MassDocument::ordered_non_empty_parts()` and the
//!   celebration; they never mutate the document.
//! - PDF and DOCX split content into paragraphs on blank lines and keep single
//!   newlines as line breaks inside a paragraph.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod docx;
pub mod pdf;
pub mod style;
pub mod text;

/// Closing line printed by the paginated formats.
pub const FOOTER_TEXT: &str = "Folheto de Missa - Liturgia Católica";

pub type RenderResult<T> = Result<T, RenderError>;

/// Failure while rendering or writing an export.
#[derive(Debug)]
pub enum RenderError {
    /// The binary was built without the renderer for this format.
    RenderingUnavailable {
        format: &'static str,
        hint: &'static str,
    },
    Io(std::io::Error),
    Pdf(String),
    Docx(String),
}

impl Display for RenderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RenderingUnavailable { format, hint } => {
                write!(f, "{format} rendering is not available in this build; {hint}")
            }
            Self::Io(err) => write!(f, "{err}"),
            Self::Pdf(message) => write!(f, "pdf rendering failed: {message}"),
            Self::Docx(message) => write!(f, "docx rendering failed: {message}"),
        }
    }
}

impl Error for RenderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RenderError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Splits part content into paragraphs, each a list of lines.
///
/// Blank (whitespace-only) lines separate paragraphs; runs of them collapse.
pub fn split_paragraphs(content: &str) -> Vec<Vec<&str>> {
    let mut paragraphs = Vec::new();
    let mut current = Vec::new();
    for line in content.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line.trim_end());
        }
    }
    if !current.is_empty() {
        paragraphs.push(current);
    }
    paragraphs
}

#[cfg(test)]
mod tests {
    use super::split_paragraphs;

    #[test]
    fn split_paragraphs_uses_blank_lines_as_separators() {
        let content = "Sacerdote: O Senhor esteja convosco.\nPovo: Ele está no meio de nós.\n\n\nOremos.\n";
        assert_eq!(
            split_paragraphs(content),
            vec![
                vec![
                    "Sacerdote: O Senhor esteja convosco.",
                    "Povo: Ele está no meio de nós."
                ],
                vec!["Oremos."],
            ]
        );
    }

    #[test]
    fn split_paragraphs_of_blank_content_is_empty() {
        assert!(split_paragraphs(" \n\n").is_empty());
    }
}
