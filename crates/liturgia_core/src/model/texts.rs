//! Liturgical text value types.
//!
//! Each type owns its canonical printed form through `Display`; renderers and
//! the hour formatter never re-derive these layouts.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Scripture reading, optionally with its full text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reading {
    /// Biblical reference, e.g. `Is 60,1-6`.
    pub reference: String,
    pub text: String,
}

impl Reading {
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            text: String::new(),
        }
    }
}

impl Display for Reading {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.text.is_empty() {
            f.write_str(&self.reference)
        } else {
            write!(f, "{}\n\n{}", self.reference, self.text)
        }
    }
}

/// Responsorial psalm.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Psalm {
    pub number: u32,
    pub reference: String,
    pub response: String,
    pub verses: Vec<String>,
}

impl Psalm {
    pub fn new(number: u32, reference: impl Into<String>) -> Self {
        Self {
            number,
            reference: reference.into(),
            response: String::new(),
            verses: Vec::new(),
        }
    }

    pub fn with_response(mut self, response: impl Into<String>) -> Self {
        self.response = response.into();
        self
    }

    pub fn with_verse(mut self, verse: impl Into<String>) -> Self {
        self.verses.push(verse.into());
        self
    }
}

impl Display for Psalm {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Salmo {} ({})", self.number, self.reference)?;
        if !self.response.is_empty() {
            write!(f, "\nR. {}", self.response)?;
        }
        for verse in &self.verses {
            write!(f, "\n{verse}")?;
        }
        Ok(())
    }
}

/// Prayer with an optional assembly response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prayer {
    pub title: String,
    pub text: String,
    pub response: String,
}

impl Prayer {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            response: String::new(),
        }
    }

    pub fn with_response(mut self, response: impl Into<String>) -> Self {
        self.response = response.into();
        self
    }
}

impl Display for Prayer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n\n{}", self.title, self.text)?;
        if !self.response.is_empty() {
            write!(f, "\nR. {}", self.response)?;
        }
        Ok(())
    }
}

/// Short refrain proper to a moment of the Mass (`Entrada`, `Comunhão`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Antiphon {
    pub kind: String,
    pub text: String,
    pub reference: String,
}

impl Antiphon {
    pub fn new(
        kind: impl Into<String>,
        text: impl Into<String>,
        reference: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            text: text.into(),
            reference: reference.into(),
        }
    }
}

impl Display for Antiphon {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Antífona de {}\n{}", self.kind, self.text)?;
        if !self.reference.is_empty() {
            write!(f, "\n({})", self.reference)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Antiphon, Prayer, Psalm, Reading};

    #[test]
    fn reading_without_text_prints_reference_only() {
        assert_eq!(Reading::new("Mt 2,1-12").to_string(), "Mt 2,1-12");
        let full = Reading {
            reference: "Mt 2,1-12".to_string(),
            text: "Tendo nascido Jesus...".to_string(),
        };
        assert_eq!(full.to_string(), "Mt 2,1-12\n\nTendo nascido Jesus...");
    }

    #[test]
    fn psalm_lists_response_then_verses() {
        let psalm = Psalm::new(63, "Sl 63,2-9")
            .with_response("Minha alma tem sede de Vós.")
            .with_verse("Ó Deus, vós sois o meu Deus...");
        assert_eq!(
            psalm.to_string(),
            "Salmo 63 (Sl 63,2-9)\nR. Minha alma tem sede de Vós.\nÓ Deus, vós sois o meu Deus..."
        );
    }

    #[test]
    fn prayer_response_line_is_optional() {
        assert_eq!(
            Prayer::new("Oração Final", "Pai santo...").to_string(),
            "Oração Final\n\nPai santo..."
        );
        assert!(Prayer::new("Preces", "Oremos...")
            .with_response("Senhor, escutai")
            .to_string()
            .ends_with("\nR. Senhor, escutai"));
    }

    #[test]
    fn antiphon_reference_is_parenthesized() {
        let antiphon = Antiphon::new("Entrada", "Eis que vem o Senhor.", "Cf. Ml 3,1");
        assert_eq!(
            antiphon.to_string(),
            "Antífona de Entrada\nEis que vem o Senhor.\n(Cf. Ml 3,1)"
        );
    }
}
