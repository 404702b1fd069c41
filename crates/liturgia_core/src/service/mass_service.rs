//! Custom Mass use-case service.
//!
//! # Responsibility
//! - Turn flat shell form data into a `MassDocument`.
//! - Drive exports and saved-mass persistence for shell callers.
//!
//! # Invariants
//! - Blank form values are treated exactly like absent keys.
//! - The celebration is set only when both name and date are present.
//! - Readings are applied only when a first reading or a gospel is given.
//! - Service APIs never bypass repository persistence contracts.

use crate::mass::document::MassDocument;
use crate::model::celebration::{CelebrationKind, InvalidDateFormat, LiturgicalColor};
use crate::render::style::{OptionError, PdfOptions};
use crate::render::RenderError;
use crate::repo::mass_repo::{
    MassId, MassRepository, RepoError, SavedMass, SavedMassSummary,
};
use log::info;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

const DEFAULT_SEASON: &str = "Tempo Comum";

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failure of a shell-facing Mass operation.
#[derive(Debug)]
pub enum ServiceError {
    InvalidDate(InvalidDateFormat),
    InvalidField { key: &'static str, value: String },
    Options(OptionError),
    Render(RenderError),
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDate(err) => write!(f, "{err}"),
            Self::InvalidField { key, value } => {
                write!(f, "invalid value `{value}` for form field `{key}`")
            }
            Self::Options(err) => write!(f, "{err}"),
            Self::Render(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidDate(err) => Some(err),
            Self::InvalidField { .. } => None,
            Self::Options(err) => Some(err),
            Self::Render(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<InvalidDateFormat> for ServiceError {
    fn from(value: InvalidDateFormat) -> Self {
        Self::InvalidDate(value)
    }
}

impl From<OptionError> for ServiceError {
    fn from(value: OptionError) -> Self {
        Self::Options(value)
    }
}

impl From<RenderError> for ServiceError {
    fn from(value: RenderError) -> Self {
        Self::Render(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Flat Mass form as submitted by the shell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MassForm {
    pub celebration_name: Option<String>,
    /// `YYYY-MM-DD`.
    pub celebration_date: Option<String>,
    pub celebration_color: Option<String>,
    pub celebration_type: Option<String>,
    pub season: Option<String>,
    pub first_reading: Option<String>,
    pub psalm: Option<String>,
    pub second_reading: Option<String>,
    pub gospel: Option<String>,
    pub entrance_antiphon: Option<String>,
    pub communion_antiphon: Option<String>,
}

impl MassForm {
    /// Reads recognized keys from form pairs; other keys are ignored.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut form = Self::default();
        for (key, value) in pairs {
            let slot = match key {
                "celebration_name" => &mut form.celebration_name,
                "celebration_date" => &mut form.celebration_date,
                "celebration_color" => &mut form.celebration_color,
                "celebration_type" => &mut form.celebration_type,
                "season" => &mut form.season,
                "first_reading" => &mut form.first_reading,
                "psalm" => &mut form.psalm,
                "second_reading" => &mut form.second_reading,
                "gospel" => &mut form.gospel,
                "entrance_antiphon" => &mut form.entrance_antiphon,
                "communion_antiphon" => &mut form.communion_antiphon,
                _ => continue,
            };
            *slot = Some(value.to_string());
        }
        form
    }
}

/// Output files requested for one export run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportTargets {
    pub text: Option<PathBuf>,
    pub pdf: Option<PathBuf>,
    pub docx: Option<PathBuf>,
}

/// Use-case service wrapper for custom Mass operations.
pub struct MassService<R: MassRepository> {
    repo: R,
}

impl<R: MassRepository> MassService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Builds a document from form data.
    ///
    /// # Contract
    /// - Celebration kind defaults to solemnity, color to green and season
    ///   to `Tempo Comum`.
    /// - Antiphons are stored without a reference.
    ///
    /// # Errors
    /// - [`ServiceError::InvalidDate`] for a malformed celebration date.
    /// - [`ServiceError::InvalidField`] for unknown colors or kinds.
    pub fn build(form: &MassForm) -> ServiceResult<MassDocument> {
        let mut document = MassDocument::new();

        if let (Some(name), Some(date)) = (
            present(&form.celebration_name),
            present(&form.celebration_date),
        ) {
            let color = match present(&form.celebration_color) {
                Some(value) => LiturgicalColor::parse(value).ok_or_else(|| {
                    ServiceError::InvalidField {
                        key: "celebration_color",
                        value: value.to_string(),
                    }
                })?,
                None => LiturgicalColor::Green,
            };
            let kind = match present(&form.celebration_type) {
                Some(value) => CelebrationKind::parse(value).ok_or_else(|| {
                    ServiceError::InvalidField {
                        key: "celebration_type",
                        value: value.to_string(),
                    }
                })?,
                None => CelebrationKind::Solemnity,
            };
            let season = present(&form.season).unwrap_or(DEFAULT_SEASON);
            document.set_celebration(name, date, kind, color, season)?;
        }

        if present(&form.first_reading).is_some() || present(&form.gospel).is_some() {
            document.set_readings(
                present(&form.first_reading).unwrap_or_default(),
                present(&form.psalm).unwrap_or_default(),
                present(&form.second_reading).unwrap_or_default(),
                present(&form.gospel).unwrap_or_default(),
            );
        }

        if let Some(text) = present(&form.entrance_antiphon) {
            document.set_entrance_antiphon(text, "");
        }
        if let Some(text) = present(&form.communion_antiphon) {
            document.set_communion_antiphon(text, "");
        }

        Ok(document)
    }

    /// Writes every requested export; text first.
    ///
    /// # Errors
    /// - [`ServiceError::Options`] when the PDF options do not validate.
    /// - [`ServiceError::Render`] for the first export that fails; earlier
    ///   exports stay on disk.
    pub fn export(
        document: &MassDocument,
        targets: &ExportTargets,
        options: &PdfOptions,
    ) -> ServiceResult<()> {
        if let Some(path) = &targets.text {
            document.export_to_text(path)?;
        }
        if let Some(path) = &targets.pdf {
            let style = options.to_style()?;
            document.export_to_pdf(path, &style)?;
        }
        if let Some(path) = &targets.docx {
            document.export_to_docx(path)?;
        }
        Ok(())
    }

    /// Persists a new saved mass.
    pub fn save(&self, name: &str, document: &MassDocument) -> ServiceResult<MassId> {
        let id = self.repo.save(name, document)?;
        info!("event=mass_saved module=service status=ok");
        Ok(id)
    }

    /// Replaces the document of an existing saved mass.
    pub fn update(&self, id: MassId, document: &MassDocument) -> ServiceResult<()> {
        Ok(self.repo.update(id, document)?)
    }

    /// Loads a saved mass.
    ///
    /// # Errors
    /// - [`RepoError::NotFound`] (wrapped) when no mass has `id`.
    pub fn load(&self, id: MassId) -> ServiceResult<SavedMass> {
        self.repo
            .get(id)?
            .ok_or(ServiceError::Repo(RepoError::NotFound(id)))
    }

    pub fn list(&self) -> ServiceResult<Vec<SavedMassSummary>> {
        Ok(self.repo.list()?)
    }

    pub fn delete(&self, id: MassId) -> ServiceResult<()> {
        Ok(self.repo.delete(id)?)
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
}
