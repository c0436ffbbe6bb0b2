//! Catalog filtering. All matching happens client-side over the fetched
//! collection; the API is never asked to filter.

use payloads::{Format, InstitutionId, Level, Program};
use serde::{Deserialize, Serialize};

/// Active filter criteria. `None` means unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    pub category: Option<String>,
    pub level: Option<Level>,
    pub format: Option<Format>,
    /// Matched against `Program::institution_id`.
    pub institution: Option<InstitutionId>,
    /// Free-text search; ephemeral, never persisted.
    #[serde(skip)]
    pub search: String,
}

impl FilterCriteria {
    pub fn is_unconstrained(&self) -> bool {
        self.category.is_none()
            && self.level.is_none()
            && self.format.is_none()
            && self.institution.is_none()
            && self.search.trim().is_empty()
    }

    /// Shallow merge: only the fields present in `update` change.
    pub fn merge(&mut self, update: FilterUpdate) {
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(level) = update.level {
            self.level = level;
        }
        if let Some(format) = update.format {
            self.format = format;
        }
        if let Some(institution) = update.institution {
            self.institution = institution;
        }
    }

    pub fn matches(&self, program: &Program) -> bool {
        self.matches_search(program)
            && self.category.as_ref().is_none_or(|c| &program.category == c)
            && self.level.is_none_or(|l| program.level == l)
            && self.format.is_none_or(|f| program.format == f)
            && self
                .institution
                .as_ref()
                .is_none_or(|i| &program.institution_id == i)
    }

    fn matches_search(&self, program: &Program) -> bool {
        let term = self.search.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        [&program.title, &program.description, &program.institution]
            .iter()
            .any(|field| field.to_lowercase().contains(&term))
    }
}

/// A partial update to [`FilterCriteria`].
///
/// The outer `Option` says whether the field is touched, the inner one is the
/// new value (`None` clears the constraint).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterUpdate {
    pub category: Option<Option<String>>,
    pub level: Option<Option<Level>>,
    pub format: Option<Option<Format>>,
    pub institution: Option<Option<InstitutionId>>,
}

impl FilterUpdate {
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(Some(category.into()));
        self
    }

    pub fn clear_category(mut self) -> Self {
        self.category = Some(None);
        self
    }

    pub fn level(mut self, level: Level) -> Self {
        self.level = Some(Some(level));
        self
    }

    pub fn clear_level(mut self) -> Self {
        self.level = Some(None);
        self
    }

    pub fn format(mut self, format: Format) -> Self {
        self.format = Some(Some(format));
        self
    }

    pub fn clear_format(mut self) -> Self {
        self.format = Some(None);
        self
    }

    pub fn institution(mut self, institution: InstitutionId) -> Self {
        self.institution = Some(Some(institution));
        self
    }

    pub fn clear_institution(mut self) -> Self {
        self.institution = Some(None);
        self
    }
}
