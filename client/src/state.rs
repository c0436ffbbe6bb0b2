use payloads::{Institution, InstitutionId, Program, ProgramId, User};
use std::collections::BTreeSet;
use yewdux::prelude::*;

use crate::filters::{FilterCriteria, FilterUpdate};
use crate::persist::{PersistedState, dedup_in_order};

/// Lifecycle of a lazily fetched collection.
///
/// `Empty → Loading → Populated | Failed`. Both settled states stay put
/// until an explicit refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FetchStatus {
    #[default]
    Empty,
    Loading,
    Populated,
    Failed(String),
}

impl FetchStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_populated(&self) -> bool {
        matches!(self, Self::Populated)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[derive(Default, Clone, PartialEq, Store)]
pub struct State {
    // === Catalog (managed by use_programs / use_institutions) ===
    pub programs: Vec<Program>,
    pub programs_status: FetchStatus,
    pub institutions: Vec<Institution>,
    pub institutions_status: FetchStatus,
    pub selected_program: Option<Program>,

    // === Persisted subset ===
    pub user: Option<User>,
    pub favorites: Vec<ProgramId>, // unique, insertion order
    pub filters: FilterCriteria,

    // === Session UI state ===
    pub loading: bool,
    pub error: Option<String>,
}

/// Every way the store can change.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetPrograms(Vec<Program>),
    SetProgramsStatus(FetchStatus),
    SetInstitutions(Vec<Institution>),
    SetInstitutionsStatus(FetchStatus),
    SetSelectedProgram(Option<Program>),
    SetUser(Option<User>),
    /// Inserts only if absent.
    AddFavorite(ProgramId),
    /// Removes every occurrence; removing an absent id is a no-op.
    RemoveFavorite(ProgramId),
    ReplaceFavorites(Vec<ProgramId>),
    /// Ignored when there is no user.
    UpdateUserInterests(Vec<String>),
    SetFilters(FilterUpdate),
    SetSearch(String),
    ClearFilters,
    SetLoading(bool),
    SetError(Option<String>),
}

impl Action {
    /// Whether applying this action changes the persisted subset.
    pub fn touches_persisted(&self) -> bool {
        matches!(
            self,
            Self::SetUser(_)
                | Self::AddFavorite(_)
                | Self::RemoveFavorite(_)
                | Self::ReplaceFavorites(_)
                | Self::UpdateUserInterests(_)
                | Self::SetFilters(_)
                | Self::ClearFilters
        )
    }
}

impl State {
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::SetPrograms(programs) => self.programs = programs,
            Action::SetProgramsStatus(status) => self.programs_status = status,
            Action::SetInstitutions(institutions) => {
                self.institutions = institutions
            }
            Action::SetInstitutionsStatus(status) => {
                self.institutions_status = status
            }
            Action::SetSelectedProgram(program) => {
                self.selected_program = program
            }
            Action::SetUser(user) => self.user = user,
            Action::AddFavorite(program_id) => {
                if !self.favorites.contains(&program_id) {
                    self.favorites.push(program_id);
                }
            }
            Action::RemoveFavorite(program_id) => {
                self.favorites.retain(|id| id != &program_id)
            }
            Action::ReplaceFavorites(mut favorites) => {
                dedup_in_order(&mut favorites);
                self.favorites = favorites;
            }
            Action::UpdateUserInterests(interests) => {
                if let Some(user) = self.user.as_mut() {
                    user.interests = interests;
                }
            }
            Action::SetFilters(update) => self.filters.merge(update),
            Action::SetSearch(search) => self.filters.search = search,
            Action::ClearFilters => self.filters = FilterCriteria::default(),
            Action::SetLoading(loading) => self.loading = loading,
            Action::SetError(error) => self.error = error,
        }
    }

    pub fn persisted(&self) -> PersistedState {
        PersistedState {
            favorites: self.favorites.clone(),
            user: self.user.clone(),
            filters: self.filters.clone(),
        }
    }

    pub fn restore(&mut self, persisted: PersistedState) {
        let mut favorites = persisted.favorites;
        dedup_in_order(&mut favorites);
        self.favorites = favorites;
        self.user = persisted.user;
        self.filters = FilterCriteria {
            search: std::mem::take(&mut self.filters.search),
            ..persisted.filters
        };
    }

    /// True while any fetch or save is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
            || self.programs_status.is_loading()
            || self.institutions_status.is_loading()
    }

    pub fn program_by_id(&self, program_id: &ProgramId) -> Option<&Program> {
        self.programs.iter().find(|p| &p.id == program_id)
    }

    pub fn institution_by_id(
        &self,
        institution_id: &InstitutionId,
    ) -> Option<&Institution> {
        self.institutions.iter().find(|i| &i.id == institution_id)
    }

    pub fn institution_for(&self, program: &Program) -> Option<&Institution> {
        self.institution_by_id(&program.institution_id)
    }

    pub fn is_favorite(&self, program_id: &ProgramId) -> bool {
        self.favorites.contains(program_id)
    }

    /// Favorited programs present in the fetched collection, in catalog
    /// order.
    pub fn favorite_programs(&self) -> Vec<&Program> {
        self.programs
            .iter()
            .filter(|p| self.is_favorite(&p.id))
            .collect()
    }

    pub fn filtered_programs(&self) -> Vec<&Program> {
        self.programs
            .iter()
            .filter(|p| self.filters.matches(p))
            .collect()
    }

    /// The first `count` programs, as shown on the landing page.
    pub fn featured_programs(&self, count: usize) -> &[Program] {
        &self.programs[..count.min(self.programs.len())]
    }

    pub fn programs_for_institution(
        &self,
        institution_id: &InstitutionId,
    ) -> Vec<&Program> {
        self.programs
            .iter()
            .filter(|p| &p.institution_id == institution_id)
            .collect()
    }

    /// Case-insensitive match on institution name or description.
    pub fn search_institutions(&self, term: &str) -> Vec<&Institution> {
        let term = term.trim().to_lowercase();
        self.institutions
            .iter()
            .filter(|i| {
                term.is_empty()
                    || i.name.to_lowercase().contains(&term)
                    || i.description.to_lowercase().contains(&term)
            })
            .collect()
    }

    /// Distinct program categories, sorted.
    pub fn categories(&self) -> Vec<&str> {
        self.programs
            .iter()
            .map(|p| p.category.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
