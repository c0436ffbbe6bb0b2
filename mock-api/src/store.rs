//! In-memory datasets behind the mock routes.
//!
//! Everything sits behind one mutex; handlers hold it only for the duration
//! of a single read or write. Ids for created records are fresh uuids.

use derive_more::Display;
use payloads::{
    Favorite, Institution, InstitutionId, Program, ProgramId, ProgramSummary,
    User, UserId, requests,
};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

/// One entry of the endpoint table, used to count requests and to inject
/// failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Route {
    #[display("GET /programs")]
    ListPrograms,
    #[display("GET /programs/:id")]
    GetProgram,
    #[display("POST /programs")]
    CreateProgram,
    #[display("PUT /programs/:id")]
    UpdateProgram,
    #[display("DELETE /programs/:id")]
    DeleteProgram,
    #[display("GET /institutions")]
    ListInstitutions,
    #[display("GET /institutions/:id")]
    GetInstitution,
    #[display("POST /institutions")]
    CreateInstitution,
    #[display("GET /users")]
    ListUsers,
    #[display("GET /users/:id")]
    GetUser,
    #[display("POST /users")]
    CreateUser,
    #[display("PUT /users/:id")]
    UpdateUser,
    #[display("GET /favorites/user/:userId")]
    ListFavorites,
    #[display("POST /favorites")]
    AddFavorite,
    #[display("DELETE /favorites")]
    RemoveFavorite,
}

/// A failure queued by [`MockStore::fail_next`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectedFailure {
    pub status: u16,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Program not found")]
    ProgramNotFound,
    #[error("Institution not found")]
    InstitutionNotFound,
    #[error("User not found")]
    UserNotFound,
    #[error("Favorite not found")]
    FavoriteNotFound,
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

/// Initial contents of a [`MockStore`].
#[derive(Debug, Clone, Default)]
pub struct Seed {
    pub programs: Vec<Program>,
    pub institutions: Vec<Institution>,
    pub users: Vec<User>,
    pub favorites: Vec<(UserId, ProgramId)>,
}

#[derive(Debug, Clone)]
struct FavoriteRecord {
    id: String,
    user_id: UserId,
    program_id: ProgramId,
}

#[derive(Debug, Default)]
struct Datasets {
    programs: Vec<Program>,
    institutions: Vec<Institution>,
    users: Vec<User>,
    favorites: Vec<FavoriteRecord>,
}

#[derive(Debug, Default)]
pub struct MockStore {
    data: Mutex<Datasets>,
    failures: Mutex<HashMap<Route, InjectedFailure>>,
    hits: Mutex<HashMap<Route, usize>>,
}

/// The datasets stay usable after a panicking handler.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, StoreError> {
    value.ok_or(StoreError::MissingField(field))
}

/// Test controls
impl MockStore {
    pub fn new(seed: Seed) -> Self {
        let favorites = seed
            .favorites
            .into_iter()
            .map(|(user_id, program_id)| FavoriteRecord {
                id: new_id(),
                user_id,
                program_id,
            })
            .collect();
        Self {
            data: Mutex::new(Datasets {
                programs: seed.programs,
                institutions: seed.institutions,
                users: seed.users,
                favorites,
            }),
            ..Self::default()
        }
    }

    /// Make the next request to `route` fail with `status` and
    /// `{"error": message}`.
    pub fn fail_next(&self, route: Route, status: u16, message: &str) {
        lock(&self.failures).insert(
            route,
            InjectedFailure {
                status,
                message: message.to_string(),
            },
        );
    }

    /// Record a request to `route`, returning any failure queued for it.
    pub fn enter(&self, route: Route) -> Option<InjectedFailure> {
        *lock(&self.hits).entry(route).or_default() += 1;
        lock(&self.failures).remove(&route)
    }

    /// How many requests `route` has received.
    pub fn requests(&self, route: Route) -> usize {
        lock(&self.hits).get(&route).copied().unwrap_or_default()
    }
}

/// Programs
impl MockStore {
    pub fn list_programs(&self) -> Vec<Program> {
        lock(&self.data).programs.clone()
    }

    pub fn get_program(&self, id: &ProgramId) -> Result<Program, StoreError> {
        lock(&self.data)
            .programs
            .iter()
            .find(|p| &p.id == id)
            .cloned()
            .ok_or(StoreError::ProgramNotFound)
    }

    pub fn create_program(
        &self,
        draft: requests::ProgramDraft,
    ) -> Result<Program, StoreError> {
        let program = Program {
            id: ProgramId(new_id()),
            title: required(draft.title, "title")?,
            description: draft.description.unwrap_or_default(),
            institution: draft.institution.unwrap_or_default(),
            institution_id: required(draft.institution_id, "institutionId")?,
            category: required(draft.category, "category")?,
            level: required(draft.level, "level")?,
            duration: draft.duration.unwrap_or_default(),
            format: required(draft.format, "format")?,
            start_date: required(draft.start_date, "startDate")?,
            end_date: required(draft.end_date, "endDate")?,
            application_deadline: required(
                draft.application_deadline,
                "applicationDeadline",
            )?,
            requirements: draft.requirements.unwrap_or_default(),
            benefits: draft.benefits.unwrap_or_default(),
            image_url: draft.image_url,
            is_active: draft.is_active.unwrap_or(true),
        };
        lock(&self.data).programs.push(program.clone());
        Ok(program)
    }

    /// Overwrite the fields set in `draft`.
    pub fn update_program(
        &self,
        id: &ProgramId,
        draft: requests::ProgramDraft,
    ) -> Result<Program, StoreError> {
        let mut data = lock(&self.data);
        let program = data
            .programs
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or(StoreError::ProgramNotFound)?;

        macro_rules! overwrite {
            ($($field:ident),*) => {
                $(if let Some(value) = draft.$field {
                    program.$field = value;
                })*
            };
        }
        overwrite!(
            title,
            description,
            institution,
            institution_id,
            category,
            level,
            duration,
            format,
            start_date,
            end_date,
            application_deadline,
            requirements,
            benefits,
            is_active
        );
        if draft.image_url.is_some() {
            program.image_url = draft.image_url;
        }
        Ok(program.clone())
    }

    /// Deleting a program also drops its favorites.
    pub fn delete_program(&self, id: &ProgramId) -> Result<(), StoreError> {
        let mut data = lock(&self.data);
        let before = data.programs.len();
        data.programs.retain(|p| &p.id != id);
        if data.programs.len() == before {
            return Err(StoreError::ProgramNotFound);
        }
        data.favorites.retain(|f| &f.program_id != id);
        Ok(())
    }
}

/// Institutions
impl MockStore {
    pub fn list_institutions(&self) -> Vec<Institution> {
        lock(&self.data).institutions.clone()
    }

    pub fn get_institution(
        &self,
        id: &InstitutionId,
    ) -> Result<Institution, StoreError> {
        lock(&self.data)
            .institutions
            .iter()
            .find(|i| &i.id == id)
            .cloned()
            .ok_or(StoreError::InstitutionNotFound)
    }

    pub fn create_institution(
        &self,
        draft: requests::InstitutionDraft,
    ) -> Result<Institution, StoreError> {
        let institution = Institution {
            id: InstitutionId(new_id()),
            name: required(draft.name, "name")?,
            description: draft.description.unwrap_or_default(),
            website: draft.website.unwrap_or_default(),
            logo_url: draft.logo_url,
            programs_count: draft.programs_count.unwrap_or_default(),
        };
        lock(&self.data).institutions.push(institution.clone());
        Ok(institution)
    }
}

/// Users
impl MockStore {
    pub fn list_users(&self) -> Vec<User> {
        lock(&self.data).users.clone()
    }

    pub fn get_user(&self, id: &UserId) -> Result<User, StoreError> {
        lock(&self.data)
            .users
            .iter()
            .find(|u| &u.id == id)
            .cloned()
            .ok_or(StoreError::UserNotFound)
    }

    pub fn create_user(
        &self,
        draft: requests::UserDraft,
    ) -> Result<User, StoreError> {
        let user = User {
            id: UserId(new_id()),
            name: required(draft.name, "name")?,
            email: required(draft.email, "email")?,
            interests: draft.interests.unwrap_or_default(),
            level: required(draft.level, "level")?,
        };
        lock(&self.data).users.push(user.clone());
        Ok(user)
    }

    pub fn update_user(
        &self,
        id: &UserId,
        draft: requests::UserDraft,
    ) -> Result<User, StoreError> {
        let mut data = lock(&self.data);
        let user = data
            .users
            .iter_mut()
            .find(|u| &u.id == id)
            .ok_or(StoreError::UserNotFound)?;
        if let Some(name) = draft.name {
            user.name = name;
        }
        if let Some(email) = draft.email {
            user.email = email;
        }
        if let Some(interests) = draft.interests {
            user.interests = interests;
        }
        if let Some(level) = draft.level {
            user.level = level;
        }
        Ok(user.clone())
    }
}

/// Favorites
impl MockStore {
    /// A user's favorites with embedded summaries. Favorites whose program
    /// no longer exists are skipped.
    pub fn list_favorites(&self, user_id: &UserId) -> Vec<Favorite> {
        let data = lock(&self.data);
        data.favorites
            .iter()
            .filter(|f| &f.user_id == user_id)
            .filter_map(|f| {
                let program =
                    data.programs.iter().find(|p| p.id == f.program_id)?;
                Some(Favorite {
                    id: f.id.clone(),
                    user_id: f.user_id.clone(),
                    program_id: f.program_id.clone(),
                    program: ProgramSummary::from(program),
                })
            })
            .collect()
    }

    /// Adding an existing favorite succeeds without creating a duplicate.
    pub fn add_favorite(
        &self,
        user_id: &UserId,
        program_id: &ProgramId,
    ) -> Result<(), StoreError> {
        let mut data = lock(&self.data);
        if !data.users.iter().any(|u| &u.id == user_id) {
            return Err(StoreError::UserNotFound);
        }
        if !data.programs.iter().any(|p| &p.id == program_id) {
            return Err(StoreError::ProgramNotFound);
        }
        let exists = data
            .favorites
            .iter()
            .any(|f| &f.user_id == user_id && &f.program_id == program_id);
        if !exists {
            data.favorites.push(FavoriteRecord {
                id: new_id(),
                user_id: user_id.clone(),
                program_id: program_id.clone(),
            });
        }
        Ok(())
    }

    pub fn remove_favorite(
        &self,
        user_id: &UserId,
        program_id: &ProgramId,
    ) -> Result<(), StoreError> {
        let mut data = lock(&self.data);
        let before = data.favorites.len();
        data.favorites.retain(|f| {
            !(&f.user_id == user_id && &f.program_id == program_id)
        });
        if data.favorites.len() == before {
            return Err(StoreError::FavoriteNotFound);
        }
        Ok(())
    }
}
