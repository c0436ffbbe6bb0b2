use payloads::{Institution, Program, ProgramId};

use crate::ClientContext;
use crate::hooks::{use_institutions, use_programs};
use crate::state::{Action, FetchStatus};

/// Outcome of looking something up in a fetched collection.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Found(T),
    /// The collection is loaded but has no such entry.
    NotFound,
    /// Another caller's fetch of the collection is still in flight.
    Loading,
    /// The collection could not be loaded.
    Failed(String),
}

/// A program with its institution, if that one is known.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramDetail {
    pub program: Program,
    pub institution: Option<Institution>,
}

/// Resolve a program from the cached catalog and make it the selected one.
///
/// Programs and institutions are loaded (at most once each) first. Only a
/// populated catalog can report [`Lookup::NotFound`].
pub async fn select_program(
    cx: &ClientContext,
    program_id: &ProgramId,
) -> Lookup<ProgramDetail> {
    let (programs, _) =
        futures::join!(use_programs(cx), use_institutions(cx));
    match programs.status {
        FetchStatus::Populated => {}
        FetchStatus::Failed(error) => return Lookup::Failed(error),
        FetchStatus::Empty | FetchStatus::Loading => return Lookup::Loading,
    }

    let state = cx.store.state();
    let Some(program) = state.program_by_id(program_id).cloned() else {
        cx.store.apply(Action::SetSelectedProgram(None));
        return Lookup::NotFound;
    };
    let institution = state.institution_for(&program).cloned();
    cx.store
        .apply(Action::SetSelectedProgram(Some(program.clone())));
    Lookup::Found(ProgramDetail {
        program,
        institution,
    })
}
