use actix_web::{HttpResponse, delete, get, post, put, web};
use payloads::{ProgramId, requests, responses::SuccessMessage};

use crate::store::{MockStore, Route};

use super::{APIError, enter};

#[tracing::instrument(skip(store))]
#[get("/programs")]
pub async fn list_programs(
    store: web::Data<MockStore>,
) -> Result<HttpResponse, APIError> {
    enter(&store, Route::ListPrograms)?;
    Ok(HttpResponse::Ok().json(store.list_programs()))
}

#[tracing::instrument(skip(store), ret)]
#[get("/programs/{id}")]
pub async fn get_program(
    path: web::Path<String>,
    store: web::Data<MockStore>,
) -> Result<HttpResponse, APIError> {
    enter(&store, Route::GetProgram)?;
    let program = store.get_program(&ProgramId(path.into_inner()))?;
    Ok(HttpResponse::Ok().json(program))
}

#[tracing::instrument(skip(store), ret)]
#[post("/programs")]
pub async fn create_program(
    details: web::Json<requests::ProgramDraft>,
    store: web::Data<MockStore>,
) -> Result<HttpResponse, APIError> {
    enter(&store, Route::CreateProgram)?;
    let program = store.create_program(details.into_inner())?;
    Ok(HttpResponse::Created().json(program))
}

#[tracing::instrument(skip(store), ret)]
#[put("/programs/{id}")]
pub async fn update_program(
    path: web::Path<String>,
    details: web::Json<requests::ProgramDraft>,
    store: web::Data<MockStore>,
) -> Result<HttpResponse, APIError> {
    enter(&store, Route::UpdateProgram)?;
    let program = store
        .update_program(&ProgramId(path.into_inner()), details.into_inner())?;
    Ok(HttpResponse::Ok().json(program))
}

#[tracing::instrument(skip(store), ret)]
#[delete("/programs/{id}")]
pub async fn delete_program(
    path: web::Path<String>,
    store: web::Data<MockStore>,
) -> Result<HttpResponse, APIError> {
    enter(&store, Route::DeleteProgram)?;
    store.delete_program(&ProgramId(path.into_inner()))?;
    Ok(HttpResponse::Ok().json(SuccessMessage::new("Program deleted")))
}
