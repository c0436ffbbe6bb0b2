use actix_web::{HttpResponse, get, post, web};
use payloads::{InstitutionId, requests};

use crate::store::{MockStore, Route};

use super::{APIError, enter};

#[tracing::instrument(skip(store))]
#[get("/institutions")]
pub async fn list_institutions(
    store: web::Data<MockStore>,
) -> Result<HttpResponse, APIError> {
    enter(&store, Route::ListInstitutions)?;
    Ok(HttpResponse::Ok().json(store.list_institutions()))
}

#[tracing::instrument(skip(store), ret)]
#[get("/institutions/{id}")]
pub async fn get_institution(
    path: web::Path<String>,
    store: web::Data<MockStore>,
) -> Result<HttpResponse, APIError> {
    enter(&store, Route::GetInstitution)?;
    let institution =
        store.get_institution(&InstitutionId(path.into_inner()))?;
    Ok(HttpResponse::Ok().json(institution))
}

#[tracing::instrument(skip(store), ret)]
#[post("/institutions")]
pub async fn create_institution(
    details: web::Json<requests::InstitutionDraft>,
    store: web::Data<MockStore>,
) -> Result<HttpResponse, APIError> {
    enter(&store, Route::CreateInstitution)?;
    let institution = store.create_institution(details.into_inner())?;
    Ok(HttpResponse::Created().json(institution))
}
