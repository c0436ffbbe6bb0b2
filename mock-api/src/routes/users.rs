use actix_web::{HttpResponse, get, post, put, web};
use payloads::{UserId, requests};

use crate::store::{MockStore, Route};

use super::{APIError, enter};

#[tracing::instrument(skip(store))]
#[get("/users")]
pub async fn list_users(
    store: web::Data<MockStore>,
) -> Result<HttpResponse, APIError> {
    enter(&store, Route::ListUsers)?;
    Ok(HttpResponse::Ok().json(store.list_users()))
}

#[tracing::instrument(skip(store), ret)]
#[get("/users/{id}")]
pub async fn get_user(
    path: web::Path<String>,
    store: web::Data<MockStore>,
) -> Result<HttpResponse, APIError> {
    enter(&store, Route::GetUser)?;
    let user = store.get_user(&UserId(path.into_inner()))?;
    Ok(HttpResponse::Ok().json(user))
}

#[tracing::instrument(skip(store), ret)]
#[post("/users")]
pub async fn create_user(
    details: web::Json<requests::UserDraft>,
    store: web::Data<MockStore>,
) -> Result<HttpResponse, APIError> {
    enter(&store, Route::CreateUser)?;
    let user = store.create_user(details.into_inner())?;
    Ok(HttpResponse::Created().json(user))
}

#[tracing::instrument(skip(store), ret)]
#[put("/users/{id}")]
pub async fn update_user(
    path: web::Path<String>,
    details: web::Json<requests::UserDraft>,
    store: web::Data<MockStore>,
) -> Result<HttpResponse, APIError> {
    enter(&store, Route::UpdateUser)?;
    let user =
        store.update_user(&UserId(path.into_inner()), details.into_inner())?;
    Ok(HttpResponse::Ok().json(user))
}
