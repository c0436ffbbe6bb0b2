use actix_web::{HttpResponse, delete, get, post, web};
use payloads::{UserId, requests::FavoriteRequest, responses::SuccessMessage};

use crate::store::{MockStore, Route};

use super::{APIError, enter};

#[tracing::instrument(skip(store))]
#[get("/favorites/user/{user_id}")]
pub async fn list_favorites(
    path: web::Path<String>,
    store: web::Data<MockStore>,
) -> Result<HttpResponse, APIError> {
    enter(&store, Route::ListFavorites)?;
    let favorites = store.list_favorites(&UserId(path.into_inner()));
    Ok(HttpResponse::Ok().json(favorites))
}

#[tracing::instrument(skip(store), ret)]
#[post("/favorites")]
pub async fn add_favorite(
    details: web::Json<FavoriteRequest>,
    store: web::Data<MockStore>,
) -> Result<HttpResponse, APIError> {
    enter(&store, Route::AddFavorite)?;
    store.add_favorite(&details.user_id, &details.program_id)?;
    Ok(HttpResponse::Created().json(SuccessMessage::new("Favorite added")))
}

/// The favorite is identified by the body, not the path.
#[tracing::instrument(skip(store), ret)]
#[delete("/favorites")]
pub async fn remove_favorite(
    details: web::Json<FavoriteRequest>,
    store: web::Data<MockStore>,
) -> Result<HttpResponse, APIError> {
    enter(&store, Route::RemoveFavorite)?;
    store.remove_favorite(&details.user_id, &details.program_id)?;
    Ok(HttpResponse::Ok().json(SuccessMessage::new("Favorite removed")))
}
