pub mod favorites;
pub mod institutions;
pub mod programs;
pub mod users;

use actix_web::http::StatusCode;
use actix_web::{
    HttpResponse, Responder, ResponseError, body::BoxBody,
    dev::HttpServiceFactory, get, web,
};
use payloads::responses::ErrorBody;

use crate::store::{InjectedFailure, MockStore, Route, StoreError};

pub fn api_services() -> impl HttpServiceFactory {
    web::scope("/api")
        .service(health_check)
        .service(programs::list_programs)
        .service(programs::get_program)
        .service(programs::create_program)
        .service(programs::update_program)
        .service(programs::delete_program)
        .service(institutions::list_institutions)
        .service(institutions::get_institution)
        .service(institutions::create_institution)
        .service(users::list_users)
        .service(users::get_user)
        .service(users::create_user)
        .service(users::update_user)
        .service(favorites::list_favorites)
        .service(favorites::add_favorite)
        .service(favorites::remove_favorite)
}

#[get("/health_check")]
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("healthy")
}

/// Every error is rendered as `{"error": "<message>"}`.
#[derive(Debug, thiserror::Error)]
pub enum APIError {
    #[error("{0}")]
    BadRequest(#[source] anyhow::Error),
    #[error("{0}")]
    NotFound(#[source] anyhow::Error),
    #[error("{message}")]
    Injected { status: StatusCode, message: String },
    #[error("Something went wrong")]
    UnexpectedError(#[from] anyhow::Error),
}

impl ResponseError for APIError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Injected { status, .. } => *status,
            Self::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        HttpResponse::build(self.status_code())
            .json(ErrorBody::new(self.to_string()))
    }
}

impl From<StoreError> for APIError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::ProgramNotFound
            | StoreError::InstitutionNotFound
            | StoreError::UserNotFound
            | StoreError::FavoriteNotFound => APIError::NotFound(e.into()),
            StoreError::MissingField(_) => APIError::BadRequest(e.into()),
        }
    }
}

impl From<InjectedFailure> for APIError {
    fn from(failure: InjectedFailure) -> Self {
        let status = StatusCode::from_u16(failure.status)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        APIError::Injected {
            status,
            message: failure.message,
        }
    }
}

/// Count the request and fail it if a failure was queued for the route.
fn enter(store: &MockStore, route: Route) -> Result<(), APIError> {
    match store.enter(route) {
        Some(failure) => {
            tracing::debug!(%route, "Injecting failure");
            Err(failure.into())
        }
        None => Ok(()),
    }
}
