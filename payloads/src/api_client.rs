use crate::{
    Favorite, Institution, InstitutionId, Program, ProgramId, User, UserId,
    requests, responses,
};
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// An API client for interfacing with the catalog backend.
///
/// No caching and no retries: every call is one request.
#[derive(Debug, Clone)]
pub struct APIClient {
    /// Absolute base url, including any path prefix such as `/api`.
    pub address: String,
    pub inner_client: reqwest::Client,
}

/// Options for a single request.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<serde_json::Value>,
    /// Merged over the defaults, so a `Content-Type` here replaces the json
    /// one.
    pub headers: HeaderMap,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::new(Method::GET)
    }
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            body: None,
            headers: HeaderMap::new(),
        }
    }

    pub fn with_json(
        method: Method,
        body: &impl Serialize,
    ) -> Result<Self, ClientError> {
        Ok(Self {
            body: Some(serde_json::to_value(body)?),
            ..Self::new(method)
        })
    }
}

/// Generic request plumbing
impl APIClient {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            inner_client: reqwest::Client::new(),
        }
    }

    fn format_url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.address.trim_end_matches('/'))
    }

    /// Issue a request against `endpoint` and decode the json response.
    ///
    /// Failures are logged together with the endpoint before being
    /// returned.
    pub async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<T, ClientError> {
        let result = self.send(endpoint, options).await;
        if let Err(e) = &result {
            tracing::error!(endpoint, "API error: {e}");
        }
        result
    }

    async fn send<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<T, ClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.extend(options.headers);

        let mut request = self
            .inner_client
            .request(options.method, self.format_url(endpoint))
            .headers(headers);
        if let Some(body) = options.body {
            request = request.body(body.to_string());
        }

        let response = request.send().await?;
        ok_body(response).await
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
    ) -> Result<T, ClientError> {
        self.request(endpoint, RequestOptions::new(Method::GET))
            .await
    }

    async fn with_body<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: &impl Serialize,
    ) -> Result<T, ClientError> {
        let options = RequestOptions::with_json(method, body)?;
        self.request(endpoint, options).await
    }
}

/// Programs
impl APIClient {
    pub async fn list_programs(&self) -> Result<Vec<Program>, ClientError> {
        self.get("/programs").await
    }

    pub async fn get_program(
        &self,
        program_id: &ProgramId,
    ) -> Result<Program, ClientError> {
        self.get(&format!("/programs/{program_id}")).await
    }

    pub async fn create_program(
        &self,
        details: &requests::ProgramDraft,
    ) -> Result<Program, ClientError> {
        self.with_body(Method::POST, "/programs", details).await
    }

    pub async fn update_program(
        &self,
        program_id: &ProgramId,
        details: &requests::ProgramDraft,
    ) -> Result<Program, ClientError> {
        self.with_body(Method::PUT, &format!("/programs/{program_id}"), details)
            .await
    }

    pub async fn delete_program(
        &self,
        program_id: &ProgramId,
    ) -> Result<responses::SuccessMessage, ClientError> {
        self.request(
            &format!("/programs/{program_id}"),
            RequestOptions::new(Method::DELETE),
        )
        .await
    }
}

/// Institutions
impl APIClient {
    pub async fn list_institutions(
        &self,
    ) -> Result<Vec<Institution>, ClientError> {
        self.get("/institutions").await
    }

    pub async fn get_institution(
        &self,
        institution_id: &InstitutionId,
    ) -> Result<Institution, ClientError> {
        self.get(&format!("/institutions/{institution_id}")).await
    }

    pub async fn create_institution(
        &self,
        details: &requests::InstitutionDraft,
    ) -> Result<Institution, ClientError> {
        self.with_body(Method::POST, "/institutions", details).await
    }
}

/// Users
impl APIClient {
    pub async fn list_users(&self) -> Result<Vec<User>, ClientError> {
        self.get("/users").await
    }

    pub async fn get_user(
        &self,
        user_id: &UserId,
    ) -> Result<User, ClientError> {
        self.get(&format!("/users/{user_id}")).await
    }

    pub async fn create_user(
        &self,
        details: &requests::UserDraft,
    ) -> Result<User, ClientError> {
        self.with_body(Method::POST, "/users", details).await
    }

    pub async fn update_user(
        &self,
        user_id: &UserId,
        details: &requests::UserDraft,
    ) -> Result<User, ClientError> {
        self.with_body(Method::PUT, &format!("/users/{user_id}"), details)
            .await
    }
}

/// Favorites
impl APIClient {
    /// List a user's favorites with an embedded program summary.
    pub async fn list_favorites(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Favorite>, ClientError> {
        self.get(&format!("/favorites/user/{user_id}")).await
    }

    pub async fn add_favorite(
        &self,
        user_id: &UserId,
        program_id: &ProgramId,
    ) -> Result<responses::SuccessMessage, ClientError> {
        let body = requests::FavoriteRequest {
            user_id: user_id.clone(),
            program_id: program_id.clone(),
        };
        self.with_body(Method::POST, "/favorites", &body).await
    }

    /// The favorite to remove is identified by the request body, not the
    /// path.
    pub async fn remove_favorite(
        &self,
        user_id: &UserId,
        program_id: &ProgramId,
    ) -> Result<responses::SuccessMessage, ClientError> {
        let body = requests::FavoriteRequest {
            user_id: user_id.clone(),
            program_id: program_id.clone(),
        };
        self.with_body(Method::DELETE, "/favorites", &body).await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// A non-success response, carrying the message to display.
    #[error("{message}")]
    APIError { status: StatusCode, message: String },
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Invalid request body: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ClientError {
    /// Message suitable for showing to the user.
    pub fn message(&self) -> String {
        match self {
            Self::APIError { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::APIError { status, .. } => Some(*status),
            Self::Network(e) => e.status(),
            Self::Encode(_) => None,
        }
    }
}

/// Deserialize a successful request into the desired type, or return an
/// appropriate error.
pub async fn ok_body<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    let status = response.status();
    if !status.is_success() {
        // an unreadable body still yields the generic message
        let body = response.text().await.unwrap_or_default();
        return Err(ClientError::APIError {
            status,
            message: error_message(status, &body),
        });
    }
    Ok(response.json::<T>().await?)
}

/// Pull the `error` field out of an error body, falling back to the status.
pub fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<responses::ErrorBody>(body)
        .ok()
        .and_then(|body| body.error)
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}
