pub mod api_client;
pub mod requests;
pub mod responses;

pub use api_client::{APIClient, ClientError, RequestOptions};

use derive_more::Display;
use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Id type wrappers keep program, institution, and user ids from mixing.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct ProgramId(pub String);

#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct InstitutionId(pub String);

#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct UserId(pub String);

impl From<&str> for ProgramId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for InstitutionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Experience level shared by programs and users.
///
/// The API speaks the Portuguese values (`iniciante`, `intermediario`,
/// `avancado`); the English names are accepted on input.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    Serialize,
    Deserialize,
)]
pub enum Level {
    #[serde(rename = "iniciante", alias = "beginner")]
    #[display("beginner")]
    Beginner,
    #[serde(rename = "intermediario", alias = "intermediate")]
    #[display("intermediate")]
    Intermediate,
    #[serde(rename = "avancado", alias = "advanced")]
    #[display("advanced")]
    Advanced,
}

impl Level {
    pub const ALL: [Level; 3] =
        [Level::Beginner, Level::Intermediate, Level::Advanced];
}

impl FromStr for Level {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "iniciante" | "beginner" => Ok(Self::Beginner),
            "intermediario" | "intermediate" => Ok(Self::Intermediate),
            "avancado" | "advanced" => Ok(Self::Advanced),
            _ => Err(UnknownVariant(s.to_string())),
        }
    }
}

/// How a program is delivered.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    Serialize,
    Deserialize,
)]
pub enum Format {
    #[serde(rename = "presencial", alias = "in-person")]
    #[display("in-person")]
    InPerson,
    #[serde(rename = "online")]
    #[display("online")]
    Online,
    #[serde(rename = "hibrido", alias = "hybrid")]
    #[display("hybrid")]
    Hybrid,
}

impl Format {
    pub const ALL: [Format; 3] =
        [Format::InPerson, Format::Online, Format::Hybrid];
}

impl FromStr for Format {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "presencial" | "in-person" => Ok(Self::InPerson),
            "online" => Ok(Self::Online),
            "hibrido" | "hybrid" => Ok(Self::Hybrid),
            _ => Err(UnknownVariant(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown value: {0}")]
pub struct UnknownVariant(pub String);

/// A training program as served by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    pub id: ProgramId,
    pub title: String,
    pub description: String,
    /// Institution name, denormalized for display.
    pub institution: String,
    /// Not guaranteed to reference a known institution.
    pub institution_id: InstitutionId,
    pub category: String,
    pub level: Level,
    /// Free-form label such as "6 months".
    pub duration: String,
    pub format: Format,
    pub start_date: Date,
    pub end_date: Date,
    pub application_deadline: Date,
    pub requirements: Vec<String>,
    pub benefits: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Institution {
    pub id: InstitutionId,
    pub name: String,
    pub description: String,
    pub website: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    pub programs_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    /// Interest categories, in the order the user picked them.
    pub interests: Vec<String>,
    pub level: Level,
}

/// A favorite as listed by `GET /favorites/user/:userId`, with an embedded
/// summary of the program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    pub id: String,
    pub user_id: UserId,
    pub program_id: ProgramId,
    pub program: ProgramSummary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramSummary {
    pub id: ProgramId,
    pub title: String,
    pub description: String,
    pub institution: String,
    pub category: String,
    pub level: Level,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl From<&Program> for ProgramSummary {
    fn from(program: &Program) -> Self {
        Self {
            id: program.id.clone(),
            title: program.title.clone(),
            description: program.description.clone(),
            institution: program.institution.clone(),
            category: program.category.clone(),
            level: program.level,
            image_url: program.image_url.clone(),
        }
    }
}
