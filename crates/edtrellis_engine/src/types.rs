use std::fmt;

use edtrellis_core::{CurrentUser, RequestId};
use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// A job as returned by the jobs listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawJobRecord")]
pub struct JobRecord {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub category: String,
    pub job_type: String,
    pub salary: Option<String>,
    pub posted_at: Option<String>,
}

/// Wire shape of a job. Backends may send both spellings of a key
/// (`id` and `_id`), so each spelling is its own field and merged after.
#[derive(Deserialize)]
struct RawJobRecord {
    #[serde(default, deserialize_with = "optional_string_or_number")]
    id: Option<String>,
    #[serde(default, rename = "_id", deserialize_with = "optional_string_or_number")]
    mongo_id: Option<String>,
    title: String,
    #[serde(default)]
    company: Option<String>,
    #[serde(default, rename = "companyName")]
    company_name: Option<String>,
    #[serde(default)]
    location: String,
    #[serde(default)]
    category: String,
    #[serde(default, rename = "type")]
    job_type: Option<String>,
    #[serde(default, rename = "jobType")]
    job_type_alt: Option<String>,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    salary: Option<String>,
    #[serde(default, rename = "postedAt")]
    posted_at: Option<String>,
    #[serde(default, rename = "posted_at")]
    posted_at_snake: Option<String>,
    #[serde(default, rename = "createdAt")]
    created_at: Option<String>,
}

impl From<RawJobRecord> for JobRecord {
    fn from(raw: RawJobRecord) -> Self {
        Self {
            id: raw.id.or(raw.mongo_id).unwrap_or_default(),
            title: raw.title,
            company: raw.company.or(raw.company_name).unwrap_or_default(),
            location: raw.location,
            category: raw.category,
            job_type: raw.job_type.or(raw.job_type_alt).unwrap_or_default(),
            salary: raw.salary,
            posted_at: raw
                .posted_at
                .or(raw.posted_at_snake)
                .or(raw.created_at),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct JobsEnvelope {
    pub success: bool,
    #[serde(default, alias = "data")]
    pub jobs: Option<Vec<JobRecord>>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SessionEnvelope {
    pub success: bool,
    #[serde(default)]
    pub user: Option<UserRecord>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserRecord {
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub id: Option<String>,
    #[serde(default, rename = "_id", deserialize_with = "optional_string_or_number")]
    pub mongo_id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub role: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(serde_json::Number),
}

impl From<StringOrNumber> for String {
    fn from(value: StringOrNumber) -> Self {
        match value {
            StringOrNumber::String(s) => s,
            StringOrNumber::Number(n) => n.to_string(),
        }
    }
}

fn optional_string_or_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(Option::<StringOrNumber>::deserialize(deserializer)?.map(String::from))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    JobsFetched {
        request_id: RequestId,
        result: Result<Vec<JobRecord>, ApiError>,
    },
    /// `Ok(None)` means nobody is logged in.
    SessionResolved(Result<Option<CurrentUser>, ApiError>),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: FailureKind,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    Network,
    /// The API answered with `success: false`.
    Rejected,
    /// The body was not the expected JSON shape.
    Malformed,
    TooLarge { max_bytes: u64, actual: Option<u64> },
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Rejected => write!(f, "rejected by api"),
            FailureKind::Malformed => write!(f, "malformed response"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
        }
    }
}
