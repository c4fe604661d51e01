use std::time::Duration;

use edtrellis_core::{CurrentUser, QueryParams, UserRole};
use edtrellis_logging::{trellis_debug, trellis_warn};
use futures_util::StreamExt;
use reqwest::header::{ACCEPT, COOKIE};
use reqwest::{StatusCode, Url};

use crate::types::{JobsEnvelope, SessionEnvelope};
use crate::{ApiError, FailureKind, JobRecord};

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub jobs_path: String,
    pub session_path: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
    /// Sent verbatim as the `Cookie` header on every request.
    pub session_cookie: Option<String>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            jobs_path: "/api/jobs".to_string(),
            session_path: "/api/auth/me".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 5 * 1024 * 1024,
            session_cookie: None,
        }
    }
}

/// The jobs listing endpoint.
#[async_trait::async_trait]
pub trait JobsQueryApi: Send + Sync {
    /// `params` holds only the applied filters; absent keys mean no constraint.
    async fn query_jobs(&self, params: &QueryParams) -> Result<Vec<JobRecord>, ApiError>;
}

/// The cookie-backed "who am I" endpoint.
#[async_trait::async_trait]
pub trait SessionApi: Send + Sync {
    async fn current_user(&self) -> Result<Option<CurrentUser>, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestApi {
    settings: ApiSettings,
    client: reqwest::Client,
}

impl ReqwestApi {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        Url::parse(&settings.base_url)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    fn endpoint(&self, path: &str, params: &QueryParams) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.settings.base_url)
            .and_then(|base| base.join(path))
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if params.is_empty() {
            url.set_query(None);
        } else {
            url.query_pairs_mut().clear().extend_pairs(params.iter());
        }
        Ok(url)
    }

    /// GETs `url` and returns the body, or the status code when it is not a
    /// success.
    async fn get(&self, url: Url) -> Result<Result<Vec<u8>, StatusCode>, ApiError> {
        trellis_debug!("GET {}", url);
        let mut request = self.client.get(url).header(ACCEPT, "application/json");
        if let Some(cookie) = self.settings.session_cookie.as_deref() {
            request = request.header(COOKIE, cookie);
        }
        let response = request.send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Ok(Err(status));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(self.too_large(Some(content_len)));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(self.too_large(Some(next_len)));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(Ok(bytes))
    }

    fn too_large(&self, actual: Option<u64>) -> ApiError {
        ApiError::new(
            FailureKind::TooLarge {
                max_bytes: self.settings.max_bytes,
                actual,
            },
            "response too large",
        )
    }
}

#[async_trait::async_trait]
impl JobsQueryApi for ReqwestApi {
    async fn query_jobs(&self, params: &QueryParams) -> Result<Vec<JobRecord>, ApiError> {
        let url = self.endpoint(&self.settings.jobs_path, params)?;
        let body = self.get(url).await?.map_err(status_error)?;
        let jobs = parse_jobs(&body)?;
        trellis_debug!("jobs query returned {} records", jobs.len());
        Ok(jobs)
    }
}

#[async_trait::async_trait]
impl SessionApi for ReqwestApi {
    async fn current_user(&self) -> Result<Option<CurrentUser>, ApiError> {
        let url = self.endpoint(&self.settings.session_path, &QueryParams::new())?;
        match self.get(url).await? {
            Ok(body) => parse_session(&body),
            Err(StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) => Ok(None),
            Err(status) => Err(status_error(status)),
        }
    }
}

fn status_error(status: StatusCode) -> ApiError {
    ApiError::new(FailureKind::HttpStatus(status.as_u16()), status.to_string())
}

fn parse_jobs(body: &[u8]) -> Result<Vec<JobRecord>, ApiError> {
    let envelope: JobsEnvelope = serde_json::from_slice(body)
        .map_err(|err| ApiError::new(FailureKind::Malformed, err.to_string()))?;
    if !envelope.success {
        let message = envelope
            .message
            .unwrap_or_else(|| "jobs request rejected".to_string());
        return Err(ApiError::new(FailureKind::Rejected, message));
    }
    envelope
        .jobs
        .ok_or_else(|| ApiError::new(FailureKind::Malformed, "missing jobs list"))
}

fn parse_session(body: &[u8]) -> Result<Option<CurrentUser>, ApiError> {
    let envelope: SessionEnvelope = serde_json::from_slice(body)
        .map_err(|err| ApiError::new(FailureKind::Malformed, err.to_string()))?;
    let Some(user) = envelope.user.filter(|_| envelope.success) else {
        return Ok(None);
    };
    let id = user
        .id
        .or(user.mongo_id)
        .ok_or_else(|| ApiError::new(FailureKind::Malformed, "user without id"))?;
    let Some(role) = UserRole::from_api(&user.role) else {
        trellis_warn!("unknown role {:?} for user {}; treating as anonymous", user.role, id);
        return Ok(None);
    };
    Ok(Some(CurrentUser {
        id,
        name: user.name,
        email: user.email,
        role,
    }))
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return ApiError::new(FailureKind::Malformed, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}
