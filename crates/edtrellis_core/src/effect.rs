use crate::QueryParams;

/// Monotonically increasing token identifying one jobs fetch.
pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Push a history entry whose query string is exactly `params`.
    PushQuery { params: QueryParams },
    /// Query the jobs API with `params`; the reply must carry `request_id`.
    FetchJobs {
        request_id: RequestId,
        params: QueryParams,
    },
    /// Re-read the current user from the session endpoint.
    RefreshSession,
    /// Drop the cached user so the next lookup asks the endpoint again.
    InvalidateSession,
}
