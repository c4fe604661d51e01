use crate::{
    CategoricalField, CurrentUser, FilterField, FilterState, JobSummary, QueryParams, RequestId,
    TextField,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The URL changed outside the controller (mount, Back/Forward).
    LocationChanged(QueryParams),
    /// User typed into a text filter. Never commits.
    DraftEdited { field: TextField, value: String },
    /// Form submit or Enter in a text filter.
    DraftSubmitted,
    /// A select changed; commits immediately.
    CategoricalSelected {
        field: CategoricalField,
        value: String,
    },
    /// User removed one active filter chip.
    FilterCleared(FilterField),
    /// User cleared every filter.
    AllCleared,
    /// Replace the committed filters wholesale.
    Commit(FilterState),
    /// Jobs API answered for `request_id`.
    JobsLoaded {
        request_id: RequestId,
        jobs: Vec<JobSummary>,
    },
    /// Jobs API failed for `request_id`; `detail` is for the log only.
    JobsFailed {
        request_id: RequestId,
        detail: String,
    },
    /// User closed the error banner.
    ErrorDismissed,
    /// User asked to re-read the session.
    SessionRefreshRequested,
    /// Session context resolved; `None` means anonymous.
    SessionChanged(Option<CurrentUser>),
    /// The user signed out; forget who was logged in.
    SignedOut,
}
