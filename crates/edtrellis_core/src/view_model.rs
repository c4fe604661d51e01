use crate::{CurrentUser, DraftBuffer, FetchStatus, FilterField, FilterState, JobSummary};

/// Read-only snapshot handed to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub filters: FilterState,
    pub draft: DraftBuffer,
    /// Query string of the committed filters, without `?`.
    pub query_string: String,
    pub status: FetchStatus,
    pub error_message: Option<String>,
    pub results: Vec<JobSummary>,
    pub result_count: usize,
    pub active_chips: Vec<FilterChip>,
    pub has_active_filters: bool,
    /// Loading with nothing on screen yet.
    pub show_fetching_placeholder: bool,
    /// Loaded successfully but nothing matched.
    pub show_empty_state: bool,
    pub controls_enabled: bool,
    pub user: Option<CurrentUser>,
    pub can_apply: bool,
    pub can_post_jobs: bool,
    pub dirty: bool,
}

/// One removable applied filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterChip {
    pub field: FilterField,
    pub label: &'static str,
    pub value: String,
}
