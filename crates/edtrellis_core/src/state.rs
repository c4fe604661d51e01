use edtrellis_logging::{trellis_debug, trellis_warn};

use crate::view_model::{AppViewModel, FilterChip};
use crate::{
    CurrentUser, DraftBuffer, Effect, FilterField, FilterState, JobSummary, RequestId, TextField,
};

/// Banner text for any failed jobs fetch.
pub const FETCH_ERROR_MESSAGE: &str = "We couldn't load jobs right now. Please try again.";

/// Jobs fetch lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    committed: FilterState,
    draft: DraftBuffer,
    status: FetchStatus,
    results: Vec<JobSummary>,
    error: Option<String>,
    /// Id of the most recently issued fetch; 0 before the first one.
    latest_request: RequestId,
    user: Option<CurrentUser>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn committed(&self) -> &FilterState {
        &self.committed
    }

    pub fn draft(&self) -> &DraftBuffer {
        &self.draft
    }

    pub fn status(&self) -> FetchStatus {
        self.status
    }

    pub fn results(&self) -> &[JobSummary] {
        &self.results
    }

    pub fn latest_request_id(&self) -> Option<RequestId> {
        (self.latest_request > 0).then_some(self.latest_request)
    }

    pub fn user(&self) -> Option<&CurrentUser> {
        self.user.as_ref()
    }

    pub fn view(&self) -> AppViewModel {
        let active_chips = self
            .committed
            .active()
            .map(|(field, value)| FilterChip {
                field,
                label: field.label(),
                value: value.to_string(),
            })
            .collect::<Vec<_>>();

        AppViewModel {
            filters: self.committed.clone(),
            draft: self.draft.clone(),
            query_string: self.committed.to_query_string(),
            status: self.status,
            error_message: self.error.clone(),
            result_count: self.results.len(),
            results: self.results.clone(),
            has_active_filters: !active_chips.is_empty(),
            active_chips,
            show_fetching_placeholder: self.status == FetchStatus::Loading
                && self.results.is_empty(),
            show_empty_state: self.status == FetchStatus::Success && self.results.is_empty(),
            controls_enabled: true,
            can_apply: self.user.as_ref().is_some_and(|user| user.role.can_apply()),
            can_post_jobs: self
                .user
                .as_ref()
                .is_some_and(|user| user.role.can_post_jobs()),
            user: self.user.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Replaces the committed filters and emits the URL push followed by the
    /// fetch. The draft buffer is left to the caller.
    pub(crate) fn commit(&mut self, next: FilterState) -> Vec<Effect> {
        self.committed = next.normalized();
        let params = self.committed.to_query_params();
        let request_id = self.begin_fetch();
        trellis_debug!(
            "commit request_id={} query={:?}",
            request_id,
            self.committed.to_query_string()
        );
        vec![
            Effect::PushQuery {
                params: params.clone(),
            },
            Effect::FetchJobs { request_id, params },
        ]
    }

    /// Adopts filters read from the URL. The URL already reflects them, so
    /// only a fetch is emitted.
    pub(crate) fn adopt_location(&mut self, filters: FilterState) -> Vec<Effect> {
        self.committed = filters;
        self.sync_draft();
        let request_id = self.begin_fetch();
        trellis_debug!(
            "location request_id={} query={:?}",
            request_id,
            self.committed.to_query_string()
        );
        vec![Effect::FetchJobs {
            request_id,
            params: self.committed.to_query_params(),
        }]
    }

    fn begin_fetch(&mut self) -> RequestId {
        self.latest_request += 1;
        self.status = FetchStatus::Loading;
        self.error = None;
        self.mark_dirty();
        self.latest_request
    }

    pub(crate) fn set_draft(&mut self, field: TextField, value: String) {
        if self.draft.get(field) != value {
            self.draft.set(field, value);
            self.mark_dirty();
        }
    }

    /// Makes the text inputs show the committed text values.
    pub(crate) fn sync_draft(&mut self) {
        let draft = DraftBuffer::from_filters(&self.committed);
        if draft != self.draft {
            self.draft = draft;
            self.mark_dirty();
        }
    }

    pub(crate) fn clear_draft_field(&mut self, field: FilterField) {
        match field {
            FilterField::Search => self.set_draft(TextField::Search, String::new()),
            FilterField::Location => self.set_draft(TextField::Location, String::new()),
            FilterField::Category | FilterField::JobType => {}
        }
    }

    fn is_current(&self, request_id: RequestId) -> bool {
        request_id == self.latest_request && self.status == FetchStatus::Loading
    }

    pub(crate) fn apply_jobs_loaded(&mut self, request_id: RequestId, jobs: Vec<JobSummary>) {
        if !self.is_current(request_id) {
            trellis_debug!(
                "dropping stale jobs response request_id={} latest={}",
                request_id,
                self.latest_request
            );
            return;
        }
        self.results = jobs;
        self.status = FetchStatus::Success;
        self.mark_dirty();
    }

    pub(crate) fn apply_jobs_failed(&mut self, request_id: RequestId, detail: &str) {
        if !self.is_current(request_id) {
            trellis_debug!(
                "dropping stale jobs failure request_id={} latest={}",
                request_id,
                self.latest_request
            );
            return;
        }
        trellis_warn!("jobs fetch failed request_id={}: {}", request_id, detail);
        self.status = FetchStatus::Error;
        self.error = Some(FETCH_ERROR_MESSAGE.to_string());
        self.mark_dirty();
    }

    pub(crate) fn dismiss_error(&mut self) {
        if self.error.take().is_some() {
            self.mark_dirty();
        }
    }

    pub(crate) fn set_user(&mut self, user: Option<CurrentUser>) {
        if self.user != user {
            self.user = user;
            self.mark_dirty();
        }
    }
}
