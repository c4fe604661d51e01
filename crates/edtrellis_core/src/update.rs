use crate::{AppState, Effect, FilterField, FilterState, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::LocationChanged(params) => {
            let filters = FilterState::from_query_params(&params);
            state.adopt_location(filters)
        }
        Msg::DraftEdited { field, value } => {
            state.set_draft(field, value);
            Vec::new()
        }
        Msg::DraftSubmitted => {
            let draft = state.draft().clone();
            let next = state
                .committed()
                .clone()
                .with(FilterField::Search, draft.search)
                .with(FilterField::Location, draft.location);
            let effects = state.commit(next);
            state.sync_draft();
            effects
        }
        Msg::CategoricalSelected { field, value } => {
            let next = state.committed().clone().with(field.into(), value);
            state.commit(next)
        }
        Msg::FilterCleared(field) => {
            let next = state.committed().clone().with(field, String::new());
            state.clear_draft_field(field);
            state.commit(next)
        }
        Msg::AllCleared => {
            let effects = state.commit(FilterState::default());
            state.sync_draft();
            effects
        }
        Msg::Commit(next) => {
            let effects = state.commit(next);
            state.sync_draft();
            effects
        }
        Msg::JobsLoaded { request_id, jobs } => {
            state.apply_jobs_loaded(request_id, jobs);
            Vec::new()
        }
        Msg::JobsFailed { request_id, detail } => {
            state.apply_jobs_failed(request_id, &detail);
            Vec::new()
        }
        Msg::ErrorDismissed => {
            state.dismiss_error();
            Vec::new()
        }
        Msg::SessionRefreshRequested => vec![Effect::RefreshSession],
        Msg::SessionChanged(user) => {
            state.set_user(user);
            Vec::new()
        }
        Msg::SignedOut => {
            state.set_user(None);
            vec![Effect::InvalidateSession]
        }
    };

    (state, effects)
}
