//! EdTrellis core: pure filter-sync state machine and view-model helpers.
mod effect;
mod filter;
mod job;
mod msg;
mod query;
mod session;
mod state;
mod update;
pub mod validation;
mod view_model;

pub use effect::{Effect, RequestId};
pub use filter::{
    CategoricalField, DraftBuffer, FilterField, FilterState, TextField, CATEGORIES, JOB_TYPES,
};
pub use job::JobSummary;
pub use msg::Msg;
pub use query::{encode_query_string, parse_query_string, QueryParams};
pub use session::{CurrentUser, UserRole};
pub use state::{AppState, FetchStatus, FETCH_ERROR_MESSAGE};
pub use update::update;
pub use view_model::{AppViewModel, FilterChip};
