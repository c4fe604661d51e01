//! EdTrellis engine: jobs/session API clients, navigation history and effect execution.
mod api;
mod engine;
mod navigation;
mod session;
mod types;

pub use api::{ApiSettings, JobsQueryApi, ReqwestApi, SessionApi};
pub use engine::EngineHandle;
pub use navigation::{MemoryHistory, Navigation};
pub use session::SessionContext;
pub use types::{ApiError, EngineEvent, FailureKind, JobRecord};
