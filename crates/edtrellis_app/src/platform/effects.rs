use std::time::Duration;

use edtrellis_core::{Effect, JobSummary, Msg, QueryParams};
use edtrellis_engine::{EngineEvent, EngineHandle, JobRecord, MemoryHistory, Navigation};
use edtrellis_logging::{trellis_info, trellis_warn};

/// Executes core effects against the engine and the history stack, and turns
/// engine events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
    history: MemoryHistory,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, history: MemoryHistory) -> Self {
        Self { engine, history }
    }

    pub fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::PushQuery { params } => {
                    self.history.push_query(&params);
                    trellis_info!("PushQuery url={}", self.history.current_url());
                }
                Effect::FetchJobs { request_id, params } => {
                    trellis_info!("FetchJobs request_id={} params={:?}", request_id, params);
                    self.engine.fetch_jobs(request_id, params);
                }
                Effect::RefreshSession => {
                    trellis_info!("RefreshSession");
                    self.engine.refresh_session();
                }
                Effect::InvalidateSession => {
                    trellis_info!("InvalidateSession");
                    self.engine.invalidate_session();
                }
            }
        }
    }

    pub fn load_session(&self) {
        self.engine.load_session();
    }

    pub fn current_query(&self) -> QueryParams {
        self.history.current_query()
    }

    pub fn current_url(&self) -> String {
        self.history.current_url().to_string()
    }

    pub fn back(&mut self) -> Option<QueryParams> {
        self.history.back()
    }

    pub fn forward(&mut self) -> Option<QueryParams> {
        self.history.forward()
    }

    /// Waits up to `timeout` for the next engine event, then drains whatever
    /// else is already queued. Empty when nothing arrived in time.
    pub fn wait_events(&self, timeout: Duration) -> Vec<Msg> {
        let Some(first) = self.engine.recv_timeout(timeout) else {
            return Vec::new();
        };
        let mut msgs: Vec<Msg> = map_event(first).into_iter().collect();
        msgs.extend(self.poll_events());
        msgs
    }

    /// Drains pending engine events without blocking.
    pub fn poll_events(&self) -> Vec<Msg> {
        let mut msgs = Vec::new();
        while let Some(event) = self.engine.try_recv() {
            if let Some(msg) = map_event(event) {
                msgs.push(msg);
            }
        }
        msgs
    }
}

fn map_event(event: EngineEvent) -> Option<Msg> {
    match event {
        EngineEvent::JobsFetched { request_id, result } => Some(match result {
            Ok(records) => Msg::JobsLoaded {
                request_id,
                jobs: records.into_iter().map(map_job).collect(),
            },
            Err(err) => Msg::JobsFailed {
                request_id,
                detail: err.to_string(),
            },
        }),
        EngineEvent::SessionResolved(Ok(user)) => Some(Msg::SessionChanged(user)),
        EngineEvent::SessionResolved(Err(err)) => {
            // Keep whatever the state already shows.
            trellis_warn!("Session unavailable: {}", err);
            None
        }
    }
}

fn map_job(record: JobRecord) -> JobSummary {
    JobSummary {
        id: record.id,
        title: record.title,
        company: record.company,
        location: record.location,
        category: record.category,
        job_type: record.job_type,
        salary: record.salary,
        posted_at: record.posted_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edtrellis_engine::{ApiError, FailureKind};

    #[test]
    fn failed_fetch_maps_to_jobs_failed_with_detail() {
        let msg = map_event(EngineEvent::JobsFetched {
            request_id: 4,
            result: Err(ApiError {
                kind: FailureKind::HttpStatus(502),
                message: "Bad Gateway".to_string(),
            }),
        });
        assert_eq!(
            msg,
            Some(Msg::JobsFailed {
                request_id: 4,
                detail: "http status 502: Bad Gateway".to_string(),
            })
        );
    }

    #[test]
    fn records_map_field_by_field() {
        let record = JobRecord {
            id: "j1".to_string(),
            title: "Librarian".to_string(),
            company: "City College".to_string(),
            location: "York".to_string(),
            category: "Education".to_string(),
            job_type: "Part-time".to_string(),
            salary: Some("24000".to_string()),
            posted_at: None,
        };
        let summary = map_job(record);
        assert_eq!(summary.title, "Librarian");
        assert_eq!(summary.job_type, "Part-time");
        assert_eq!(summary.salary.as_deref(), Some("24000"));
    }

    #[test]
    fn session_errors_are_dropped() {
        let msg = map_event(EngineEvent::SessionResolved(Err(ApiError {
            kind: FailureKind::Timeout,
            message: "slow".to_string(),
        })));
        assert_eq!(msg, None);
    }
}
