use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use edtrellis_core::{QueryParams, RequestId};
use edtrellis_logging::{trellis_debug, trellis_warn};
use tokio_util::sync::CancellationToken;

use crate::{ApiError, ApiSettings, EngineEvent, JobsQueryApi, ReqwestApi, SessionApi, SessionContext};

enum EngineCommand {
    FetchJobs {
        request_id: RequestId,
        params: QueryParams,
    },
    LoadSession,
    RefreshSession,
    InvalidateSession,
}

/// Runs API calls on a background tokio runtime and reports back over a channel.
///
/// Starting a jobs fetch cancels the one still in flight; its result is never
/// reported.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        let api = Arc::new(ReqwestApi::new(settings)?);
        Ok(Self::with_apis(api.clone(), api))
    }

    pub fn with_apis(jobs: Arc<dyn JobsQueryApi>, session: Arc<dyn SessionApi>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let session = Arc::new(SessionContext::new(session));

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            let mut in_flight: Option<CancellationToken> = None;
            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::FetchJobs { request_id, params } => {
                        let token = CancellationToken::new();
                        if let Some(previous) = in_flight.replace(token.clone()) {
                            previous.cancel();
                        }
                        let jobs = jobs.clone();
                        let event_tx = event_tx.clone();
                        runtime.spawn(async move {
                            fetch_jobs(jobs.as_ref(), request_id, params, token, event_tx).await;
                        });
                    }
                    EngineCommand::LoadSession => {
                        spawn_session_lookup(&runtime, session.clone(), event_tx.clone(), false);
                    }
                    EngineCommand::RefreshSession => {
                        spawn_session_lookup(&runtime, session.clone(), event_tx.clone(), true);
                    }
                    EngineCommand::InvalidateSession => {
                        // Inline so a lookup queued after it sees the empty cache.
                        runtime.block_on(session.invalidate());
                        trellis_debug!("session cache invalidated");
                    }
                }
            }
        });

        Self { cmd_tx, event_rx }
    }

    pub fn fetch_jobs(&self, request_id: RequestId, params: QueryParams) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::FetchJobs { request_id, params });
    }

    /// Resolves the current user, from cache when already loaded.
    pub fn load_session(&self) {
        let _ = self.cmd_tx.send(EngineCommand::LoadSession);
    }

    pub fn refresh_session(&self) {
        let _ = self.cmd_tx.send(EngineCommand::RefreshSession);
    }

    /// Forgets the cached user; the next `load_session` asks the endpoint.
    pub fn invalidate_session(&self) {
        let _ = self.cmd_tx.send(EngineCommand::InvalidateSession);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

fn spawn_session_lookup(
    runtime: &tokio::runtime::Runtime,
    session: Arc<SessionContext>,
    event_tx: mpsc::Sender<EngineEvent>,
    force: bool,
) {
    runtime.spawn(async move {
        let result = if force {
            session.refresh().await
        } else {
            session.current().await
        };
        if let Err(err) = &result {
            trellis_warn!("session lookup failed: {}", err);
        }
        let _ = event_tx.send(EngineEvent::SessionResolved(result));
    });
}

async fn fetch_jobs(
    jobs: &dyn JobsQueryApi,
    request_id: RequestId,
    params: QueryParams,
    token: CancellationToken,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    tokio::select! {
        _ = token.cancelled() => {
            trellis_debug!("jobs fetch superseded request_id={}", request_id);
        }
        result = jobs.query_jobs(&params) => {
            if let Err(err) = &result {
                trellis_warn!("jobs fetch failed request_id={}: {}", request_id, err);
            }
            let _ = event_tx.send(EngineEvent::JobsFetched { request_id, result });
        }
    }
}
