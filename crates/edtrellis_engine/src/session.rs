use std::sync::Arc;

use edtrellis_core::CurrentUser;
use edtrellis_logging::trellis_debug;
use tokio::sync::Mutex;

use crate::{ApiError, SessionApi};

/// Lazily loaded, explicitly refreshed view of who is logged in.
///
/// The first `current()` call asks the session endpoint and caches the answer,
/// including "anonymous". Later calls are served from the cache until
/// `refresh()` or `invalidate()`.
pub struct SessionContext {
    api: Arc<dyn SessionApi>,
    cached: Mutex<Option<Option<CurrentUser>>>,
}

impl SessionContext {
    pub fn new(api: Arc<dyn SessionApi>) -> Self {
        Self {
            api,
            cached: Mutex::new(None),
        }
    }

    pub async fn current(&self) -> Result<Option<CurrentUser>, ApiError> {
        let mut cached = self.cached.lock().await;
        if let Some(user) = cached.as_ref() {
            return Ok(user.clone());
        }
        let user = self.api.current_user().await?;
        trellis_debug!("session loaded: {:?}", user.as_ref().map(|u| &u.id));
        *cached = Some(user.clone());
        Ok(user)
    }

    /// Refetches unconditionally. On failure the previous answer is kept.
    pub async fn refresh(&self) -> Result<Option<CurrentUser>, ApiError> {
        let mut cached = self.cached.lock().await;
        let user = self.api.current_user().await?;
        trellis_debug!("session refreshed: {:?}", user.as_ref().map(|u| &u.id));
        *cached = Some(user.clone());
        Ok(user)
    }

    /// Forgets the cached user; the next `current()` refetches.
    pub async fn invalidate(&self) {
        *self.cached.lock().await = None;
    }
}
