use std::time::Duration;

use tracing::{info, warn};

use crate::io::source::{RecordSource, SourceError};
use crate::ops::store::RecordStore;

/// Default bound on the initial fetch
pub const DEFAULT_LOAD_TIMEOUT: Duration = Duration::from_secs(10);

/// State of the initial bulk population of the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Loading,
    Ready,
    Failed(String),
}

/// Error type for the initial load
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("users have already been loaded for this session")]
    AlreadyLoaded,
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error("timed out after {}s waiting for the user list", .0.as_secs())]
    TimedOut(Duration),
}

/// Single-threaded runtime that drives the fetch. Everything else in the
/// process is synchronous.
pub fn build_runtime() -> std::io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

/// Runs the one-shot fetch that fills the [`RecordStore`] and tracks its
/// outcome. A failed load is final for the session.
#[derive(Debug, Clone)]
pub struct LoadCoordinator {
    status: LoadStatus,
    attempted: bool,
    timeout: Duration,
}

impl Default for LoadCoordinator {
    fn default() -> Self {
        Self::new(DEFAULT_LOAD_TIMEOUT)
    }
}

impl LoadCoordinator {
    pub fn new(timeout: Duration) -> Self {
        LoadCoordinator {
            status: LoadStatus::Loading,
            attempted: false,
            timeout,
        }
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn is_ready(&self) -> bool {
        self.status == LoadStatus::Ready
    }

    /// Fetch every record from `source` and install them in `store`.
    ///
    /// Returns the number of records loaded. On failure the status becomes
    /// `Failed` and the store is left empty. Only the first call does any
    /// work; later calls return `AlreadyLoaded` without touching anything.
    pub async fn load(
        &mut self,
        source: &dyn RecordSource,
        store: &mut RecordStore,
    ) -> Result<usize, LoadError> {
        if self.attempted {
            return Err(LoadError::AlreadyLoaded);
        }
        self.attempted = true;
        self.status = LoadStatus::Loading;

        let outcome = match tokio::time::timeout(self.timeout, source.fetch_all()).await {
            Ok(Ok(records)) => Ok(records),
            Ok(Err(e)) => Err(LoadError::Source(e)),
            Err(_) => Err(LoadError::TimedOut(self.timeout)),
        };

        match outcome {
            Ok(records) => {
                store.replace_all(records);
                self.status = LoadStatus::Ready;
                info!(count = store.len(), "loaded users");
                Ok(store.len())
            }
            Err(e) => {
                store.replace_all(Vec::new());
                warn!(error = %e, "error fetching user data");
                self.status = LoadStatus::Failed(e.to_string());
                Err(e)
            }
        }
    }
}
