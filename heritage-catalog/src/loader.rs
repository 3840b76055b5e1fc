//! Stateful, per-owner catalog loader.
//!
//! Each page (or any other owner) holds its own [`ModelCatalogLoader`]. A
//! call to [`ModelCatalogLoader::load`] never blocks: it publishes a fresh
//! `Loading` result, starts the round trip on the Tokio runtime and returns a
//! [`LoadHandle`]. Observers follow the result through a `watch` channel.
//!
//! Overlapping loads are resolved with a generation token. Only the
//! completion carrying the most recently issued token is applied; older ones
//! are dropped. Spawned round trips hold a weak reference to the loader's
//! state, so a completion that lands after the owner is gone writes nothing.

use crate::client::CatalogClient;
use crate::query::CatalogQuery;
use crate::types::CatalogQueryResult;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// What happened to the completion of one load invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The result was published.
    Applied,
    /// A newer load was issued before this one completed.
    Superseded,
    /// The owning loader was dropped before completion.
    Orphaned,
    /// The background task did not run to completion.
    Aborted,
}

/// Handle to one in-flight load.
#[derive(Debug)]
pub struct LoadHandle {
    generation: u64,
    task: JoinHandle<LoadOutcome>,
}

impl LoadHandle {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Wait for this invocation to finish, whether or not it was applied.
    pub async fn wait(self) -> LoadOutcome {
        match self.task.await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(generation = self.generation, "Catalog load task failed: {}", e);
                LoadOutcome::Aborted
            }
        }
    }
}

#[derive(Debug)]
struct LoaderState {
    latest: AtomicU64,
    sender: watch::Sender<CatalogQueryResult>,
}

impl LoaderState {
    /// Issue a new generation and reset the result to `Loading`.
    ///
    /// Both happen under the channel's write lock so that a completion can
    /// never slip in between the token bump and the reset.
    fn begin(&self) -> u64 {
        let mut generation = 0;
        self.sender.send_modify(|current| {
            generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
            *current = CatalogQueryResult::loading();
        });
        generation
    }

    /// Publish `result` only if `generation` is still the latest issued.
    fn complete(&self, generation: u64, result: CatalogQueryResult) -> bool {
        self.sender.send_if_modified(|current| {
            if self.latest.load(Ordering::SeqCst) != generation {
                return false;
            }
            *current = result;
            true
        })
    }
}

/// Loads the catalog for a single owner and keeps the latest result.
#[derive(Debug)]
pub struct ModelCatalogLoader {
    client: Arc<CatalogClient>,
    query: CatalogQuery,
    state: Arc<LoaderState>,
}

impl ModelCatalogLoader {
    /// Create an idle loader. The client is shared; the result is not.
    pub fn new(client: Arc<CatalogClient>, query: CatalogQuery) -> Self {
        let (sender, _) = watch::channel(CatalogQueryResult::idle());
        Self {
            client,
            query,
            state: Arc::new(LoaderState {
                latest: AtomicU64::new(0),
                sender,
            }),
        }
    }

    pub fn query(&self) -> &CatalogQuery {
        &self.query
    }

    /// Start a load. Returns immediately.
    ///
    /// The previous items and error are cleared at once; exactly one request
    /// is sent per call.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    pub fn load(&self) -> LoadHandle {
        let generation = self.state.begin();
        debug!(generation, "Starting catalog load");

        let client = Arc::clone(&self.client);
        let query = self.query.clone();
        let state: Weak<LoaderState> = Arc::downgrade(&self.state);

        let task = tokio::spawn(async move {
            let result = client.query(&query).await;
            let Some(state) = state.upgrade() else {
                debug!(generation, "Loader dropped before completion, discarding result");
                return LoadOutcome::Orphaned;
            };
            if state.complete(generation, result) {
                debug!(generation, "Applied catalog result");
                LoadOutcome::Applied
            } else {
                debug!(generation, "Discarding stale catalog result");
                LoadOutcome::Superseded
            }
        });

        LoadHandle { generation, task }
    }

    /// Retry with the same filter and limit as the first load.
    pub fn reload(&self) -> LoadHandle {
        self.load()
    }

    /// Start a load and wait for it, returning the current result afterwards.
    pub async fn load_and_wait(&self) -> CatalogQueryResult {
        self.load().wait().await;
        self.result()
    }

    /// Snapshot of the current result.
    pub fn result(&self) -> CatalogQueryResult {
        self.state.sender.borrow().clone()
    }

    /// Number of items in the current result, without cloning it.
    pub fn item_count(&self) -> usize {
        self.state.sender.borrow().items().len()
    }

    /// Observe result transitions.
    pub fn subscribe(&self) -> watch::Receiver<CatalogQueryResult> {
        self.state.sender.subscribe()
    }

    /// The most recently issued generation token, 0 before the first load.
    pub fn generation(&self) -> u64 {
        self.state.latest.load(Ordering::SeqCst)
    }
}
