//! Project list cache
//!
//! Read-through, write-always cache with a soft TTL. The freshness window
//! only gates the optimistic first paint; the source of truth is always
//! the latest successful fetch.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, error, info, warn};

use crate::errors::ConsoleError;
use crate::http::projects::ProjectsApi;
use crate::models::project::Project;
use crate::storage::kv::KvStore;

/// Storage key for the serialized project list
pub const PROJECTS_KEY: &str = "cachedProjects";

/// Storage key for the epoch-millisecond capture timestamp
pub const CAPTURED_AT_KEY: &str = "cachedProjectsTime";

/// Cache options
#[derive(Debug, Clone)]
pub struct Options {
    /// Maximum snapshot age eligible for the optimistic first paint
    pub freshness_window: Duration,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            freshness_window: Duration::from_secs(5 * 60),
        }
    }
}

/// A cached copy of the project list
#[derive(Debug, Clone)]
pub struct CachedSnapshot {
    pub projects: Vec<Project>,
    pub captured_at_ms: i64,
}

impl CachedSnapshot {
    /// Snapshot age relative to `now_ms`
    pub fn age(&self, now_ms: i64) -> Duration {
        Duration::from_millis(now_ms.saturating_sub(self.captured_at_ms).max(0) as u64)
    }

    /// Whether the snapshot is young enough for first paint
    pub fn is_fresh(&self, now_ms: i64, window: Duration) -> bool {
        self.age(now_ms) < window
    }
}

/// The result of a view-mount load
#[derive(Debug, Clone)]
pub struct ProjectListLoad {
    /// Fresh-enough cached copy for immediate render, if any
    pub cached: Option<Vec<Project>>,

    /// Result of the unconditional background fetch
    pub fresh: Option<Vec<Project>>,
}

/// Read-through, write-always project list cache
pub struct ProjectListCache {
    store: KvStore,
    api: Arc<dyn ProjectsApi>,
    options: Options,
}

impl ProjectListCache {
    /// Create a new cache over a store and the project-listing endpoint
    pub fn new(store: KvStore, api: Arc<dyn ProjectsApi>, options: Options) -> Self {
        Self { store, api, options }
    }

    /// Read the persisted snapshot, regardless of age
    pub async fn read_snapshot(&self) -> Option<CachedSnapshot> {
        let data = self.store.get(PROJECTS_KEY).await.ok().flatten()?;
        let captured = self.store.get(CAPTURED_AT_KEY).await.ok().flatten()?;

        let projects: Vec<Project> = match serde_json::from_str(&data) {
            Ok(projects) => projects,
            Err(e) => {
                warn!("Discarding unreadable project snapshot: {}", e);
                return None;
            }
        };

        let captured_at_ms: i64 = match captured.trim().parse() {
            Ok(ms) => ms,
            Err(_) => {
                warn!("Discarding project snapshot with bad timestamp: {:?}", captured);
                return None;
            }
        };

        Some(CachedSnapshot {
            projects,
            captured_at_ms,
        })
    }

    /// The optimistic first paint: the cached list, only while fresh
    pub async fn first_paint(&self) -> Option<Vec<Project>> {
        let snapshot = self.read_snapshot().await?;
        let now_ms = Utc::now().timestamp_millis();

        if snapshot.is_fresh(now_ms, self.options.freshness_window) {
            debug!("Serving {} projects from cache", snapshot.projects.len());
            Some(snapshot.projects)
        } else {
            debug!("Cached project snapshot is stale, suppressing first paint");
            None
        }
    }

    /// Fetch the project list and overwrite the persisted snapshot
    ///
    /// On failure nothing is written and nothing is returned; whatever is
    /// currently rendered stays untouched.
    pub async fn refresh(&self) -> Option<Vec<Project>> {
        match self.api.get_projects().await {
            Ok(projects) => {
                if let Err(e) = self.write_snapshot(&projects).await {
                    // The fresh data still wins in memory.
                    error!("Failed to persist project snapshot: {}", e);
                }
                info!("Refreshed project list: {} projects", projects.len());
                Some(projects)
            }
            Err(e) => {
                error!("Error fetching projects: {}", e);
                None
            }
        }
    }

    /// The view-mount contract: optimistic cached read and unconditional
    /// fetch, issued together
    pub async fn load(&self) -> ProjectListLoad {
        let (cached, fresh) = tokio::join!(self.first_paint(), self.refresh());
        ProjectListLoad { cached, fresh }
    }

    async fn write_snapshot(&self, projects: &[Project]) -> Result<(), ConsoleError> {
        let data = serde_json::to_string(projects)?;
        self.store.set(PROJECTS_KEY, &data).await?;
        self.store
            .set(CAPTURED_AT_KEY, &Utc::now().timestamp_millis().to_string())
            .await?;
        Ok(())
    }
}
