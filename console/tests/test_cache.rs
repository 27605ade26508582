//! Project list cache integration tests

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use hostrix_console::cache::projects::{Options, ProjectListCache, CAPTURED_AT_KEY};
use hostrix_console::errors::ConsoleError;
use hostrix_console::http::projects::ProjectsApi;
use hostrix_console::models::project::{DeploymentStatus, DeploymentType, Project};
use hostrix_console::storage::kv::KvStore;

fn project(name: &str, slug: &str) -> Project {
    Project {
        id: format!("id-{}", slug),
        name: name.to_string(),
        project_slug: slug.to_string(),
        deployment_status: DeploymentStatus::Success,
        deployment_type: DeploymentType::Static,
        last_deployed_at: None,
        environment: None,
    }
}

/// Backend returning a fixed project list, optionally failing.
struct FakeProjectsApi {
    projects: Mutex<Vec<Project>>,
    fail: AtomicBool,
    calls: AtomicUsize,
}

impl FakeProjectsApi {
    fn new(projects: Vec<Project>) -> Self {
        Self {
            projects: Mutex::new(projects),
            fail: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
        }
    }

    fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProjectsApi for FakeProjectsApi {
    async fn get_projects(&self) -> Result<Vec<Project>, ConsoleError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(ConsoleError::ApiError("500: internal".to_string()));
        }
        Ok(self.projects.lock().unwrap().clone())
    }
}

fn cache_over(dir: &std::path::Path, api: Arc<FakeProjectsApi>) -> ProjectListCache {
    ProjectListCache::new(KvStore::new(dir), api, Options::default())
}

#[tokio::test]
async fn test_refresh_persists_snapshot_for_first_paint() {
    let dir = tempfile::tempdir().unwrap();
    let api = Arc::new(FakeProjectsApi::new(vec![
        project("Foo", "f1"),
        project("Bar", "b1"),
    ]));
    let cache = cache_over(dir.path(), api.clone());

    // Nothing cached yet.
    assert!(cache.first_paint().await.is_none());

    let fresh = cache.refresh().await.unwrap();
    assert_eq!(fresh.len(), 2);
    assert_eq!(api.calls(), 1);

    // The snapshot round-trips and is fresh.
    let painted = cache.first_paint().await.unwrap();
    let names: Vec<_> = painted.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Foo", "Bar"]);
}

#[tokio::test]
async fn test_stale_snapshot_suppresses_first_paint_but_still_refreshes() {
    let dir = tempfile::tempdir().unwrap();
    let api = Arc::new(FakeProjectsApi::new(vec![project("Foo", "f1")]));
    let cache = cache_over(dir.path(), api.clone());

    cache.refresh().await.unwrap();

    // Age the snapshot to 5 minutes and 1 second.
    let store = KvStore::new(dir.path());
    let stale_ms = Utc::now().timestamp_millis() - (5 * 60 * 1000 + 1000);
    store
        .set(CAPTURED_AT_KEY, &stale_ms.to_string())
        .await
        .unwrap();

    assert!(cache.first_paint().await.is_none());

    // The background fetch still occurs and rewrites the snapshot.
    let load = cache.load().await;
    assert!(load.cached.is_none());
    assert_eq!(load.fresh.unwrap().len(), 1);
    assert_eq!(api.calls(), 2);

    assert!(cache.first_paint().await.is_some());
}

#[tokio::test]
async fn test_refresh_failure_keeps_cached_data() {
    let dir = tempfile::tempdir().unwrap();
    let api = Arc::new(FakeProjectsApi::new(vec![project("Foo", "f1")]));
    let cache = cache_over(dir.path(), api.clone());

    cache.refresh().await.unwrap();
    api.set_fail(true);

    let load = cache.load().await;
    assert_eq!(load.cached.as_ref().unwrap().len(), 1);
    assert!(load.fresh.is_none());

    // The persisted snapshot was not disturbed.
    let snapshot = cache.read_snapshot().await.unwrap();
    assert_eq!(snapshot.projects[0].name, "Foo");
}

#[tokio::test]
async fn test_empty_store_with_failing_backend_yields_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let api = Arc::new(FakeProjectsApi::new(vec![]));
    api.set_fail(true);
    let cache = cache_over(dir.path(), api.clone());

    let load = cache.load().await;
    assert!(load.cached.is_none());
    assert!(load.fresh.is_none());
    assert_eq!(api.calls(), 1);
}
