use crate::config::DashboardConfig;
use crate::domain::{ListingRecord, Partition};
use crate::errors::ServerError;
use crate::importer::ImportBatch;
use crate::router::{handle, AppState};
use crate::store::{CsvStore, ImportMode, ImportOutcome, ListingStore, SqliteStore};
use crate::templates::html_error_response;
use astra::{Body, Response};
use http::{Method, Request};
use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;

/// A scratch directory with `data/`, `static/` and a database path inside.
pub struct TestEnv {
    _dir: TempDir,
    pub data_dir: PathBuf,
    pub static_dir: PathBuf,
    pub db_path: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let data_dir = dir.path().join("data");
        let static_dir = dir.path().join("static");
        fs::create_dir_all(&data_dir).unwrap();
        fs::create_dir_all(&static_dir).unwrap();
        let db_path = dir.path().join("airbnb.sqlite");
        Self {
            _dir: dir,
            data_dir,
            static_dir,
            db_path,
        }
    }

    pub fn write_source(&self, file_name: &str, content: &str) -> PathBuf {
        let path = self.data_dir.join(file_name);
        fs::write(&path, content).unwrap();
        path
    }

    pub fn sqlite_state(&self) -> AppState {
        self.state(Box::new(SqliteStore::read_only(&self.db_path)))
    }

    pub fn csv_state(&self) -> AppState {
        self.state(Box::new(CsvStore::new(&self.data_dir)))
    }

    pub fn state(&self, store: Box<dyn ListingStore>) -> AppState {
        AppState {
            config: DashboardConfig::default(),
            store,
            static_dir: self.static_dir.clone(),
            geojson_dir: self.data_dir.join("geojson"),
        }
    }
}

/// Source CSV shaped like the Kaggle export: pandas index column first, no
/// `cleanliness_rating` unless asked for.
pub fn listings_csv(rows: usize, with_cleanliness: bool) -> String {
    let mut out = String::from(",realSum,room_type,person_capacity,guest_satisfaction_overall,dist,metro_dist,attr_index,rest_index,lng,lat");
    if with_cleanliness {
        out.push_str(",cleanliness_rating");
    }
    out.push('\n');

    for i in 0..rows {
        let lat = 52.4 + (i as f64) * 0.0001;
        out.push_str(&format!(
            "{i},{price:.2},Private room,2.0,90.0,1.5,0.3,120.5,250.1,13.4,{lat:.6}",
            price = 100.0 + i as f64
        ));
        if with_cleanliness {
            out.push_str(",9.0");
        }
        out.push('\n');
    }
    out
}

pub fn partition(city: &str, period: &str) -> Partition {
    DashboardConfig::default()
        .partition(city, period)
        .expect("valid partition")
}

/// Run a request through the router the way `main` does.
pub fn send(state: &AppState, method: Method, uri: &str) -> Response {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    match handle(req, state) {
        Ok(resp) => resp,
        Err(err) => html_error_response(err),
    }
}

pub fn get(state: &AppState, uri: &str) -> Response {
    send(state, Method::GET, uri)
}

pub fn body_string(resp: Response) -> String {
    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    body
}

pub fn body_json(resp: Response) -> serde_json::Value {
    serde_json::from_str(&body_string(resp)).expect("response body is JSON")
}

pub fn content_type(resp: &Response) -> String {
    resp.headers()
        .get("Content-Type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string()
}

/// Store that counts calls and fails them all.
#[derive(Default)]
pub struct CountingStore {
    pub calls: AtomicUsize,
}

impl CountingStore {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ListingStore for CountingStore {
    fn import_partition(
        &self,
        _batch: &ImportBatch,
        _mode: ImportMode,
    ) -> Result<ImportOutcome, ServerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(ServerError::DbError("counting store rejects writes".into()))
    }

    fn query(&self, _partition: &Partition) -> Result<Vec<ListingRecord>, ServerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(ServerError::DbError("counting store rejects reads".into()))
    }
}

impl ListingStore for std::sync::Arc<CountingStore> {
    fn import_partition(
        &self,
        batch: &ImportBatch,
        mode: ImportMode,
    ) -> Result<ImportOutcome, ServerError> {
        self.as_ref().import_partition(batch, mode)
    }

    fn query(&self, partition: &Partition) -> Result<Vec<ListingRecord>, ServerError> {
        self.as_ref().query(partition)
    }
}

pub fn import_all(env: &TestEnv, mode: ImportMode) -> crate::importer::ImportSummary {
    let store = SqliteStore::open(&env.db_path).expect("open store");
    crate::importer::run_import(&DashboardConfig::default(), &env.data_dir, &store, mode)
}
