// src/tests/router_tests/data_tests.rs

use crate::store::ImportMode;
use crate::tests::utils::{
    body_json, content_type, get, import_all, listings_csv, send, CountingStore, TestEnv,
};
use http::Method;
use serde_json::{json, Value};
use std::sync::Arc;

#[test]
fn berlin_weekday_without_cleanliness_column() {
    let env = TestEnv::new();
    env.write_source("berlin_weekdays.csv", &listings_csv(500, false));

    let summary = import_all(&env, ImportMode::SkipUnchanged);
    assert_eq!(summary.imported_files, 1);
    assert_eq!(summary.rows_imported, 500);
    assert_eq!(summary.missing_files, 19);

    let state = env.sqlite_state();
    let resp = get(&state, "/api/data/berlin/weekday");
    assert_eq!(resp.status(), 200);
    assert!(content_type(&resp).starts_with("application/json"));

    let body = body_json(resp);
    let records = body.as_array().expect("array of records");
    assert_eq!(records.len(), 500);

    for record in records {
        let obj = record.as_object().unwrap();
        assert_eq!(obj.get("cleanliness_rating"), Some(&Value::Null));
        assert_eq!(obj["city"], json!("berlin"));
        assert_eq!(obj["period"], json!("weekday"));
        assert_eq!(obj["person_capacity"], json!(2));
        assert!(obj["id"].is_i64());
    }

    // Insertion order is preserved.
    assert_eq!(records[0]["realSum"], json!(100.0));
    assert_eq!(records[499]["realSum"], json!(599.0));
}

#[test]
fn unknown_city_is_rejected_without_touching_the_store() {
    let env = TestEnv::new();
    let store = Arc::new(CountingStore::default());
    let state = env.state(Box::new(store.clone()));

    let resp = get(&state, "/api/data/atlantis/weekday");
    assert_eq!(resp.status(), 400);
    let body = body_json(resp);
    let message = body["error"].as_str().unwrap();
    assert!(!message.is_empty());
    assert!(message.contains("atlantis"));

    let resp = get(&state, "/api/data/berlin/holiday");
    assert_eq!(resp.status(), 400);

    assert_eq!(store.calls(), 0);
}

#[test]
fn valid_pair_reaches_the_store() {
    let env = TestEnv::new();
    let store = Arc::new(CountingStore::default());
    let state = env.state(Box::new(store.clone()));

    let resp = get(&state, "/api/data/berlin/weekday");
    assert_eq!(resp.status(), 500);
    assert_eq!(store.calls(), 1);
}

#[test]
fn empty_partition_is_an_empty_list() {
    let env = TestEnv::new();
    env.write_source("rome_weekends.csv", &listings_csv(3, true));
    import_all(&env, ImportMode::SkipUnchanged);

    let state = env.sqlite_state();
    let resp = get(&state, "/api/data/rome/weekday");
    assert_eq!(resp.status(), 200);
    assert_eq!(body_json(resp), json!([]));
}

#[test]
fn record_count_matches_each_partition() {
    let env = TestEnv::new();
    let sizes = [
        ("amsterdam", "weekday", 4),
        ("amsterdam", "weekend", 7),
        ("vienna", "weekday", 1),
        ("lisbon", "weekend", 12),
    ];
    for (city, period, rows) in sizes {
        env.write_source(&format!("{city}_{period}s.csv"), &listings_csv(rows, true));
    }
    import_all(&env, ImportMode::SkipUnchanged);

    for state in [env.sqlite_state(), env.csv_state()] {
        for (city, period, rows) in sizes {
            let resp = get(&state, &format!("/api/data/{city}/{period}"));
            assert_eq!(resp.status(), 200, "{city}/{period}");
            let body = body_json(resp);
            assert_eq!(body.as_array().unwrap().len(), rows, "{city}/{period}");
        }
    }
}

#[test]
fn csv_store_missing_file_is_not_found() {
    let env = TestEnv::new();
    let state = env.csv_state();

    let resp = get(&state, "/api/data/paris/weekend");
    assert_eq!(resp.status(), 404);
    let body = body_json(resp);
    assert!(!body["error"].as_str().unwrap().is_empty());
}

#[test]
fn csv_store_reads_raw_files_without_ids() {
    let env = TestEnv::new();
    env.write_source("budapest_weekdays.csv", &listings_csv(2, false));
    let state = env.csv_state();

    let body = body_json(get(&state, "/api/data/budapest/weekday"));
    let records = body.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert!(records[0].get("id").is_none());
    assert_eq!(records[0]["cleanliness_rating"], Value::Null);
    assert_eq!(records[0]["room_type"], json!("Private room"));
}

#[test]
fn corrupt_csv_is_a_server_error() {
    let env = TestEnv::new();
    env.write_source("athens_weekends.csv", "lat,lng,realSum\n37.9,23.7,expensive\n");
    let state = env.csv_state();

    let resp = get(&state, "/api/data/athens/weekend");
    assert_eq!(resp.status(), 500);
    assert_eq!(body_json(resp), json!({ "error": "Internal server error" }));
}

#[test]
fn unreachable_database_is_a_server_error() {
    let env = TestEnv::new();
    // No import has run, so the database file does not exist.
    let state = env.sqlite_state();

    let resp = get(&state, "/api/data/london/weekday");
    assert_eq!(resp.status(), 500);
    let body = body_json(resp);
    let message = body["error"].as_str().unwrap();
    assert!(!message.contains("sqlite"), "leaked: {message}");
    assert!(!env.db_path.exists());
}

#[test]
fn only_get_is_allowed_on_data() {
    let env = TestEnv::new();
    let state = env.csv_state();

    let resp = send(&state, Method::POST, "/api/data/berlin/weekday");
    assert_eq!(resp.status(), 405);
    assert_eq!(
        resp.headers().get("Allow").and_then(|v| v.to_str().ok()),
        Some("GET")
    );
}

#[test]
fn unknown_api_routes_answer_json() {
    let env = TestEnv::new();
    let state = env.csv_state();

    for uri in [
        "/api/data/berlin",
        "/api/data/berlin/weekday/extra",
        "/api/listings",
    ] {
        let resp = get(&state, uri);
        assert_eq!(resp.status(), 404, "{uri}");
        assert!(content_type(&resp).starts_with("application/json"), "{uri}");
        assert!(body_json(resp)["error"].is_string());
    }
}

#[test]
fn partitions_lists_configured_sets() {
    let env = TestEnv::new();
    let state = env.csv_state();

    let body = body_json(get(&state, "/api/partitions"));
    assert_eq!(body["periods"], json!(["weekday", "weekend"]));
    assert_eq!(body["cities"].as_array().unwrap().len(), 10);
    assert_eq!(body["cities"][0], json!("amsterdam"));
}
