//! Router-level tests against an in-memory SQLite store.

use std::sync::Arc;

use axum::{
  body::Body,
  http::{Request, StatusCode, header},
};
use chrono::{Duration, Utc};
use nakama_core::{
  CollectionMapper, Entity,
  model::Profile,
  store::{DocumentStore, Filter, Projection},
  timestamp,
};
use nakama_store_sqlite::SqliteStore;
use serde_json::{Value, json};
use tower::ServiceExt as _;

use crate::api_router;

async fn mapper() -> CollectionMapper<SqliteStore> {
  let store = SqliteStore::open_in_memory().await.unwrap();
  CollectionMapper::new(Arc::new(store))
}

async fn send(
  mapper: &CollectionMapper<SqliteStore>,
  method: &str,
  uri: &str,
  body: Option<Value>,
) -> (StatusCode, Value) {
  let builder = Request::builder().method(method).uri(uri);
  let req = match body {
    Some(body) => builder
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from(body.to_string())),
    None => builder.body(Body::empty()),
  }
  .unwrap();

  let resp = api_router(mapper.clone()).oneshot(req).await.unwrap();
  let status = resp.status();
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  // Extractor rejections answer in plain text.
  let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
  (status, json)
}

async fn profile(mapper: &CollectionMapper<SqliteStore>, username: &str) -> Profile {
  let rows = mapper
    .query(Entity::Profile, &Filter::eq("username", username), &Projection::All)
    .await
    .unwrap();
  Profile::from_document(rows.into_iter().next().expect("profile exists")).unwrap()
}

async fn seed_profile(mapper: &CollectionMapper<SqliteStore>, username: &str, active: Option<String>) {
  let (status, _) = send(
    mapper,
    "POST",
    "/nakama",
    Some(json!({ "username": username, "last_active_ts": active })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
}

// ── Ping ──────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn ping_pongs() {
  let m = mapper().await;
  let (status, body) = send(&m, "GET", "/ping", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body, json!({ "pong": true }));
}

// ── Create profile ────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_profile_stores_defaults() {
  let m = mapper().await;
  let (status, body) = send(&m, "POST", "/nakama", Some(json!({ "username": "luffy" }))).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["ok"], true);
  assert!(!body["id"].as_str().unwrap().is_empty());

  let rows = m
    .query(Entity::Profile, &Filter::eq("username", "luffy"), &Projection::All)
    .await
    .unwrap();
  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0]["rank"], "Rookie");
  assert_eq!(rows[0]["belly"], 0);
  assert_eq!(rows[0]["nakamas"], 0);
  assert_eq!(rows[0]["_id"], body["id"]);
}

#[tokio::test]
async fn duplicate_handles_are_accepted() {
  let m = mapper().await;
  let (_, first) = send(&m, "POST", "/nakama", Some(json!({ "username": "luffy" }))).await;
  let (status, second) = send(&m, "POST", "/nakama", Some(json!({ "username": "luffy" }))).await;
  assert_eq!(status, StatusCode::OK);
  assert_ne!(first["id"], second["id"]);

  let rows = m
    .query(Entity::Profile, &Filter::eq("username", "luffy"), &Projection::All)
    .await
    .unwrap();
  assert_eq!(rows.len(), 2);
}

#[tokio::test]
async fn invalid_profile_is_rejected_before_storage() {
  let m = mapper().await;
  let (status, body) = send(
    &m,
    "POST",
    "/nakama",
    Some(json!({ "username": "buggy", "belly": -10 })),
  )
  .await;
  assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
  assert!(body["detail"].as_str().unwrap().contains("belly"));
  assert!(m.handle().unwrap().collection_names().await.unwrap().is_empty());

  // Validation runs even when there is nowhere to store the record.
  let offline = CollectionMapper::<SqliteStore>::unavailable();
  let (status, _) = send(&offline, "POST", "/nakama", Some(json!({ "rank": "Yonko" }))).await;
  assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn create_profile_without_store_is_500() {
  let offline = CollectionMapper::<SqliteStore>::unavailable();
  let (status, body) =
    send(&offline, "POST", "/nakama", Some(json!({ "username": "luffy" }))).await;
  assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
  assert_eq!(body["detail"], "Database not configured");
}

// ── i18n ──────────────────────────────────────────────────────────────────────

async fn seed_strings(m: &CollectionMapper<SqliteStore>) {
  for (id, es, en, ja) in [("greet", "hola", "hello", "こんにちは"), ("bye", "adiós", "bye", "さようなら")] {
    let (status, _) = send(
      m,
      "POST",
      "/collections/ecos_globales",
      Some(json!({ "string_id": id, "eco_es": es, "eco_en": en, "eco_ja": ja })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
  }
}

#[tokio::test]
async fn i18n_defaults_to_spanish() {
  let m = mapper().await;
  seed_strings(&m).await;
  let (status, body) = send(&m, "GET", "/i18n", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(
    body,
    json!({ "lang": "ES", "strings": { "greet": "hola", "bye": "adiós" } })
  );
}

#[tokio::test]
async fn i18n_codes_are_case_insensitive() {
  let m = mapper().await;
  seed_strings(&m).await;
  let (status, body) = send(&m, "GET", "/i18n?lang=ja", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["lang"], "JA");
  assert_eq!(body["strings"]["greet"], "こんにちは");

  let (_, body) = send(&m, "GET", "/i18n?lang=En", None).await;
  assert_eq!(body["strings"]["bye"], "bye");
}

#[tokio::test]
async fn i18n_missing_text_is_empty_string() {
  let m = mapper().await;
  // Written directly to the store, bypassing validation.
  let partial = json!({ "string_id": "legacy", "eco_es": "viejo" });
  m.handle()
    .unwrap()
    .insert("ecos_globales", partial.as_object().unwrap().clone())
    .await
    .unwrap();

  let (status, body) = send(&m, "GET", "/i18n?lang=EN", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["strings"], json!({ "legacy": "" }));
}

#[tokio::test]
async fn i18n_rejects_other_languages() {
  let m = mapper().await;
  for code in ["FR", "de", "esp", "zh", "%20es", "es%20", "%20EN%20"] {
    let (status, body) = send(&m, "GET", &format!("/i18n?lang={code}"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{code}");
    assert_eq!(body["detail"], "Unsupported language");
  }
}

#[tokio::test]
async fn i18n_without_store_is_500() {
  let offline = CollectionMapper::<SqliteStore>::unavailable();
  let (status, _) = send(&offline, "GET", "/i18n?lang=EN", None).await;
  assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
  let (status, _) = send(&offline, "GET", "/i18n?lang=FR", None).await;
  assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

// ── Heartbeat ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn heartbeat_unknown_handle_is_404() {
  let m = mapper().await;
  let (status, body) = send(&m, "POST", "/reward/heartbeat?username=ghost", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body["detail"], "Nakama not found");
}

#[tokio::test]
async fn heartbeat_refreshes_last_activity() {
  let m = mapper().await;
  let stale = timestamp::encode(Utc::now() - Duration::hours(3));
  seed_profile(&m, "nami", Some(stale)).await;

  let before = Utc::now();
  let (status, body) = send(&m, "POST", "/reward/heartbeat?username=nami", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body, json!({ "ok": true }));

  let nami = profile(&m, "nami").await;
  assert!(nami.last_active_ts.unwrap() >= before);
}

#[tokio::test]
async fn heartbeat_requires_username() {
  let m = mapper().await;
  let (status, _) = send(&m, "POST", "/reward/heartbeat", None).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ── Tick ──────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn tick_credits_only_recently_active_profiles() {
  let m = mapper().await;
  seed_profile(&m, "recent", Some(timestamp::now())).await;
  seed_profile(&m, "stale", Some(timestamp::encode(Utc::now() - Duration::hours(1)))).await;
  seed_profile(&m, "never", None).await;

  let (status, body) =
    send(&m, "POST", "/reward/tick?minutes=10&belly_per_active=5", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body, json!({ "ok": true, "rewarded": 1, "belly": 5 }));

  assert_eq!(profile(&m, "recent").await.belly, 5);
  assert_eq!(profile(&m, "stale").await.belly, 0);
  assert_eq!(profile(&m, "never").await.belly, 0);

  // Overlapping windows credit again.
  let (_, body) = send(&m, "POST", "/reward/tick?minutes=10&belly_per_active=5", None).await;
  assert_eq!(body["rewarded"], 1);
  assert_eq!(profile(&m, "recent").await.belly, 10);
  assert_eq!(profile(&m, "stale").await.belly, 0);
}

#[tokio::test]
async fn tick_uses_default_window_and_credit() {
  let m = mapper().await;
  seed_profile(&m, "zoro", Some(timestamp::encode(Utc::now() - Duration::minutes(5)))).await;

  let (status, body) = send(&m, "POST", "/reward/tick", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["belly"], 5);
  assert_eq!(body["rewarded"], 1);
  assert_eq!(profile(&m, "zoro").await.belly, 5);
}

#[tokio::test]
async fn tick_skips_balances_that_would_overflow() {
  let m = mapper().await;
  seed_profile(&m, "zoro", Some(timestamp::now())).await;
  let (status, _) = send(
    &m,
    "POST",
    "/nakama",
    Some(json!({
      "username": "buggy",
      "belly": i64::MAX - 1,
      "last_active_ts": timestamp::now(),
    })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);

  let (status, body) = send(&m, "POST", "/reward/tick?belly_per_active=5", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["rewarded"], 1);

  assert_eq!(profile(&m, "zoro").await.belly, 5);
  assert_eq!(profile(&m, "buggy").await.belly, (i64::MAX - 1) as u64);
}

#[tokio::test]
async fn tick_rejects_negative_credit() {
  let m = mapper().await;
  let (status, _) = send(&m, "POST", "/reward/tick?belly_per_active=-5", None).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn reward_routes_without_store_are_500() {
  let offline = CollectionMapper::<SqliteStore>::unavailable();
  let (status, _) = send(&offline, "POST", "/reward/heartbeat?username=luffy", None).await;
  assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
  let (status, _) = send(&offline, "POST", "/reward/tick", None).await;
  assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

// ── Collections ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn collections_create_and_list() {
  let m = mapper().await;
  let (status, created) = send(
    &m,
    "POST",
    "/collections/cancion",
    Some(json!({ "title": "Binks' Sake", "audio_file_url": "https://example.com/binks.mp3" })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(created["ok"], true);

  let (status, listed) = send(&m, "GET", "/collections/cancion", None).await;
  assert_eq!(status, StatusCode::OK);
  let listed = listed.as_array().unwrap();
  assert_eq!(listed.len(), 1);
  assert_eq!(listed[0]["_id"], created["id"]);
  assert_eq!(listed[0]["artist"], Value::Null);
}

#[tokio::test]
async fn collections_list_honours_limit() {
  let m = mapper().await;
  for n in 0..3 {
    send(&m, "POST", "/collections/logro", Some(json!({ "name": format!("badge {n}") }))).await;
  }
  let (_, listed) = send(&m, "GET", "/collections/logro?limit=2", None).await;
  assert_eq!(listed.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn collections_validate_closed_sets() {
  let m = mapper().await;
  let (status, body) = send(
    &m,
    "POST",
    "/collections/pacto_contrato",
    Some(json!({ "title": "t", "party_a": "a", "party_b": "b", "status": "signed" })),
  )
  .await;
  assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
  assert!(body["detail"].as_str().unwrap().contains("status"));
}

#[tokio::test]
async fn unknown_collection_is_404() {
  let m = mapper().await;
  let (status, _) = send(&m, "GET", "/collections/users", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  let (status, _) = send(&m, "POST", "/collections/users", Some(json!({}))).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}
