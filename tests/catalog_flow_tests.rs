use serde_json::json;
use std::io::Cursor;
use tcg_catalog::cache::{load_records, FileStore, KeyValueStore, SqliteStore};
use tcg_catalog::{
    CatalogConfig, CatalogListState, CatalogRecord, CatalogService, HttpTransport, ImageQuality,
    ItemDetailView, ListEvent,
};
use tempfile::TempDir;
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LIST_PATH: &str = "/v2/en/cards";

// Test fixtures

fn png(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([10, 120, 200, 255]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

fn sample_list(server: &MockServer) -> serde_json::Value {
    json!([
        {"id": "swsh3-136", "localId": "136", "name": "Furret",
         "image": format!("{}/assets/swsh3/136", server.uri())},
        {"id": "swsh3-135", "localId": "135", "name": "Sentret"},
        {"id": "base1-58", "localId": "58", "name": "Pikachu"}
    ])
}

fn furret_detail(server: &MockServer) -> serde_json::Value {
    json!({
        "id": "swsh3-136",
        "localId": "136",
        "name": "Furret",
        "illustrator": "tetsuya koizumi",
        "image": format!("{}/assets/swsh3/136", server.uri()),
        "rarity": "Uncommon",
        "set": {"id": "swsh3", "name": "Darkness Ablaze"},
        "hp": 110,
        "types": ["Colorless"],
        "evolveFrom": "Sentret",
        "stage": "Stage1",
        "attacks": [{"cost": ["Colorless"], "name": "Feelin' Fine", "damage": "30+"}],
        "weaknesses": [{"type": "Fighting", "value": "×2"}],
        "retreat": 1,
        "regulationMark": "D",
        "legal": {"standard": false, "expanded": true},
        "updated": "2024-06-17T00:15:21+02:00"
    })
}

async fn mount_list(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(LIST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

fn config(server: &MockServer) -> CatalogConfig {
    CatalogConfig::with_base_url(format!("{}{}", server.uri(), LIST_PATH))
}

fn service<S: KeyValueStore>(server: &MockServer, store: S) -> CatalogService<HttpTransport, S> {
    let config = config(server);
    let transport = HttpTransport::new(&config).unwrap();
    CatalogService::new(&config, transport, store).unwrap()
}

fn names(records: &[CatalogRecord]) -> Vec<&str> {
    records.iter().map(|r| r.name.as_str()).collect()
}

// Tests for the cache-first list

#[tokio::test]
async fn test_file_store_survives_restart_and_refreshes() {
    let server = MockServer::start().await;
    mount_list(&server, sample_list(&server)).await;
    let dir = TempDir::new().unwrap();

    // First run: nothing cached, list comes from the network
    let first = service(&server, FileStore::new(dir.path()));
    let records = assert_ok!(first.get_catalog_list().await);
    assert_eq!(names(&records), vec!["Furret", "Sentret", "Pikachu"]);
    drop(first);

    // Upstream changes between runs
    server.reset().await;
    mount_list(
        &server,
        json!([{"id": "base1-58", "localId": "58", "name": "Pikachu"}]),
    )
    .await;

    // Second run: the previous snapshot is served, then replaced in the background
    let second = service(&server, FileStore::new(dir.path()));
    let records = assert_ok!(second.get_catalog_list().await);
    assert_eq!(records.len(), 3);

    second.finish_refresh().await;
    let persisted = load_records(&FileStore::new(dir.path()), "cachedCardItems").unwrap();
    assert_eq!(names(&persisted), vec!["Pikachu"]);
}

#[tokio::test]
async fn test_sqlite_store_serves_cached_list_when_offline() {
    let server = MockServer::start().await;
    mount_list(&server, sample_list(&server)).await;
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("catalog.db");

    let online = service(&server, SqliteStore::open(&db_path).unwrap());
    assert_ok!(online.get_catalog_list().await);
    drop(online);

    // Server now failing: the cached list is still returned
    server.reset().await;
    Mock::given(method("GET"))
        .and(path(LIST_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let offline = service(&server, SqliteStore::open(&db_path).unwrap());
    let records = assert_ok!(offline.get_catalog_list().await);
    assert_eq!(names(&records), vec!["Furret", "Sentret", "Pikachu"]);

    offline.finish_refresh().await;
    let records = assert_ok!(offline.get_catalog_list().await);
    assert_eq!(records.len(), 3);
}

#[tokio::test]
async fn test_cold_start_failure_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(LIST_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let dir = TempDir::new().unwrap();

    let service = service(&server, FileStore::new(dir.path()));
    let err = assert_err!(service.get_catalog_list().await);

    assert!(!err.is_not_found());
    assert!(!dir.path().join("cachedCardItems.json").exists());
}

// Tests for list state driven by the service

#[tokio::test]
async fn test_list_state_search_over_fetched_records() {
    let server = MockServer::start().await;
    mount_list(&server, sample_list(&server)).await;
    let dir = TempDir::new().unwrap();
    let service = service(&server, FileStore::new(dir.path()));

    let (mut state, mut events) = CatalogListState::new();
    assert_ok!(state.refresh(&service).await);
    assert_eq!(events.changed().await, Some(ListEvent::DataChanged));
    assert_eq!(state.item_count(), 3);

    state.search("RET");
    assert_eq!(names(state.displayed()), vec!["Furret", "Sentret"]);
    assert_eq!(state.selected_id(1), Some("swsh3-135"));
    assert!(state.record_at(2).is_none());

    state.search("mew");
    assert!(state.view().empty_message.is_some());
}

// Tests for detail and images

#[tokio::test]
async fn test_detail_view_and_images() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/en/cards/swsh3-136"))
        .respond_with(ResponseTemplate::new(200).set_body_json(furret_detail(&server)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/assets/swsh3/136/high.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(png(8, 11)))
        .expect(1)
        .mount(&server)
        .await;
    let dir = TempDir::new().unwrap();
    let service = service(&server, FileStore::new(dir.path()));

    let detail = assert_ok!(service.get_item_detail("swsh3-136").await);
    let view = ItemDetailView::new(&detail);
    assert_eq!(view.hp(), "110 HP");
    assert_eq!(view.evolve_from(), "Evolves from: Sentret");
    assert_eq!(view.attacks()[0].damage, "??");
    assert_eq!(view.last_updated(), "Last updated on 17 Jun 2024");
    assert_eq!(
        view.image_url(service.endpoints()).unwrap().as_str(),
        format!("{}/assets/swsh3/136/high.png", server.uri())
    );

    // Second request is served from memory; the mock expects a single hit
    for _ in 0..2 {
        let blob = assert_ok!(
            service
                .image_for(detail.image.as_deref(), ImageQuality::High)
                .await
        )
        .unwrap();
        assert_eq!((blob.width, blob.height), (8, 11));
    }

    let stats = service.image_cache_stats();
    assert_eq!((stats.hits, stats.misses), (1, 1));
}

#[tokio::test]
async fn test_missing_detail_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/en/cards/nope"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let dir = TempDir::new().unwrap();
    let service = service(&server, FileStore::new(dir.path()));

    let err = assert_err!(service.get_item_detail("nope").await);
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_thumbnail_failure_yields_none() {
    let server = MockServer::start().await;
    mount_list(&server, sample_list(&server)).await;
    Mock::given(method("GET"))
        .and(path("/assets/swsh3/136/low.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes("not an image"))
        .mount(&server)
        .await;
    let dir = TempDir::new().unwrap();
    let service = service(&server, FileStore::new(dir.path()));

    let records = assert_ok!(service.get_catalog_list().await);
    assert!(service.thumbnail(&records[0]).await.is_none());
    // No image base at all
    assert!(service.thumbnail(&records[1]).await.is_none());
    assert_eq!(service.image_cache_stats().entries, 0);
}
