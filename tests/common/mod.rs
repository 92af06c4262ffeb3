#![allow(dead_code)]

use axum::Router;
use axum_test::TestServer;
use serde_json::{Value, json};
use shortlink::api::routes::routes;
use shortlink::application::services::LinkService;
use shortlink::infrastructure::persistence::MemoryLinkRepository;
use shortlink::state::AppState;
use shortlink::utils::alias_generator::RandomAliasGenerator;
use std::sync::Arc;

pub const BASE_URL: &str = "http://sho.rt/";

pub fn create_test_service() -> Arc<LinkService> {
    Arc::new(LinkService::new(
        Arc::new(MemoryLinkRepository::new()),
        Arc::new(RandomAliasGenerator::from_seed(42)),
    ))
}

pub fn create_test_state() -> AppState {
    AppState::new(create_test_service(), BASE_URL)
}

pub fn create_app(state: AppState) -> Router {
    routes().with_state(state)
}

pub fn create_test_server() -> TestServer {
    TestServer::new(create_app(create_test_state())).unwrap()
}

/// Shortens `url` and returns the alias taken from the response's `shortUrl`.
pub async fn shorten(server: &TestServer, url: &str, custom_alias: Option<&str>) -> String {
    let response = server
        .post("/shorten")
        .json(&json!({ "fullUrl": url, "customAlias": custom_alias }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);

    let body = response.json::<Value>();
    let short_url = body["shortUrl"].as_str().unwrap();
    short_url.strip_prefix(BASE_URL).unwrap().to_string()
}
