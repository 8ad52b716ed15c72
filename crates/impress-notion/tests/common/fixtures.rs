//! Test fixture loading utilities

use std::path::PathBuf;

use impress_notion::{QueryResponse, RawPage};

/// Get the path to a fixture file
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test_fixtures")
        .join(name)
}

/// Load a fixture file as a string
pub fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name))
        .unwrap_or_else(|_| panic!("Failed to load fixture: {}", name))
}

/// Load a mock API response fixture
pub fn load_response_fixture(name: &str) -> String {
    load_fixture(&format!("responses/{}", name))
}

#[allow(dead_code)]
pub fn load_page(name: &str) -> RawPage {
    serde_json::from_str(&load_response_fixture(name))
        .unwrap_or_else(|e| panic!("Invalid page fixture {}: {}", name, e))
}

#[allow(dead_code)]
pub fn load_query(name: &str) -> QueryResponse {
    serde_json::from_str(&load_response_fixture(name))
        .unwrap_or_else(|e| panic!("Invalid query fixture {}: {}", name, e))
}
