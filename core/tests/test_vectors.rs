//! Drive payload, endpoint, and uuid-extraction logic from JSON vectors
//! stored in `test-vectors/`.
//!
//! Payloads are compared as parsed JSON (not raw strings) so field ordering
//! cannot produce false negatives.

use healthchecksio_core::checks::uuid_from_ping_url;
use healthchecksio_core::{CheckRequest, ChecksQuery};

#[test]
fn create_payload_vectors() {
    let raw = include_str!("../../test-vectors/checks_create.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input: CheckRequest = serde_json::from_value(case["input"].clone()).unwrap();
        assert_eq!(input.payload(), case["expected_payload"], "{name}");
    }
}

#[test]
fn uuid_extraction_vectors() {
    let raw = include_str!("../../test-vectors/uuid_extraction.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let ping_url = case["ping_url"].as_str();
        let expected = case["expected"].as_str().unwrap();
        assert_eq!(uuid_from_ping_url(ping_url), expected, "{name}");
    }
}

#[test]
fn checks_info_endpoint_vectors() {
    let raw = include_str!("../../test-vectors/info_endpoints.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let query = ChecksQuery {
            tags: serde_json::from_value(case["tags"].clone()).unwrap(),
            uuid: serde_json::from_value(case["uuid"].clone()).unwrap(),
        };
        let expected = case["expected"].as_str().unwrap();
        assert_eq!(query.endpoint(), expected, "{name}");
    }
}
