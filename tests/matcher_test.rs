// Integration tests for Vismatch - catalog loading through ranked results

use std::fs;
use std::path::PathBuf;

use vismatch::catalog::Catalog;
use vismatch::matcher::Matcher;

fn write_temp_catalog(name: &str, content: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("vismatch-test-{}", std::process::id()));
    fs::create_dir_all(&dir).expect("Failed to create temp dir");
    let path = dir.join(name);
    fs::write(&path, content).expect("Failed to write catalog");
    path
}

#[test]
fn test_search_pipeline_from_json_catalog() {
    let path = write_temp_catalog(
        "catalog.json",
        r#"[
            {"id": 1, "name": "Blue jacket", "category": "outerwear",
             "image_url": "https://example.com/1.jpg", "embedding": [0.0, 1.0]},
            {"id": 2, "name": "Red jacket", "category": "outerwear",
             "image_url": "https://example.com/2.jpg", "embedding": "[1.0, 0.0]"},
            {"id": 3, "name": "Broken row", "category": "outerwear",
             "image_url": null, "embedding": "not json"},
            {"id": 4, "name": "No embedding", "category": null, "image_url": null}
        ]"#,
    );

    let catalog = Catalog::load(&path).expect("Catalog should load");
    assert_eq!(catalog.len(), 4);

    let matcher = Matcher::new(catalog);
    assert_eq!(matcher.candidate_count(), 2);
    assert_eq!(matcher.skipped_records(), 2);

    // Query points at the "Red jacket" direction; magnitude is irrelevant.
    let matches = matcher.find_similar(&[5.0, 0.0], 10).expect("Search should succeed");

    // Oversized top clamps to the two usable candidates.
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].id, 2);
    assert_eq!(matches[0].name.as_deref(), Some("Red jacket"));
    assert!((matches[0].similarity - 1.0).abs() < 1e-5);
    assert_eq!(matches[1].id, 1);
    assert!(matches[1].similarity < matches[0].similarity);
}

#[test]
fn test_msgpack_catalog_round_trip() {
    let records = r#"[
        {"id": 1, "name": "Tote bag", "category": "bags",
         "image_url": null, "embedding": [0.6, 0.8]}
    ]"#;
    let catalog: Catalog = Catalog::new(serde_json::from_str(records).unwrap());

    let bytes = rmp_serde::to_vec(&catalog).expect("Failed to serialize catalog");
    let path = write_temp_catalog("catalog.msgpack", "");
    fs::write(&path, bytes).expect("Failed to write msgpack catalog");

    let loaded = Catalog::load(&path).expect("MessagePack catalog should load");
    assert_eq!(loaded.len(), 1);

    let matcher = Matcher::new(loaded);
    let matches = matcher.find_similar(&[0.6, 0.8], 1).expect("Search should succeed");
    assert_eq!(matches[0].id, 1);
    assert!((matches[0].similarity - 1.0).abs() < 1e-5);
}

#[test]
fn test_unsupported_extension_is_rejected() {
    let path = write_temp_catalog("catalog.csv", "id,name\n1,thing\n");
    let err = Catalog::load(&path).unwrap_err();
    assert!(err.to_string().contains("Unsupported catalog format"));
}
