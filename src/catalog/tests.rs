use super::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_catalog(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("should create temp file");
    file.write_all(content.as_bytes())
        .expect("should write catalog");
    file
}

#[test]
fn load_full_records() {
    let file = write_catalog(
        r#"[
            {
                "city": "Cairo",
                "name": "Egyptian Museum",
                "type": "museum",
                "description": "Vast collection of pharaonic antiquities",
                "best_time": "morning",
                "avg_cost_egp": 250,
                "tags": ["history", "museum"]
            }
        ]"#,
    );

    let records = load_catalog(file.path()).expect("should load catalog");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].city, "Cairo");
    assert_eq!(records[0].kind, "museum");
    assert_eq!(records[0].avg_cost_egp, 250.0);
    assert_eq!(records[0].tags, vec!["history", "museum"]);
}

#[test]
fn missing_cost_and_tags_default() {
    let file = write_catalog(
        r#"[
            {
                "city": "Alexandria",
                "name": "Qaitbay Citadel",
                "type": "landmark",
                "description": "15th century fortress on the Mediterranean",
                "best_time": "afternoon"
            }
        ]"#,
    );

    let records = load_catalog(file.path()).expect("should load catalog");
    assert_eq!(records[0].avg_cost_egp, 0.0);
    assert!(records[0].tags.is_empty());
}

#[test]
fn missing_required_field_is_catalog_error() {
    let file = write_catalog(
        r#"[{"city": "Cairo", "name": "Khan el-Khalili", "type": "market", "description": "Historic bazaar"}]"#,
    );

    let err = load_catalog(file.path()).expect_err("missing best_time should fail");
    assert!(matches!(err, crate::PlannerError::CatalogLoad(_)));
}

#[test]
fn unreadable_source_is_catalog_error() {
    let err = load_catalog("/nonexistent/places.json").expect_err("missing file should fail");
    assert!(matches!(err, crate::PlannerError::CatalogLoad(_)));
}

#[test]
fn malformed_json_is_catalog_error() {
    let file = write_catalog("not json at all");
    let err = load_catalog(file.path()).expect_err("garbage should fail");
    assert!(matches!(err, crate::PlannerError::CatalogLoad(_)));
}

#[test]
fn index_text_concatenation() {
    let record = PlaceRecord {
        city: "Cairo".to_string(),
        name: "Giza Pyramids".to_string(),
        kind: "landmark".to_string(),
        description: "Ancient wonder on the plateau".to_string(),
        best_time: "morning".to_string(),
        avg_cost_egp: 800.0,
        tags: vec!["history".to_string()],
    };

    assert_eq!(
        record.index_text(),
        "Cairo - Giza Pyramids - landmark - Ancient wonder on the plateau"
    );
}
