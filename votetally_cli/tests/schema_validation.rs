use serde_json::Value;
use std::path::{Path, PathBuf};
use votetally_lib::{summarize_dir, SummaryOptions};

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("CLI crate should be inside workspace")
        .to_path_buf()
}

fn fixtures_dir() -> PathBuf {
    workspace_root().join("votetally_lib/tests/fixtures")
}

fn load_schema(name: &str) -> Value {
    let path = workspace_root().join("schema").join(name);
    let text = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("read schema {}: {}", path.display(), e));
    serde_json::from_str(&text).expect("schema is valid JSON")
}

fn fixture_summary_json() -> (Value, Value) {
    let options = SummaryOptions::with_default_classifier().expect("default vote types");
    let summary = summarize_dir(&fixtures_dir(), &options).expect("fixtures summarize");
    (
        serde_json::to_value(&summary.legislators).unwrap(),
        serde_json::to_value(&summary.bills).unwrap(),
    )
}

// ---------------------------------------------------------------------------
// Positive validation: computed summaries conform to their schemas
// ---------------------------------------------------------------------------

#[test]
fn test_legislator_summary_conforms_to_schema() {
    let (legislators, _) = fixture_summary_json();
    let schema = load_schema("legislator_summary.schema.json");

    let validator = jsonschema::draft202012::new(&schema).expect("legislator schema compiles");
    if let Err(e) = validator.validate(&legislators) {
        panic!("legislator summary failed validation: {e}");
    }
}

#[test]
fn test_bill_summary_conforms_to_schema() {
    let (_, bills) = fixture_summary_json();
    let schema = load_schema("bill_summary.schema.json");

    let validator = jsonschema::draft202012::new(&schema).expect("bill schema compiles");
    if let Err(e) = validator.validate(&bills) {
        panic!("bill summary failed validation: {e}");
    }
}

// ---------------------------------------------------------------------------
// Negative validation: schemas reject drifted shapes
// ---------------------------------------------------------------------------

#[test]
fn test_legislator_schema_rejects_negative_counts() {
    let schema = load_schema("legislator_summary.schema.json");
    let validator = jsonschema::draft202012::new(&schema).expect("legislator schema compiles");
    let bad = serde_json::json!([{
        "id": 1,
        "name": "Alice",
        "num_supported_bills": -1,
        "num_opposed_bills": 0
    }]);
    assert!(!validator.is_valid(&bad));
}

#[test]
fn test_bill_schema_rejects_internal_field_names() {
    let schema = load_schema("bill_summary.schema.json");
    let validator = jsonschema::draft202012::new(&schema).expect("bill schema compiles");
    let bad = serde_json::json!([{
        "bill_id": 10,
        "bill_title": "Act A",
        "num_supporting": 1,
        "num_opposing": 0,
        "sponsor_name": "Alice"
    }]);
    assert!(!validator.is_valid(&bad));
}
