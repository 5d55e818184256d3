mod common;

use common::{page, project, MockGitlab, TestEnv};
use jsonschema::JSONSchema;
use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;

fn load_schema(name: &str) -> Value {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let raw = fs::read_to_string(root.join("docs/contracts").join(name)).unwrap();
    serde_json::from_str(&raw).unwrap()
}

fn validate(schema_name: &str, data: &Value) {
    let schema = load_schema(schema_name);
    let validator = JSONSchema::compile(&schema).expect("compile schema");
    let msgs: Vec<String> = match validator.validate(data) {
        Ok(()) => return,
        Err(errors) => errors.map(|e| e.to_string()).collect(),
    };
    panic!("schema validation failed: {}", msgs.join(" | "));
}

#[test]
fn contracts_check() {
    let env = TestEnv::new(
        "general:\n  exclude: [archive/]\nquery:\n  visibility: private\n  mergeRequestsEnabled: true\n",
    );
    let server = MockGitlab::start(vec![page(
        vec![
            project("g/a", json!({"visibility": "private", "mergeRequestsEnabled": true})),
            project("g/b", json!({"visibility": "public"})),
            project("archive/c", json!({})),
        ],
        None,
        false,
    )]);

    let report = env.run_json(&server.url, &["check"]);
    assert_eq!(report["ok"], true);
    validate("audit-report.schema.json", &report["data"]);
    assert_eq!(
        report["data"]["incorrect"][0]["mismatches"],
        json!([
            "Setting 'visibility' is 'public', expected 'private'",
            "Setting 'mergeRequestsEnabled' is 'null', expected 'true'"
        ])
    );
}
