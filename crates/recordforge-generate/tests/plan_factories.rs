use std::fs;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Timelike};
use serde_json::{Value as JsonValue, json};

use recordforge_core::Value;
use recordforge_generate::{Factory, GenerationError};
use recordforge_plan::FactoryPlan;

fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../plans/examples/people.plan.json")
}

fn load_json(path: &Path) -> JsonValue {
    let contents =
        fs::read_to_string(path).unwrap_or_else(|_| panic!("missing json at {}", path.display()));
    serde_json::from_str(&contents).expect("parse json")
}

fn people_factory() -> Factory {
    Factory::from_plan_json(&load_json(&fixture_path())).expect("build factory")
}

#[test]
fn people_plan_builds_a_seeded_factory() {
    let factory = people_factory();
    assert_eq!(factory.options().seed, Some(42));
    assert_eq!(factory.options().max_duplicate_draws, 500);
    assert_eq!(factory.field_names().count(), 12);
}

#[test]
fn people_plan_records_match_their_fields() {
    let mut factory = people_factory();
    let start = NaiveDate::from_ymd_opt(1976, 7, 15)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .expect("valid date");

    for (idx, record) in factory.make_some(60).enumerate() {
        let record = record.expect("record");
        assert!(!record.contains_key("notes"));
        assert_eq!(record.len(), 11);

        assert_eq!(record.field("kind").expect("kind"), &Value::from("person"));
        let legacy = record.field("legacy_id").expect("legacy_id");
        assert!(legacy.as_str().expect("text").parse::<u128>().is_ok());

        let joined = record
            .field("joined")
            .expect("joined")
            .as_datetime()
            .expect("datetime");
        assert_eq!(joined.hour(), 0);
        if idx == 0 {
            assert_eq!(joined, start);
        }

        let tags = record.field("tags").expect("tags").as_list().expect("list");
        assert!((1..=4).contains(&tags.len()));

        let city = record.path("address.city").expect("city");
        assert!(["Lisboa", "Porto", "Recife"].contains(&city.as_str().expect("text")));
    }
}

#[test]
fn same_plan_generates_same_records() {
    let a: Vec<_> = people_factory()
        .make_some(5)
        .collect::<Result<_, _>>()
        .expect("records a");
    let b: Vec<_> = people_factory()
        .make_some(5)
        .collect::<Result<_, _>>()
        .expect("records b");
    assert_eq!(a, b);
}

#[test]
fn records_serialize_as_json_objects() {
    let mut factory = people_factory();
    let record = factory.make_one().expect("record");
    let json = serde_json::to_value(&record).expect("serialize record");
    let object = json.as_object().expect("object");
    assert_eq!(object.get("kind"), Some(&json!("person")));
    assert!(object.get("address").is_some_and(JsonValue::is_object));
    assert!(object.get("joined").is_some_and(JsonValue::is_string));
}

#[test]
fn invalid_plans_are_rejected_with_a_report() {
    let plan: FactoryPlan = serde_json::from_value(json!({
        "plan_version": "0.1",
        "fields": [
            {"name": "age", "generator": {"type": "int", "min": 9, "max": 1}},
            {"name": "age", "generator": {"type": "int"}}
        ]
    }))
    .expect("parse plan");

    let Err(GenerationError::InvalidPlan(report)) = Factory::from_plan(&plan) else {
        panic!("expected invalid plan");
    };
    assert!(report.has_code("invalid_bounds"));
    assert!(report.has_code("duplicate_field"));
}

#[test]
fn structurally_invalid_json_is_rejected() {
    let result = Factory::from_plan_json(&json!({
        "plan_version": "0.1",
        "fields": [{"name": "x", "generator": {"type": "sparkle"}}]
    }));
    let Err(GenerationError::InvalidPlan(report)) = result else {
        panic!("expected invalid plan");
    };
    assert!(report.has_code("schema_violation"));
}

#[test]
fn plan_path_loader_matches_json_loader() {
    let mut from_path = Factory::from_plan_path(&fixture_path()).expect("build from path");
    let mut from_json = people_factory();
    assert_eq!(
        from_path.make_one().expect("record"),
        from_json.make_one().expect("record")
    );
}

#[test]
fn exhausted_lists_surface_at_generation_time() {
    let plan: FactoryPlan = serde_json::from_value(json!({
        "plan_version": "0.1",
        "seed": 3,
        "options": {"max_duplicate_draws": 20},
        "fields": [
            {"name": "pair", "generator": {
                "type": "list",
                "content": [{"type": "int", "min": 1, "max": 9}],
                "min_len": 0,
                "max_len": 12
            }}
        ]
    }))
    .expect("parse plan");

    let mut factory = Factory::from_plan(&plan).expect("warnings only");
    let outcomes: Vec<_> = factory.make_some(50).collect();
    assert!(outcomes.iter().any(|outcome| matches!(
        outcome.as_ref().map_err(GenerationError::root_cause),
        Err(GenerationError::ListExhausted { .. })
    )));
}
