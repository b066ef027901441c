use recordforge_core::{Error as RecordError, Record, Value};
use recordforge_generate::generators::{
    ConstantField, EmbedField, EnumField, FloatField, IntField, ListField, Placeholder, TextField,
    UuidField, UuidFormat,
};
use recordforge_generate::{Factory, FieldType, GenerationError};

fn person_factory(seed: u64) -> Factory {
    let address = Factory::builder()
        .field("id", UuidField::new(UuidFormat::Hex))
        .field(
            "city",
            EnumField::new(["Lisboa", "Porto", "Recife"]).expect("valid enum"),
        )
        .field("floor", IntField::new(Some(0), Some(30)).expect("valid int"))
        .build()
        .expect("valid address factory");

    Factory::builder()
        .seed(seed)
        .field("id", UuidField::default())
        .field("kind", ConstantField::new("person"))
        .field(
            "nickname",
            TextField::new(Some("abc"), Some(3), Some(8)).expect("valid text"),
        )
        .field("age", IntField::new(Some(18), Some(90)).expect("valid int"))
        .field(
            "score",
            FloatField::new(Some(2.0), Some(10.0)).expect("valid float"),
        )
        .field(
            "status",
            EnumField::new([Value::from("active"), Value::Int(8), Value::Null])
                .expect("valid enum"),
        )
        .field("notes", Placeholder)
        .field("address", EmbedField::new(address))
        .build()
        .expect("valid person factory")
}

fn boxed(field: impl FieldType + 'static) -> Box<dyn FieldType> {
    Box::new(field)
}

fn records(factory: &mut Factory, count: usize) -> Vec<Record> {
    factory
        .make_some(count)
        .collect::<Result<Vec<_>, _>>()
        .expect("generate records")
}

#[test]
fn make_some_yields_exactly_n_records() {
    let mut factory = person_factory(1);
    assert_eq!(records(&mut factory, 0).len(), 0);
    assert_eq!(records(&mut factory, 25).len(), 25);
    assert_eq!(factory.records_made(), 25);
}

#[test]
fn records_keep_declaration_order_and_skip_placeholders() {
    let mut factory = person_factory(2);
    let record = factory.make_one().expect("record");
    assert_eq!(
        record.keys().collect::<Vec<_>>(),
        vec!["id", "kind", "nickname", "age", "score", "status", "address"]
    );
    assert!(matches!(
        record.field("notes"),
        Err(RecordError::MissingField { .. })
    ));
}

#[test]
fn field_values_respect_their_configuration() {
    let mut factory = person_factory(3);
    for record in records(&mut factory, 100) {
        assert_eq!(record.field("kind").expect("kind"), &Value::from("person"));

        let nickname = record.field("nickname").expect("nickname").as_str();
        let nickname = nickname.expect("nickname text");
        assert!((3..=8).contains(&nickname.len()));
        assert!(nickname.chars().all(|c| "abc".contains(c)));

        let age = record.field("age").expect("age").as_i64().expect("age int");
        assert!((18..=90).contains(&age));

        let score = record.field("score").expect("score").as_f64();
        assert!((2.0..=10.0).contains(&score.expect("score float")));

        let status = record.field("status").expect("status");
        assert!(
            [Value::from("active"), Value::Int(8), Value::Null].contains(status),
            "unexpected status {status:?}"
        );

        let id = record.field("id").expect("id").as_str().expect("id text");
        assert_eq!(id.len(), 36);
    }
}

#[test]
fn embedded_records_are_complete_and_reachable_by_path() {
    let mut factory = person_factory(4);
    let record = factory.make_one().expect("record");

    let address = record.record("address").expect("address record");
    assert_eq!(address.len(), 3);
    let id = address.field("id").expect("id").as_str().expect("id text");
    assert_eq!(id.len(), 32);
    assert!(!id.contains('-'));

    let floor = record.path("address.floor").expect("floor");
    assert!(matches!(floor.as_i64(), Some(0..=30)));
    assert_eq!(
        record.path("address.city").expect("city"),
        address.field("city").expect("city")
    );
    assert!(record.path("address.street").is_err());
}

#[test]
fn factory_tracks_current_and_last_records() {
    let mut factory = person_factory(5);
    assert!(factory.current_record().is_none());
    assert!(factory.last_record().is_none());

    let first = factory.make_one().expect("first");
    assert_eq!(factory.current_record(), Some(&first));
    assert!(factory.last_record().is_none());

    let second = factory.make_one().expect("second");
    assert_eq!(factory.current_record(), Some(&second));
    assert_eq!(factory.last_record(), Some(&first));
}

#[test]
fn yielded_records_are_independent() {
    let mut factory = person_factory(6);
    let mut first = factory.make_one().expect("first");
    first.insert("kind", "robot");
    let second = factory.make_one().expect("second");
    assert_eq!(second.field("kind").expect("kind"), &Value::from("person"));
    assert_eq!(
        factory.last_record().and_then(|record| record.get("kind")),
        Some(&Value::from("person"))
    );
}

#[test]
fn seeded_factories_are_deterministic() {
    let a = records(&mut person_factory(42), 10);
    let b = records(&mut person_factory(42), 10);
    let c = records(&mut person_factory(43), 10);
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn uuid_formats_render_as_documented() {
    let mut factory = Factory::builder()
        .seed(7)
        .field("hyphenated", UuidField::new(UuidFormat::Hyphenated))
        .field("hex", UuidField::new(UuidFormat::Hex))
        .field("int", UuidField::new(UuidFormat::Int))
        .field("int_str", UuidField::new(UuidFormat::IntStr))
        .build()
        .expect("valid factory");

    for record in records(&mut factory, 20) {
        let hyphenated = record.field("hyphenated").expect("field");
        let hyphenated = hyphenated.as_str().expect("text");
        let groups: Vec<usize> = hyphenated.split('-').map(str::len).collect();
        assert_eq!(groups, vec![8, 4, 4, 4, 12]);

        let hex = record.field("hex").expect("field").as_str().expect("text");
        assert_eq!(hex.len(), 32);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));

        assert!(record.field("int").expect("field").as_u128().is_some());

        let int_str = record.field("int_str").expect("field");
        let int_str = int_str.as_str().expect("text");
        assert!(int_str.parse::<u128>().is_ok());
    }
}

#[test]
fn duplicate_field_names_are_rejected() {
    let result = Factory::builder()
        .field("id", UuidField::default())
        .field("id", IntField::default())
        .build();
    assert!(matches!(result, Err(GenerationError::InvalidConfig(_))));
}

#[test]
fn factory_accepts_boxed_field_list() {
    let fields: Vec<(&str, Box<dyn FieldType>)> = vec![
        ("a", Box::new(ConstantField::new(1)) as Box<dyn FieldType>),
        ("b", Box::new(Placeholder) as Box<dyn FieldType>),
    ];
    let mut factory = Factory::new(fields).expect("valid factory");
    let record = factory.make_one().expect("record");
    assert_eq!(record.field("a").expect("a"), &Value::Int(1));
    assert!(!record.contains_key("b"));
}

#[test]
fn deduplicating_list_reports_exhaustion() {
    let tags = ListField::new(
        vec![boxed(EnumField::new(["red", "green"]).expect("valid enum"))],
        Some(3),
        Some(3),
        false,
    )
    .expect("valid list");
    let mut factory = Factory::builder()
        .seed(9)
        .max_duplicate_draws(50)
        .field("tags", tags)
        .build()
        .expect("valid factory");

    let err = factory.make_one().expect_err("list cannot reach three values");
    assert_eq!(err.field_path().as_deref(), Some("tags"));
    assert!(matches!(
        err.root_cause(),
        GenerationError::ListExhausted {
            distinct: 2,
            target: 3,
            draws: 50
        }
    ));
}

#[test]
fn deduplicating_list_has_no_repeats() {
    let tags = ListField::new(
        vec![
            boxed(EnumField::new(["red", "green", "blue"]).expect("valid enum")),
            boxed(IntField::new(Some(0), Some(999)).expect("valid int")),
        ],
        Some(2),
        Some(6),
        false,
    )
    .expect("valid list");
    let mut factory = Factory::builder()
        .seed(10)
        .field("tags", tags)
        .build()
        .expect("valid factory");

    for record in records(&mut factory, 100) {
        let tags = record.field("tags").expect("tags").as_list().expect("list");
        assert!((2..=6).contains(&tags.len()));
        for (idx, tag) in tags.iter().enumerate() {
            assert!(!tags[idx + 1..].contains(tag));
        }
    }
}
