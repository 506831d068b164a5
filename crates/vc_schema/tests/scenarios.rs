//! End-to-end behavior of the JSON and binary codecs on registered types.

use std::collections::{BTreeMap, HashMap};

use vc_schema::binary::BinaryFormatter;
use vc_schema::derive::{Enumeration, Schema};
use vc_schema::format::ReadError;
use vc_schema::lexical::lexical_cast;
use vc_schema::{deserialize, deserialize_with, serialize, serialize_pretty, serialize_with};

#[derive(Schema, Default, Debug, Clone, PartialEq)]
struct BaseObject {
    data: f64,
    integer: i32,
}

#[derive(Schema, Default, Debug, Clone, PartialEq)]
struct DerivedObject {
    #[schema(parent)]
    base: BaseObject,
    floating: f32,
    string: String,
}

#[derive(Schema, Default, Debug, Clone, PartialEq)]
struct MoreDerivedObject {
    #[schema(parent)]
    derived: DerivedObject,
    flag: bool,
}

#[derive(Schema, Default, Debug, Clone, PartialEq)]
struct Tagged {
    tag: u8,
}

#[derive(Schema, Default, Debug, Clone, PartialEq)]
struct TwoParents {
    #[schema(parent)]
    base: BaseObject,
    #[schema(parent)]
    tagged: Tagged,
    note: String,
}

#[derive(Schema, Default, Debug, Clone, PartialEq)]
struct Marker {
    #[schema(parent)]
    base: BaseObject,
}

#[derive(Enumeration, Default, Debug, Clone, Copy, PartialEq)]
#[repr(i16)]
enum Level {
    Low = -1,
    #[default]
    Mid = 0,
    High = 7,
}

#[derive(Schema, Default, Debug, Clone, PartialEq)]
struct Inventory {
    owner: Option<Box<BaseObject>>,
    level: Level,
    window: [u16; 3],
    history: Vec<Option<i64>>,
    counts: BTreeMap<String, u32>,
    lookup: HashMap<String, Vec<Tagged>>,
    #[schema(rename = "self-check")]
    check: bool,
    #[schema(skip)]
    cache: usize,
}

fn inventory() -> Inventory {
    Inventory {
        owner: Some(Box::new(BaseObject {
            data: -2.5,
            integer: 40,
        })),
        level: Level::High,
        window: [1, 2, 3],
        history: vec![Some(-9), None, Some(i64::MAX)],
        counts: BTreeMap::from([(String::from("a"), 1), (String::from("b"), 2)]),
        lookup: HashMap::from([(String::from("key"), vec![Tagged { tag: 5 }])]),
        check: true,
        cache: 0,
    }
}

#[test]
fn base_object_compact() {
    let value = BaseObject {
        data: 0.35,
        integer: 12,
    };
    let text = serialize(&value).unwrap();
    assert_eq!(text, r#"{"data":0.35,"integer":12}"#);
    assert_eq!(deserialize::<BaseObject>(&text).unwrap(), value);
}

#[test]
fn base_object_pretty_with_tabs() {
    let value = BaseObject {
        data: 10.5,
        integer: -15,
    };
    assert_eq!(
        serialize_pretty(&value, "\t").unwrap(),
        "{\n\t\"data\": 10.5,\n\t\"integer\": -15\n}"
    );
}

#[test]
fn derived_object_reads_members_in_any_order() {
    let text = r#"{"integer":-15,"data":10.5,"floating":0.25}"#;
    let value: DerivedObject = deserialize(text).unwrap();
    assert_eq!(
        value,
        DerivedObject {
            base: BaseObject {
                data: 10.5,
                integer: -15
            },
            floating: 0.25,
            string: String::new(),
        }
    );
}

#[test]
fn hand_written_json_with_whitespace() {
    let text = "{\n  \"string\" : \"two words\",\n  \"floating\": 1.5,\n  \"integer\": 3,\n  \"data\": 0.5\n}";
    let value: DerivedObject = deserialize(text).unwrap();
    assert_eq!(value.string, "two words");
    assert_eq!(value.floating, 1.5);
    assert_eq!(value.base.integer, 3);
}

#[test]
fn parent_members_come_first_and_flat() {
    let value = MoreDerivedObject {
        derived: DerivedObject {
            base: BaseObject {
                data: 1.0,
                integer: 2,
            },
            floating: 3.0,
            string: String::from("s"),
        },
        flag: true,
    };
    assert_eq!(
        serialize(&value).unwrap(),
        r#"{"data":1,"integer":2,"floating":3,"string":"s","flag":true}"#
    );

    let value = TwoParents {
        base: BaseObject {
            data: 0.5,
            integer: 1,
        },
        tagged: Tagged { tag: 9 },
        note: String::from("n"),
    };
    let text = serialize(&value).unwrap();
    assert_eq!(text, r#"{"data":0.5,"integer":1,"tag":9,"note":"n"}"#);
    assert_eq!(deserialize::<TwoParents>(&text).unwrap(), value);
}

#[test]
fn derived_type_without_own_fields() {
    let value = Marker {
        base: BaseObject {
            data: 4.0,
            integer: 4,
        },
    };
    let text = serialize(&value).unwrap();
    assert_eq!(text, r#"{"data":4,"integer":4}"#);
    assert_eq!(deserialize::<Marker>(&text).unwrap(), value);

    let pretty = serialize_pretty(&value, "  ").unwrap();
    assert_eq!(pretty, "{\n  \"data\": 4,\n  \"integer\": 4\n}");
}

#[test]
fn pretty_and_compact_read_back_equal() {
    let value = inventory();
    let compact = serialize(&value).unwrap();
    let pretty = serialize_pretty(&value, "    ").unwrap();
    let from_compact: Inventory = deserialize(&compact).unwrap();
    let from_pretty: Inventory = deserialize(&pretty).unwrap();
    assert_eq!(from_compact, from_pretty);
    assert_eq!(from_compact, value);
}

#[test]
fn emitted_json_is_well_formed() {
    let value = inventory();
    for text in [
        serialize(&value).unwrap(),
        serialize_pretty(&value, "\t").unwrap(),
    ] {
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["level"], 7);
        assert_eq!(parsed["owner"]["integer"], 40);
        assert_eq!(parsed["history"][1], serde_json::Value::Null);
        assert_eq!(parsed["lookup"]["key"][0]["tag"], 5);
        assert_eq!(parsed["self-check"], true);
        assert!(parsed.get("cache").is_none());
    }
}

#[test]
fn absent_optionals_are_null() {
    let value = Inventory {
        owner: None,
        history: vec![None],
        ..inventory()
    };
    let text = serialize(&value).unwrap();
    assert!(text.starts_with(r#"{"owner":null,"#));
    assert!(text.contains(r#""history":[null]"#));

    let back: Inventory = deserialize(&text).unwrap();
    assert!(back.owner.is_none());
    assert_eq!(back.history, vec![None]);
}

#[test]
fn skipped_fields_keep_their_default() {
    let value = Inventory {
        cache: 99,
        ..inventory()
    };
    let back: Inventory = deserialize(&serialize(&value).unwrap()).unwrap();
    assert_eq!(back.cache, 0);
}

#[test]
fn unknown_enum_discriminant_fails() {
    let mut text = serialize(&inventory()).unwrap();
    text = text.replace(r#""level":7"#, r#""level":3"#);
    assert!(matches!(
        deserialize::<Inventory>(&text),
        Err(ReadError::InvalidEnum { .. })
    ));
}

#[test]
fn fixed_array_length_must_match() {
    let text = serialize(&inventory())
        .unwrap()
        .replace("[1,2,3]", "[1,2]");
    assert_eq!(
        deserialize::<Inventory>(&text).unwrap_err(),
        ReadError::LengthMismatch {
            expected: 3,
            found: 2
        }
    );
}

#[test]
fn binary_round_trip() {
    let value = inventory();
    let out = serialize_with(&value, &mut BinaryFormatter::new()).unwrap();
    let back: Inventory = deserialize_with(&out.into_in_stream(), &mut BinaryFormatter::new()).unwrap();
    assert_eq!(back, Inventory { cache: 0, ..value });

    let derived = MoreDerivedObject {
        derived: DerivedObject {
            base: BaseObject {
                data: 0.125,
                integer: -7,
            },
            floating: 8.5,
            string: String::from("binary"),
        },
        flag: false,
    };
    let out = serialize_with(&derived, &mut BinaryFormatter::new()).unwrap();
    assert_eq!(
        out.len(),
        8 + 4 + 4 + size_of::<usize>() + "binary".len() + 1
    );
    let back: MoreDerivedObject =
        deserialize_with(&out.into_in_stream(), &mut BinaryFormatter::new()).unwrap();
    assert_eq!(back, derived);
}

#[test]
fn binary_blob_is_order_dependent() {
    #[derive(Schema, Default, Debug, PartialEq)]
    struct Forward {
        first: u8,
        second: u8,
    }

    #[derive(Schema, Default, Debug, PartialEq)]
    struct Swapped {
        second: u8,
        first: u8,
    }

    let out = serialize_with(&Forward { first: 1, second: 2 }, &mut BinaryFormatter).unwrap();
    let back: Swapped = deserialize_with(&out.into_in_stream(), &mut BinaryFormatter).unwrap();
    assert_eq!(back, Swapped { second: 1, first: 2 });
}

#[test]
fn narrow_integers_wrap() {
    assert_eq!(lexical_cast::<u8>("256").unwrap(), 0);
    assert_eq!(lexical_cast::<i8>("-129").unwrap(), 127);
    assert!(lexical_cast::<i32>("12.5124").is_err());
    assert!(lexical_cast::<u16>("-1").is_err());

    let value: Tagged = deserialize(r#"{"tag":258}"#).unwrap();
    assert_eq!(value.tag, 2);
    assert!(matches!(
        deserialize::<BaseObject>(r#"{"integer":12.5124}"#),
        Err(ReadError::Lexical(_))
    ));
}
