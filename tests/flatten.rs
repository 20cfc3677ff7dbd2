use rstest::{fixture, rstest};
use serde_json::{json, Map, Value};

use jsoncut::keys::parse_key_name;
use jsoncut::{flatten_all, flatten_by_keys, generate_rows, get_key_content, ErrorKind, Path};

#[fixture]
fn source() -> Value {
    json!({
        "city": "jacksonville",
        "data": {"temp": 90, "humidity": 10},
        "info": {
            "geo": {"lat": 34, "long": -60},
            "bordering": ["Georgia", "Alabama", "Mississippi"]
        }
    })
}

fn flat() -> Value {
    json!({
        "city": "jacksonville",
        "data.humidity": 10,
        "data.temp": 90,
        "info.bordering": ["Georgia", "Alabama", "Mississippi"],
        "info.geo.lat": 34,
        "info.geo.long": -60
    })
}

fn mini_forecast() -> Value {
    json!({
        "datetime": "2017-09-09 11:49",
        "list": [
            {
                "date": "2017-09-09", "temp_f_min": 81, "temp_f_max": 85,
                "day": {"humidity_pct": 82, "uv_index": 5, "wind": {"direction": "ENE"}}
            },
            {
                "date": "2017-10-09", "temp_f_min": 79, "temp_f_max": 85,
                "day": {"humidity_pct": 84, "uv_index": 5, "wind": {"direction": "SE"}}
            }
        ],
        "city": {
            "id": 4164138, "name": "Miami",
            "coord": {"lat": 25.7743, "lon": -80.1937},
            "country": "US"
        }
    })
}

#[rstest]
fn flatten_everything(source: Value) {
    assert_eq!(Value::Object(flatten_all(&source).expect("flat")), flat());
    assert_eq!(
        Value::Object(flatten_by_keys::<&str>(&source, None).expect("flat")),
        flat()
    );
}

#[rstest]
fn flatten_chosen_keys(source: Value) {
    let flattened = flatten_by_keys(&source, Some(&["city", "info.geo.long"][..])).expect("flat");
    assert_eq!(
        Value::Object(flattened),
        json!({"city": "jacksonville", "info.geo.long": -60})
    );
}

#[rstest]
fn flatten_unknown_key(source: Value) {
    let err = flatten_by_keys(&source, Some(&["not.a.real.key"][..])).expect_err("missing");
    assert_eq!(err.kind(), ErrorKind::KeyNotFound);
}

#[rstest]
#[case("city")]
#[case("data.humidity")]
#[case("data.temp")]
#[case("info.bordering")]
#[case("info.geo.lat")]
#[case("info.geo.long")]
fn key_content(source: Value, #[case] key: &str) {
    let mut out = Map::new();
    get_key_content(&source, &parse_key_name(key), &mut out).expect("content");
    assert_eq!(out.get(key), flat().get(key));
}

#[rstest]
fn key_content_skips_objects(source: Value) {
    let mut out = Map::new();
    get_key_content(&source, &parse_key_name("data"), &mut out).expect("content");
    assert!(out.is_empty());
}

#[rstest]
fn rows_with_prepended_keys() {
    let doc = mini_forecast();
    let prepend: Vec<Path> = ["city.name", "city.coord.lat", "city.coord.lon"]
        .iter()
        .map(|key| parse_key_name(key))
        .collect();
    let mut rows = generate_rows(&doc, &parse_key_name("list"), &prepend).expect("rows");

    let first = rows.next().expect("first").expect("row");
    assert_eq!(
        Value::Object(first),
        json!({
            "city.name": "Miami", "city.coord.lat": 25.7743, "city.coord.lon": -80.1937,
            "date": "2017-09-09", "temp_f_min": 81, "temp_f_max": 85,
            "day.humidity_pct": 82, "day.uv_index": 5, "day.wind.direction": "ENE"
        })
    );
    let second = rows.next().expect("second").expect("row");
    assert_eq!(second["day.wind.direction"], json!("SE"));
    assert!(rows.next().is_none());
}

#[rstest]
fn rows_from_missing_root() {
    let doc = mini_forecast();
    let err = generate_rows(&doc, &parse_key_name("nope"), &[]).err().expect("missing");
    assert_eq!(err.kind(), ErrorKind::KeyNotFound);
}
