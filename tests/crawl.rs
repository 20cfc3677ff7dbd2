use rstest::rstest;
use serde_json::{json, Value};

use jsoncut::keys::parse_key_name;
use jsoncut::{find_keys, list_keys, Path, Segment};

#[rstest]
fn dotted_names_are_escaped_and_parse_back() {
    let doc = json!({"dots.in.key.name": {"k1": true}});
    let keys = find_keys(&doc, false);
    assert_eq!(keys, ["dots\\.in\\.key\\.name", "dots\\.in\\.key\\.name.k1"]);
    assert_eq!(
        parse_key_name(&keys[0]),
        Path::from(vec![Segment::from("dots.in.key.name")])
    );
}

#[rstest]
fn root_array_elements_share_paths() {
    let doc = json!([{"k1": 1}, {"k2": 2}]);
    assert_eq!(find_keys(&doc, false), ["k1", "k2"]);
}

#[rstest]
#[case(false, &["k1", "k1.k2", "k3"])]
#[case(true, &["k1", "k1.k2", "k1.k4", "k3"])]
fn revisits_depend_on_fullscan(#[case] fullscan: bool, #[case] expected: &[&str]) {
    let doc = json!([
        {"k1": {"k2": []}, "k3": null},
        {"k1": {"k4": []}}
    ]);
    assert_eq!(find_keys(&doc, fullscan), expected);
}

#[rstest]
#[case(json!({"a": [{"b": 1}, {"c": {"d": 2}}], "e": "x"}))]
#[case(json!([{"a": [1, {"b": 2}]}, {"a": {"c": 3}}]))]
#[case(json!("scalar"))]
fn fullscan_is_a_superset(#[case] doc: Value) {
    let quick = find_keys(&doc, false);
    let full = find_keys(&doc, true);
    assert!(quick.iter().all(|key| full.contains(key)));
}

#[rstest]
fn nested_arrays_use_the_wildcard() {
    let doc = json!({"rows": [[{"x": 1}]]});
    assert_eq!(find_keys(&doc, false), ["rows", "rows.#", "rows.#.#", "rows.#.#.x"]);
}

#[rstest]
fn listing_is_numbered_from_one() {
    let doc = json!({"b": 1, "a": {"c": 2}});
    let lines: Vec<String> = list_keys(&doc, false).map(|key| key.to_string()).collect();
    assert_eq!(lines, ["1 a", "2 a.c", "3 b"]);
}
