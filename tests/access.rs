use rstest::{fixture, rstest};
use serde_json::{json, Value};

use jsoncut::keys::parse_key_name;
use jsoncut::{
    del_items, drop_key, get_defaults, get_items, get_rootkey, select_key, select_or, set_items,
    set_value, CutOptions, ErrorKind, Operation, Path, Segment, SliceSpec,
};

#[fixture]
fn data() -> Value {
    json!({
        "source": {"name": "Asterank", "url": "http://www.asterank.com/api"},
        "asteroids": [
            {"name": "Ryugu", "type": "Cg", "value $": 82760000000u64},
            {"name": "1989 ML", "type": "X", "value $": 13940000000u64},
            {"name": "Nerus", "type": "Xe", "value $": 4710000000u64}
        ]
    })
}

fn key(text: &str) -> Path {
    parse_key_name(text)
}

fn keys(texts: &[&str]) -> Vec<Path> {
    texts.iter().map(|text| key(text)).collect()
}

#[rstest]
#[case(key("missing.key"), ErrorKind::KeyNotFound)]
#[case(key("asteroids.8"), ErrorKind::IndexOutOfRange)]
#[case(Path::from(vec![Segment::from("source"), Segment::from(8)]), ErrorKind::KeyTypeError)]
#[case(key("source.8"), ErrorKind::KeyNotFound)]
#[case(key("asteroids.name"), ErrorKind::KeyTypeError)]
#[case(key("source.name.first"), ErrorKind::KeyTypeError)]
#[case(key("asteroids.::0"), ErrorKind::KeyTypeError)]
fn select_errors(data: Value, #[case] path: Path, #[case] expected: ErrorKind) {
    let err = select_key(&data, &path).expect_err("error");
    assert_eq!(err.kind(), expected);
    assert!(err.context().is_none());
}

#[rstest]
#[case("source.name", json!("Asterank"))]
#[case("asteroids.0.name", json!("Ryugu"))]
#[case("asteroids.-1.name", json!("Nerus"))]
#[case("asteroids.1:2.0.name", json!("1989 ML"))]
#[case("asteroids.::2.1.type", json!("Xe"))]
#[case("asteroids.0.value $", json!(82760000000u64))]
#[case("asteroids.1::9223372036854775807.0.name", json!("1989 ML"))]
#[case("asteroids.::-9223372036854775808.0.name", json!("Nerus"))]
fn select_values(data: Value, #[case] path: &str, #[case] expected: Value) {
    assert_eq!(select_key(&data, &key(path)).expect("value").as_ref(), &expected);
}

#[rstest]
#[case(SliceSpec::new(Some(1), None, None), &[1, 2])]
#[case(SliceSpec::new(None, Some(2), None), &[0, 1])]
#[case(SliceSpec::new(Some(1), Some(2), None), &[1])]
#[case(SliceSpec::new(None, None, Some(2)), &[0, 2])]
#[case(SliceSpec::new(None, None, Some(-1)), &[2, 1, 0])]
fn select_slices(data: Value, #[case] spec: SliceSpec, #[case] expected: &[usize]) {
    let path = Path::from(vec![Segment::from("asteroids"), Segment::from(spec)]);
    let selected = select_key(&data, &path).expect("slice").into_owned();
    let wanted: Vec<Value> = expected
        .iter()
        .map(|idx| data["asteroids"][*idx].clone())
        .collect();
    assert_eq!(selected, Value::Array(wanted));
}

#[rstest]
fn empty_path_selects_the_document(data: Value) {
    assert_eq!(select_key(&data, &Path::new()).expect("root").as_ref(), &data);
}

#[rstest]
fn digit_names_address_object_members() {
    let doc = json!({"1": "one", "list": ["zero", "one"]});
    assert_eq!(select_key(&doc, &key("1")).expect("member").as_ref(), &json!("one"));
    assert_eq!(select_key(&doc, &key("list.1")).expect("element").as_ref(), &json!("one"));
}

#[rstest]
fn select_or_defaults_only_missing_members(data: Value) {
    let fallback = json!("fallback");
    assert_eq!(select_or(&data, &key("missing"), &fallback).expect("default"), fallback);
    let err = select_or(&data, &key("asteroids.8"), &fallback).expect_err("range");
    assert_eq!(err.kind(), ErrorKind::IndexOutOfRange);
}

#[rstest]
fn rootkey_errors_carry_context(data: Value) {
    assert_eq!(get_rootkey(&data, &key("source.url")).expect("root"), json!("http://www.asterank.com/api"));
    let err = get_rootkey(&data, &key("nope")).expect_err("missing");
    let context = err.context().expect("context");
    assert_eq!(context.operation, Operation::RootKey);
    assert_eq!(context.item_number, 0);
}

#[rstest]
fn get_items_keeps_path_order(data: Value) {
    let options = CutOptions::new();
    let result = get_items(&data, &keys(&["source.url", "asteroids.0.name"]), &options, 1)
        .expect("items");
    assert_eq!(result.keys().collect::<Vec<_>>(), ["url", "name"]);

    let options = options.with_fullpath(true);
    let result = get_items(&data, &keys(&["asteroids.0.name"]), &options, 1).expect("items");
    assert_eq!(result["asteroids.0.name"], json!("Ryugu"));
}

#[rstest]
fn get_items_reports_item_number_of_failing_record() {
    let records = [json!({"id": 1}), json!({"id": 2}), json!({"other": 3})];
    let paths = keys(&["id"]);
    let options = CutOptions::new();
    let err = records
        .iter()
        .enumerate()
        .map(|(idx, record)| get_items(record, &paths, &options, idx + 1))
        .collect::<jsoncut::Result<Vec<_>>>()
        .expect_err("third record");
    let context = err.context().expect("context");
    assert_eq!(context.item_number, 3);
    assert_eq!(context.operation, Operation::Get);
    assert_eq!(context.document, json!({"other": 3}));
    assert_eq!(err.available_keys(), Some(vec!["other".to_string()]));
}

#[rstest]
fn any_skips_missing_members_only(data: Value) {
    let options = CutOptions::new().with_any(true);
    let result = get_items(&data, &keys(&["nope", "source.name"]), &options, 1).expect("any");
    assert_eq!(result.len(), 1);

    let err = get_items(&data, &keys(&["asteroids.9"]), &options, 1).expect_err("range");
    assert_eq!(err.kind(), ErrorKind::IndexOutOfRange);
    let err = get_items(&data, &keys(&["asteroids.name"]), &options, 1).expect_err("type");
    assert_eq!(err.kind(), ErrorKind::KeyTypeError);
}

#[rstest]
fn get_defaults_fill_missing_members(data: Value) {
    let defaults = vec![(key("source.name"), json!(null)), (key("source.id"), json!(0))];
    let result = get_defaults(&data, &defaults, false, 1).expect("defaults");
    assert_eq!(result, json!({"name": "Asterank", "id": 0}).as_object().cloned().expect("object"));
}

#[rstest]
fn set_value_in_place(mut data: Value) {
    set_value(&mut data, &key("source.name"), json!("test"), true).expect("member");
    set_value(&mut data, &key("asteroids.0.name"), json!("test"), true).expect("element");
    set_value(&mut data, &key("source.new"), json!(1), true).expect("insert");
    assert_eq!(data["source"]["name"], json!("test"));
    assert_eq!(data["asteroids"][0]["name"], json!("test"));
    assert_eq!(data["source"]["new"], json!(1));
}

#[rstest]
fn set_value_missing_parent(mut data: Value) {
    let before = data.clone();
    set_value(&mut data, &key("missing.key"), json!(null), false).expect("lenient");
    assert_eq!(data, before);

    let err = set_value(&mut data, &key("missing.key"), json!(null), true).expect_err("strict");
    assert_eq!(err.kind(), ErrorKind::KeyNotFound);
    let err = set_value(&mut data, &key("source.name.key"), json!(null), false).expect_err("scalar");
    assert_eq!(err.kind(), ErrorKind::KeyTypeError);
}

#[rstest]
fn set_slice_splices_arrays() {
    let mut doc = json!({"list": [0, 1, 2, 3]});
    set_value(&mut doc, &key("list.1:3"), json!(["a"]), true).expect("splice");
    assert_eq!(doc, json!({"list": [0, "a", 3]}));

    let mut doc = json!({"list": [0, 1, 2, 3]});
    set_value(&mut doc, &key("list.::2"), json!(["x", "y"]), true).expect("stepped");
    assert_eq!(doc, json!({"list": ["x", 1, "y", 3]}));

    let err = set_value(&mut doc, &key("list.::2"), json!(["x"]), true).expect_err("length");
    assert_eq!(err.kind(), ErrorKind::KeyTypeError);
}

#[rstest]
fn drop_key_members_elements_and_slices(mut data: Value) {
    drop_key(&mut data, &key("source.url"), true).expect("member");
    drop_key(&mut data, &key("asteroids.-1"), true).expect("element");
    assert_eq!(data["source"], json!({"name": "Asterank"}));
    assert_eq!(data["asteroids"].as_array().map(Vec::len), Some(2));

    drop_key(&mut data, &key("asteroids.0:1"), true).expect("slice");
    assert_eq!(data["asteroids"][0]["name"], json!("1989 ML"));
}

#[rstest]
fn huge_slice_steps_take_one_element(mut data: Value) {
    let path = key("asteroids.1::9223372036854775807");
    let selected = select_key(&data, &path).expect("slice").into_owned();
    assert_eq!(selected, json!([data["asteroids"][1].clone()]));

    drop_key(&mut data, &path, true).expect("drop");
    let names: Vec<_> = data["asteroids"]
        .as_array()
        .into_iter()
        .flatten()
        .map(|item| item["name"].clone())
        .collect();
    assert_eq!(names, [json!("Ryugu"), json!("Nerus")]);
}

#[rstest]
fn drop_key_is_idempotent_when_lenient(mut data: Value) {
    drop_key(&mut data, &key("source.url"), false).expect("first");
    let after = data.clone();
    drop_key(&mut data, &key("source.url"), false).expect("second");
    assert_eq!(data, after);

    let err = drop_key(&mut data, &key("source.url"), true).expect_err("strict");
    assert_eq!(err.kind(), ErrorKind::KeyNotFound);
}

#[rstest]
fn batch_mutations_attach_context(mut data: Value) {
    let options = CutOptions::new();
    let assignments = vec![(key("source.name"), json!("x")), (key("nope.x"), json!(1))];
    let err = set_items(&mut data, &assignments, &options, 4).expect_err("set");
    let context = err.context().expect("context");
    assert_eq!((context.operation, context.item_number), (Operation::Set, 4));
    assert_eq!(data["source"]["name"], json!("x"));

    let err = del_items(&mut data, &keys(&["source.url", "source.url"]), &options, 2)
        .expect_err("del");
    let context = err.context().expect("context");
    assert_eq!((context.operation, context.item_number), (Operation::Del, 2));
    assert_eq!(context.key_lists.len(), 2);

    del_items(&mut data, &keys(&["nope"]), &options.with_any(true), 2).expect("lenient");
}
