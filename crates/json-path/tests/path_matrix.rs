use jsonc_edit_path::{
    format_dotted_path, format_pointer, get, is_child, parent, parse_dotted_path, parse_pointer,
    remove, set, validate_pointer, PathError, PathStep,
};
use serde_json::json;

#[test]
fn pointer_parse_format_roundtrip_matrix() {
    let cases = ["", "/", "/foo", "/foo/bar", "/a~0b/c~1d", "/arr/0", "/~0/~1"];

    for pointer in cases {
        let path = parse_pointer(pointer);
        assert_eq!(format_pointer(&path), pointer);
    }
}

#[test]
fn dotted_and_pointer_forms_address_the_same_values() {
    let doc = json!({"foo": {"bar": [10, 20, null]}});

    for (dotted, pointer) in [("foo.bar.0", "/foo/bar/0"), ("foo.bar.2", "/foo/bar/2")] {
        assert_eq!(get(&doc, &parse_dotted_path(dotted)), get(&doc, &parse_pointer(pointer)));
    }
    assert_eq!(get(&doc, &parse_dotted_path("foo.bar.2")), Some(&json!(null)));
    assert_eq!(get(&doc, &parse_dotted_path("foo.bar.3")), None);
    assert_eq!(format_dotted_path(&parse_pointer("/foo/bar/1")), "foo.bar.1");
}

#[test]
fn set_then_get_matrix() {
    let mut doc = json!({"name": "x"});
    let cases = [
        ("server.host", json!("localhost")),
        ("server.ports", json!([80])),
        ("server.ports.2", json!(443)),
        ("flags.0", json!(true)),
    ];
    for (path, value) in cases {
        let path = parse_dotted_path(path);
        set(&mut doc, &path, value.clone()).expect("set ok");
        assert_eq!(get(&doc, &path), Some(&value));
    }
    assert_eq!(
        doc,
        json!({
            "name": "x",
            "server": {"host": "localhost", "ports": [80, null, 443]},
            "flags": {"0": true}
        })
    );
}

#[test]
fn native_index_steps_create_arrays() {
    let mut doc = json!({});
    set(&mut doc, &[PathStep::key("list"), PathStep::Index(0), PathStep::key("id")], json!(1))
        .expect("set ok");
    assert_eq!(doc, json!({"list": [{"id": 1}]}));
}

#[test]
fn remove_then_get() {
    let mut doc = json!({"a": {"b": 1, "c": 2}});
    assert_eq!(remove(&mut doc, &parse_dotted_path("a.b")), Some(json!(1)));
    assert_eq!(get(&doc, &parse_dotted_path("a.b")), None);
    assert_eq!(remove(&mut doc, &parse_dotted_path("a.b")), None);
}

#[test]
fn validation_and_relationships() {
    assert!(validate_pointer("/foo/bar").is_ok());
    assert!(validate_pointer("foo/bar").is_err());
    assert!(is_child(&parse_dotted_path("a"), &parse_pointer("/a/0")));
    assert_eq!(parent(&parse_dotted_path("a.b")), Ok(parse_dotted_path("a")));
    assert_eq!(parent(&[]), Err(PathError::NoParent));
}
