//! Tests for the decode module

use super::*;
use crate::error::Error;
use serde_json::json;

fn user_shape() -> FieldShape {
    FieldShape::object([
        ("user_id".to_string(), FieldShape::String),
        ("name".to_string(), FieldShape::String),
        ("employee_no".to_string(), FieldShape::Integer),
        ("is_admin".to_string(), FieldShape::Boolean),
    ])
}

#[test]
fn test_check_matching_object() {
    let value = json!({
        "user_id": "u1",
        "name": "Alice",
        "employee_no": 42,
        "is_admin": false
    });
    assert!(check_shape(&user_shape(), &value).is_ok());
}

#[test]
fn test_check_absent_fields_are_ok() {
    // Provider fields are mostly optional
    let value = json!({ "user_id": "u1" });
    assert!(check_shape(&user_shape(), &value).is_ok());
}

#[test]
fn test_check_null_fields_are_ok() {
    let value = json!({ "user_id": "u1", "name": null });
    assert!(check_shape(&user_shape(), &value).is_ok());
}

#[test]
fn test_check_undeclared_fields_pass_through() {
    let value = json!({ "user_id": "u1", "brand_new_field": {"nested": true} });
    assert!(check_shape(&user_shape(), &value).is_ok());
}

#[test]
fn test_check_type_mismatch() {
    let value = json!({ "user_id": 123 });
    let err = check_shape(&user_shape(), &value).unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
    assert!(err.to_string().contains("$.user_id"));
}

#[test]
fn test_check_nested_object() {
    let shape = FieldShape::object([(
        "department".to_string(),
        FieldShape::object([("department_id".to_string(), FieldShape::String)]),
    )]);

    let ok = json!({ "department": { "department_id": "d1" } });
    assert!(check_shape(&shape, &ok).is_ok());

    let bad = json!({ "department": { "department_id": 7 } });
    let err = check_shape(&shape, &bad).unwrap_err();
    assert!(err.to_string().contains("$.department.department_id"));
}

#[test]
fn test_check_array_elements() {
    let shape = FieldShape::object([(
        "items".to_string(),
        FieldShape::array(user_shape()),
    )]);

    let ok = json!({ "items": [{ "user_id": "u1" }, { "user_id": "u2" }] });
    assert!(check_shape(&shape, &ok).is_ok());

    let bad = json!({ "items": [{ "user_id": "u1" }, { "user_id": 2 }] });
    let err = check_shape(&shape, &bad).unwrap_err();
    assert!(err.to_string().contains("$.items[1].user_id"));
}

#[test]
fn test_check_array_without_item_shape() {
    let shape = FieldShape::Array { items: None };
    assert!(check_shape(&shape, &json!([1, "two", null])).is_ok());
    assert!(check_shape(&shape, &json!({"not": "array"})).is_err());
}

#[test]
fn test_check_any_accepts_everything() {
    for value in [json!(null), json!(1), json!("x"), json!([]), json!({})] {
        assert!(check_shape(&FieldShape::Any, &value).is_ok());
    }
}

#[test]
fn test_check_scalar_shapes() {
    assert!(check_shape(&FieldShape::String, &json!("x")).is_ok());
    assert!(check_shape(&FieldShape::String, &json!(1)).is_err());
    assert!(check_shape(&FieldShape::Integer, &json!(1)).is_ok());
    assert!(check_shape(&FieldShape::Integer, &json!(1.5)).is_err());
    assert!(check_shape(&FieldShape::Number, &json!(1.5)).is_ok());
    assert!(check_shape(&FieldShape::Boolean, &json!(true)).is_ok());
    assert!(check_shape(&FieldShape::Boolean, &json!("true")).is_err());
}

#[test]
fn test_shape_yaml_roundtrip() {
    let yaml = r#"
type: object
fields:
  user_id:
    type: string
  tags:
    type: array
    items:
      type: string
"#;
    let shape: FieldShape = serde_yaml::from_str(yaml).unwrap();
    let value = json!({ "user_id": "u1", "tags": ["a", "b"] });
    assert!(check_shape(&shape, &value).is_ok());

    let bad = json!({ "tags": ["a", 2] });
    assert!(check_shape(&shape, &bad).is_err());
}
