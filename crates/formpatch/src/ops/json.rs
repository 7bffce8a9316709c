//! JSON wire codec for patch operations.
//!
//! The flush payload is an ordered array of `{op, selector, ...}` records.
//! Encoding is canonical: field order is fixed, so identical op sequences
//! serialize to byte-identical payloads.

use serde_json::{json, Map, Value};
use thiserror::Error;

use super::PatchOp;

#[derive(Debug, Error, PartialEq)]
pub enum CodecError {
    #[error("operation is not an object")]
    NotAnObject,
    #[error("missing or non-string field `{0}`")]
    BadField(&'static str),
    #[error("unknown op `{0}`")]
    UnknownOp(String),
    #[error("dispatch_event detail must be an object")]
    BadDetail,
}

/// Encode one operation as its wire record.
pub fn to_json(op: &PatchOp) -> Value {
    match op {
        PatchOp::AddCssClass { selector, name }
        | PatchOp::RemoveCssClass { selector, name }
        | PatchOp::SetAttribute { selector, name }
        | PatchOp::RemoveAttribute { selector, name } => json!({
            "op": op.op_name(),
            "selector": selector,
            "name": name,
        }),
        PatchOp::TextContent { selector, text } => json!({
            "op": "text_content",
            "selector": selector,
            "text": text,
        }),
        PatchOp::DispatchEvent {
            selector,
            name,
            detail,
        } => json!({
            "op": "dispatch_event",
            "selector": selector,
            "name": name,
            "detail": detail,
        }),
    }
}

/// Encode an ordered op sequence as the flush payload.
pub fn payload_to_json(ops: &[PatchOp]) -> Value {
    Value::Array(ops.iter().map(to_json).collect())
}

/// Decode one wire record back into an operation.
pub fn from_json(value: &Value) -> Result<PatchOp, CodecError> {
    let map = value.as_object().ok_or(CodecError::NotAnObject)?;
    let op = str_field(map, "op")?;
    let selector = str_field(map, "selector")?.to_string();
    match op {
        "add_css_class" => Ok(PatchOp::AddCssClass {
            selector,
            name: str_field(map, "name")?.to_string(),
        }),
        "remove_css_class" => Ok(PatchOp::RemoveCssClass {
            selector,
            name: str_field(map, "name")?.to_string(),
        }),
        "text_content" => Ok(PatchOp::TextContent {
            selector,
            text: str_field(map, "text")?.to_string(),
        }),
        "set_attribute" => Ok(PatchOp::SetAttribute {
            selector,
            name: str_field(map, "name")?.to_string(),
        }),
        "remove_attribute" => Ok(PatchOp::RemoveAttribute {
            selector,
            name: str_field(map, "name")?.to_string(),
        }),
        "dispatch_event" => {
            let detail = map.get("detail").cloned().unwrap_or(json!({}));
            if !detail.is_object() {
                return Err(CodecError::BadDetail);
            }
            Ok(PatchOp::DispatchEvent {
                selector,
                name: str_field(map, "name")?.to_string(),
                detail,
            })
        }
        other => Err(CodecError::UnknownOp(other.to_string())),
    }
}

fn str_field<'a>(map: &'a Map<String, Value>, key: &'static str) -> Result<&'a str, CodecError> {
    map.get(key)
        .and_then(Value::as_str)
        .ok_or(CodecError::BadField(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(op: PatchOp) -> PatchOp {
        let v = to_json(&op);
        from_json(&v).expect("roundtrip failed")
    }

    #[test]
    fn roundtrip_css_class_ops() {
        let add = PatchOp::AddCssClass {
            selector: "post_5_form_name_container".to_string(),
            name: "error".to_string(),
        };
        assert_eq!(roundtrip(add.clone()), add);
        let v = to_json(&add);
        assert_eq!(v["op"], "add_css_class");
        assert_eq!(v["selector"], "post_5_form_name_container");
    }

    #[test]
    fn roundtrip_text_content() {
        let op = PatchOp::TextContent {
            selector: "post_5_form_name_error".to_string(),
            text: "can't be blank".to_string(),
        };
        assert_eq!(roundtrip(op.clone()), op);
    }

    #[test]
    fn roundtrip_dispatch_event() {
        let op = PatchOp::DispatchEvent {
            selector: "post_5_form".to_string(),
            name: "formpatch:form:invalid".to_string(),
            detail: json!({"resource": "post"}),
        };
        let v = to_json(&op);
        assert_eq!(v["detail"]["resource"], "post");
        assert_eq!(roundtrip(op.clone()), op);
    }

    #[test]
    fn unknown_op_is_rejected() {
        let v = json!({"op": "morph", "selector": "x"});
        assert_eq!(from_json(&v), Err(CodecError::UnknownOp("morph".to_string())));
    }

    #[test]
    fn non_object_detail_is_rejected() {
        let v = json!({"op": "dispatch_event", "selector": "x", "name": "e", "detail": 3});
        assert_eq!(from_json(&v), Err(CodecError::BadDetail));
    }

    #[test]
    fn payload_preserves_order() {
        let ops = vec![
            PatchOp::RemoveCssClass {
                selector: "a".to_string(),
                name: "error".to_string(),
            },
            PatchOp::TextContent {
                selector: "b".to_string(),
                text: String::new(),
            },
        ];
        let payload = payload_to_json(&ops);
        let arr = payload.as_array().unwrap();
        assert_eq!(arr[0]["op"], "remove_css_class");
        assert_eq!(arr[1]["op"], "text_content");
    }
}
