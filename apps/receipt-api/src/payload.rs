//! Receipt body decoding.
//!
//! The body is read as a `serde_json::Value` and picked apart field by field,
//! so a value of the wrong JSON type (`"price": 1.25`) is reported under its
//! own path next to every other validation failure.

use receipt_core::{
    validate_receipt, ItemPayload, Receipt, ReceiptPayload, ValidationError, ValidationErrors,
};
use serde_json::{Map, Value};

/// Decodes and validates a receipt body, collecting every failure.
pub fn validate_body(body: &Value) -> Result<Receipt, ValidationErrors> {
    let mut type_errors = ValidationErrors::new();
    let payload = decode_receipt(body, &mut type_errors);

    let errors = match validate_receipt(&payload) {
        Ok(receipt) if type_errors.is_empty() => return Ok(receipt),
        Ok(_) => ValidationErrors::new(),
        Err(errors) => errors,
    };

    // A mistyped field was decoded as absent; drop the "required" noise it causes.
    let mut merged = type_errors.clone();
    for error in errors.errors() {
        let shadowed = type_errors
            .errors()
            .iter()
            .any(|type_error| covers(type_error.field(), error.field()));
        if !shadowed {
            merged.push(error.clone());
        }
    }

    Err(merged)
}

fn decode_receipt(body: &Value, errors: &mut ValidationErrors) -> ReceiptPayload {
    let Some(object) = body.as_object() else {
        errors.push(wrong_type("body", "an object", body));
        return ReceiptPayload::default();
    };

    ReceiptPayload {
        retailer: string_field(object, "retailer", "retailer", errors),
        purchase_date: string_field(object, "purchaseDate", "purchaseDate", errors),
        purchase_time: string_field(object, "purchaseTime", "purchaseTime", errors),
        items: items_field(object, errors),
        total: string_field(object, "total", "total", errors),
    }
}

fn items_field(
    object: &Map<String, Value>,
    errors: &mut ValidationErrors,
) -> Option<Vec<ItemPayload>> {
    match object.get("items") {
        None | Some(Value::Null) => None,
        Some(Value::Array(items)) => Some(
            items
                .iter()
                .enumerate()
                .map(|(index, item)| decode_item(index, item, errors))
                .collect(),
        ),
        Some(other) => {
            errors.push(wrong_type("items", "an array", other));
            None
        }
    }
}

fn decode_item(index: usize, item: &Value, errors: &mut ValidationErrors) -> ItemPayload {
    let path = format!("items[{index}]");
    let Some(object) = item.as_object() else {
        errors.push(wrong_type(&path, "an object", item));
        return ItemPayload::default();
    };

    ItemPayload {
        short_description: string_field(
            object,
            "shortDescription",
            &format!("{path}.shortDescription"),
            errors,
        ),
        price: string_field(object, "price", &format!("{path}.price"), errors),
    }
}

fn string_field(
    object: &Map<String, Value>,
    key: &str,
    path: &str,
    errors: &mut ValidationErrors,
) -> Option<String> {
    match object.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::String(value)) => Some(value.clone()),
        Some(other) => {
            errors.push(wrong_type(path, "a string", other));
            None
        }
    }
}

fn wrong_type(field: &str, expected: &'static str, found: &Value) -> ValidationError {
    ValidationError::WrongType {
        field: field.to_string(),
        expected,
        found: json_type(found),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// True when `field` is `parent` itself or lies beneath it.
fn covers(parent: &str, field: &str) -> bool {
    if parent == "body" {
        return true;
    }
    match field.strip_prefix(parent) {
        Some(rest) => rest.is_empty() || rest.starts_with('.') || rest.starts_with('['),
        None => false,
    }
}
