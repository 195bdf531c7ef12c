//! Input checks for product requests.

use serde::Serialize;
use serde_json::{Map, Value};

use super::models::{NewProduct, UpdateProduct};

/// One failed rule, reported back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub error: String,
}

impl FieldError {
    fn required(field: &'static str) -> Self {
        Self {
            field,
            error: format!("The {} field is required.", field),
        }
    }

    fn invalid(field: &'static str, expectation: &str) -> Self {
        Self {
            field,
            error: format!("The {} field must be {}.", field, expectation),
        }
    }
}

/// Validate a raw create body, collecting every failure.
pub fn validate_new_product(body: &Value) -> Result<NewProduct, Vec<FieldError>> {
    let empty = Map::new();
    let fields = body.as_object().unwrap_or(&empty);
    let mut errors = Vec::new();

    let name = required(fields, "name", "a string", as_text, &mut errors);
    let description = required(fields, "description", "a string", as_text, &mut errors);
    let price = required(fields, "price", "a number", as_number, &mut errors);
    let stock = required(fields, "stock", "an integer", as_integer, &mut errors);

    match (name, description, price, stock) {
        (Some(name), Some(description), Some(price), Some(stock)) if errors.is_empty() => {
            Ok(NewProduct {
                name,
                description,
                price,
                stock,
            })
        }
        _ => Err(errors),
    }
}

/// Decode a partial update body.
///
/// Presence rules do not apply here: any subset of fields (including none)
/// may be sent and blank strings are stored as given. Supplied values must
/// still fit their column, with the same numeric coercion as create.
pub fn parse_update(body: &Value) -> Result<UpdateProduct, Vec<FieldError>> {
    let fields = match body {
        Value::Null => return Ok(UpdateProduct::default()),
        Value::Object(fields) => fields,
        _ => {
            return Err(vec![FieldError {
                field: "body",
                error: "The request body must be a JSON object.".to_string(),
            }])
        }
    };
    let mut errors = Vec::new();

    let update = UpdateProduct {
        name: supplied(fields, "name")
            .and_then(|value| check(as_text(value), "name", "a string", &mut errors)),
        description: supplied(fields, "description")
            .and_then(|value| check(as_text(value), "description", "a string", &mut errors)),
        price: supplied(fields, "price")
            .and_then(|value| check(as_number(value), "price", "a number", &mut errors)),
        stock: supplied(fields, "stock")
            .and_then(|value| check(as_integer(value), "stock", "an integer", &mut errors)),
    };

    if errors.is_empty() {
        Ok(update)
    } else {
        Err(errors)
    }
}

/// Absent and `null` are not supplied; blank strings are.
fn supplied<'a>(fields: &'a Map<String, Value>, field: &str) -> Option<&'a Value> {
    match fields.get(field) {
        None | Some(Value::Null) => None,
        Some(value) => Some(value),
    }
}

/// Absent, `null`, and blank strings all count as missing.
fn present<'a>(fields: &'a Map<String, Value>, field: &str) -> Option<&'a Value> {
    match supplied(fields, field) {
        Some(Value::String(s)) if s.trim().is_empty() => None,
        other => other,
    }
}

fn check<T>(
    parsed: Option<T>,
    field: &'static str,
    expectation: &str,
    errors: &mut Vec<FieldError>,
) -> Option<T> {
    if parsed.is_none() {
        errors.push(FieldError::invalid(field, expectation));
    }
    parsed
}

fn required<T>(
    fields: &Map<String, Value>,
    field: &'static str,
    expectation: &str,
    coerce: fn(&Value) -> Option<T>,
    errors: &mut Vec<FieldError>,
) -> Option<T> {
    match present(fields, field) {
        None => {
            errors.push(FieldError::required(field));
            None
        }
        Some(value) => check(coerce(value), field, expectation, errors),
    }
}

fn as_text(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string)
}

/// JSON numbers and numeric strings.
fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

/// Whole numbers within 32 bits, including integral floats such as `20.0`.
fn as_integer(value: &Value) -> Option<i32> {
    match value {
        Value::Number(n) => match n.as_i64() {
            Some(i) => i32::try_from(i).ok(),
            None => n
                .as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i32::MIN as f64 && *f <= i32::MAX as f64)
                .map(|f| f as i32),
        },
        Value::String(s) => s.trim().parse::<i32>().ok(),
        _ => None,
    }
}
