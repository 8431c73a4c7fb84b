//! Primitive value coercion
//!
//! Incoming values for a primitive node are normalized to the node's type.
//! Input that cannot be interpreted falls back to the node's instance
//! default; an unknown enum choice keeps the current selection instead.

use form_schema::PrimitiveType;
use serde_json::{Number, Value};

/// Normalize `input` for a primitive of type `ty`.
pub fn coerce_value(ty: &PrimitiveType, input: &Value, fallback: &Value, current: &Value) -> Value {
    let coerced = match ty {
        PrimitiveType::Integer => to_integer(input),
        PrimitiveType::Float => to_float(input),
        PrimitiveType::Text => to_text(input),
        PrimitiveType::Boolean => to_boolean(input),
        PrimitiveType::Enum { .. } => {
            return to_option(ty, input).unwrap_or_else(|| {
                tracing::debug!("Ignoring unknown enum value {}", input);
                current.clone()
            });
        }
        PrimitiveType::StructuredData => Some(input.clone()),
    };
    coerced.unwrap_or_else(|| {
        tracing::debug!("Cannot read {} as {}, using default", input, ty.name());
        fallback.clone()
    })
}

/// Interpret raw text typed into a primitive's editor.
///
/// Structured data is parsed as JSON; malformed text yields the fallback.
pub fn parse_text(ty: &PrimitiveType, text: &str, fallback: &Value, current: &Value) -> Value {
    match ty {
        PrimitiveType::Boolean => match text.trim().to_ascii_lowercase().as_str() {
            "true" | "on" | "1" => Value::Bool(true),
            "false" | "off" | "0" => Value::Bool(false),
            _ => fallback.clone(),
        },
        PrimitiveType::StructuredData => match serde_json::from_str(text) {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!("Malformed structured data, using default: {}", e);
                fallback.clone()
            }
        },
        _ => coerce_value(ty, &Value::String(text.to_string()), fallback, current),
    }
}

fn to_integer(input: &Value) -> Option<Value> {
    match input {
        Value::Number(n) if n.is_i64() || n.is_u64() => Some(Value::Number(n.clone())),
        Value::Number(n) => n.as_f64().and_then(truncate),
        Value::String(s) => {
            let s = s.trim();
            match s.parse::<i64>() {
                Ok(i) => Some(Value::from(i)),
                Err(_) => s.parse::<f64>().ok().and_then(truncate),
            }
        }
        Value::Bool(b) => Some(Value::from(i64::from(*b))),
        _ => None,
    }
}

fn truncate(f: f64) -> Option<Value> {
    let t = f.trunc();
    if t.is_finite() && t >= i64::MIN as f64 && t < i64::MAX as f64 {
        Some(Value::from(t as i64))
    } else {
        None
    }
}

fn to_float(input: &Value) -> Option<Value> {
    match input {
        Value::Number(_) => Some(input.clone()),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number),
        _ => None,
    }
}

fn to_text(input: &Value) -> Option<Value> {
    match input {
        Value::String(_) => Some(input.clone()),
        Value::Number(n) => Some(Value::String(n.to_string())),
        Value::Bool(b) => Some(Value::String(b.to_string())),
        _ => None,
    }
}

fn to_boolean(input: &Value) -> Option<Value> {
    match input {
        Value::Bool(_) => Some(input.clone()),
        Value::String(s) if s.eq_ignore_ascii_case("true") => Some(Value::Bool(true)),
        Value::String(s) if s.eq_ignore_ascii_case("false") => Some(Value::Bool(false)),
        Value::Number(n) => n.as_f64().map(|f| Value::Bool(f != 0.0)),
        _ => None,
    }
}

fn to_option(ty: &PrimitiveType, input: &Value) -> Option<Value> {
    let candidate = match input {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    ty.has_option(&candidate).then_some(Value::String(candidate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use form_schema::EnumOption;
    use rstest::rstest;
    use serde_json::json;

    fn direction() -> PrimitiveType {
        PrimitiveType::Enum {
            options: ["forward", "backward", "3"]
                .into_iter()
                .map(|v| EnumOption {
                    value: v.to_string(),
                    label: None,
                })
                .collect(),
        }
    }

    #[rstest]
    #[case(json!(42), json!(42))]
    #[case(json!(-7), json!(-7))]
    #[case(json!(3.9), json!(3))]
    #[case(json!(-3.9), json!(-3))]
    #[case(json!("12"), json!(12))]
    #[case(json!(" 12 "), json!(12))]
    #[case(json!("4.5"), json!(4))]
    #[case(json!(true), json!(1))]
    #[case(json!("twelve"), json!(5))]
    #[case(json!(null), json!(5))]
    #[case(json!([1]), json!(5))]
    #[case(json!(9223372036854775808.0), json!(5))]
    #[case(json!("9223372036854775808"), json!(5))]
    #[case(json!(-9223372036854775808.0), json!(i64::MIN))]
    fn test_integer_coercion(#[case] input: Value, #[case] expected: Value) {
        let out = coerce_value(&PrimitiveType::Integer, &input, &json!(5), &json!(0));
        assert_eq!(out, expected);
    }

    #[rstest]
    #[case(json!(2.5), json!(2.5))]
    #[case(json!(10), json!(10))]
    #[case(json!("0.25"), json!(0.25))]
    #[case(json!("NaN"), json!(1.5))]
    #[case(json!("abc"), json!(1.5))]
    #[case(json!(false), json!(1.5))]
    fn test_float_coercion(#[case] input: Value, #[case] expected: Value) {
        let out = coerce_value(&PrimitiveType::Float, &input, &json!(1.5), &json!(0.0));
        assert_eq!(out, expected);
    }

    #[rstest]
    #[case(json!("Major"), json!("Major"))]
    #[case(json!(7), json!("7"))]
    #[case(json!(true), json!("true"))]
    #[case(json!({"a": 1}), json!("none"))]
    fn test_text_coercion(#[case] input: Value, #[case] expected: Value) {
        let out = coerce_value(&PrimitiveType::Text, &input, &json!("none"), &json!(""));
        assert_eq!(out, expected);
    }

    #[rstest]
    #[case(json!(true), json!(true))]
    #[case(json!("TRUE"), json!(true))]
    #[case(json!("false"), json!(false))]
    #[case(json!(0), json!(false))]
    #[case(json!(2), json!(true))]
    #[case(json!("yes please"), json!(true))]
    fn test_boolean_coercion(#[case] input: Value, #[case] expected: Value) {
        let out = coerce_value(&PrimitiveType::Boolean, &input, &json!(true), &json!(false));
        assert_eq!(out, expected);
    }

    #[rstest]
    #[case(json!("backward"), json!("backward"))]
    #[case(json!(3), json!("3"))]
    #[case(json!("sideways"), json!("forward"))]
    #[case(json!(null), json!("forward"))]
    fn test_enum_keeps_current_on_unknown(#[case] input: Value, #[case] expected: Value) {
        let out = coerce_value(&direction(), &input, &json!("backward"), &json!("forward"));
        assert_eq!(out, expected);
    }

    #[test]
    fn test_structured_data_is_stored_as_is() {
        let input = json!({"offsets": [0, 4, 7]});
        let out = coerce_value(&PrimitiveType::StructuredData, &input, &json!([0]), &json!(null));
        assert_eq!(out, input);
    }

    #[rstest]
    #[case("[0, 3, 7]", json!([0, 3, 7]))]
    #[case("{\"a\": true}", json!({"a": true}))]
    #[case("[0, 3,", json!([0]))]
    #[case("", json!([0]))]
    fn test_structured_text_parsing(#[case] text: &str, #[case] expected: Value) {
        let out = parse_text(&PrimitiveType::StructuredData, text, &json!([0]), &json!([9]));
        assert_eq!(out, expected);
    }

    #[rstest]
    #[case("on", json!(true))]
    #[case("1", json!(true))]
    #[case("Off", json!(false))]
    #[case("maybe", json!(false))]
    fn test_boolean_text_parsing(#[case] text: &str, #[case] expected: Value) {
        let out = parse_text(&PrimitiveType::Boolean, text, &json!(false), &json!(true));
        assert_eq!(out, expected);
    }

    #[test]
    fn test_numeric_text_parsing_falls_back() {
        assert_eq!(
            parse_text(&PrimitiveType::Integer, "80", &json!(60), &json!(0)),
            json!(80)
        );
        assert_eq!(
            parse_text(&PrimitiveType::Integer, "fast", &json!(60), &json!(0)),
            json!(60)
        );
        assert_eq!(
            parse_text(&PrimitiveType::Text, "  spaced ", &json!(""), &json!("")),
            json!("  spaced ")
        );
    }
}
