use serde_json::{Number, Value};

use crate::document::RawDocument;

/// Signature of a caller-supplied validity resolver.
pub type FlagResolverFn = dyn Fn(&RawDocument) -> Option<bool> + Send + Sync;

/// Looks up `key` in a record.
///
/// An empty key or a `null` value counts as absent. `0`, `false` and `""` are
/// present values; the coercion functions decide whether they are significant.
pub fn lookup<'a>(raw: &'a RawDocument, key: &str) -> Option<&'a Value> {
    if key.is_empty() {
        return None;
    }
    raw.get(key).filter(|value| !value.is_null())
}

/// Renders a JSON value as display text.
///
/// `null` renders empty, strings verbatim, booleans and numbers in their
/// natural form. Integral floats drop the fractional part (`1.0` renders as
/// `1`); other floats use their shortest round-trip form, switching to
/// exponent notation for very small or large magnitudes (`1e-7`). Arrays and
/// objects render as compact JSON.
pub fn display_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => format_number(n),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

fn format_number(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < 1e21 => format!("{:.0}", f),
        _ => n.to_string(),
    }
}

/// Reads a string-valued field.
///
/// Returns `fallback` when no key is configured or the key is absent/`null`.
/// Non-string values are rendered with [`display_string`].
pub fn read_string(raw: &RawDocument, key: Option<&str>, fallback: Option<&str>) -> Option<String> {
    let fallback = || fallback.map(str::to_string);
    let Some(key) = key else {
        return fallback();
    };
    match lookup(raw, key) {
        Some(value) => Some(display_string(value)),
        None => fallback(),
    }
}

/// Status text derived from a validity flag.
pub fn validity_label(valid: bool) -> &'static str {
    if valid {
        "Valid"
    } else {
        "Invalid"
    }
}

/// Reads a boolean flag, returning `None` when validity cannot be determined.
///
/// Precedence:
/// 1. a resolver returning `Some(_)` wins;
/// 2. no key, or an absent/`null`/`""` value, is undetermined;
/// 3. booleans pass through and numbers are true when nonzero;
/// 4. strings are trimmed and lower-cased: `true`/`1` and `false`/`0` map to
///    their booleans, blank is undetermined, and any other text is `true`.
///
/// Arrays and objects are `true`.
pub fn read_boolean_flag(
    raw: &RawDocument,
    key: Option<&str>,
    resolver: Option<&FlagResolverFn>,
) -> Option<bool> {
    if let Some(resolved) = resolver.and_then(|resolve| resolve(raw)) {
        return Some(resolved);
    }

    let value = lookup(raw, key?)?;
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => Some(n.as_f64().map_or(true, |f| f != 0.0)),
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            "" => None,
            // Unrecognised text is truthy.
            _ => Some(true),
        },
        Value::Null => None,
        Value::Array(_) | Value::Object(_) => Some(true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> RawDocument {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn lookup_treats_null_as_absent_but_keeps_falsy_values() {
        let raw = record(json!({"a": null, "b": 0, "c": false, "d": ""}));
        assert!(lookup(&raw, "a").is_none());
        assert_eq!(lookup(&raw, "b"), Some(&json!(0)));
        assert_eq!(lookup(&raw, "c"), Some(&json!(false)));
        assert_eq!(lookup(&raw, "d"), Some(&json!("")));
        assert!(lookup(&raw, "").is_none());
    }

    #[test]
    fn read_string_stringifies_scalars() {
        let raw = record(json!({"n": 42, "f": 2.5, "whole": 3.0, "b": true, "s": "x"}));
        assert_eq!(read_string(&raw, Some("n"), None).as_deref(), Some("42"));
        assert_eq!(read_string(&raw, Some("f"), None).as_deref(), Some("2.5"));
        assert_eq!(read_string(&raw, Some("whole"), None).as_deref(), Some("3"));
        assert_eq!(read_string(&raw, Some("b"), None).as_deref(), Some("true"));
        assert_eq!(read_string(&raw, Some("s"), None).as_deref(), Some("x"));
    }

    #[test]
    fn read_string_falls_back_without_key_or_value() {
        let raw = record(json!({"present": null}));
        assert_eq!(read_string(&raw, None, Some("fb")).as_deref(), Some("fb"));
        assert_eq!(read_string(&raw, Some("present"), Some("")).as_deref(), Some(""));
        assert_eq!(read_string(&raw, Some("missing"), None), None);
    }

    #[test]
    fn boolean_flag_string_coercion() {
        let raw = record(json!({
            "upper": "TRUE",
            "zero": "0",
            "empty": "",
            "blank": "   ",
            "yes": "yes",
            "no": "no",
            "padded": "  False ",
        }));
        assert_eq!(read_boolean_flag(&raw, Some("upper"), None), Some(true));
        assert_eq!(read_boolean_flag(&raw, Some("zero"), None), Some(false));
        assert_eq!(read_boolean_flag(&raw, Some("empty"), None), None);
        assert_eq!(read_boolean_flag(&raw, Some("blank"), None), None);
        assert_eq!(read_boolean_flag(&raw, Some("padded"), None), Some(false));
    }

    #[test]
    fn boolean_flag_unrecognised_text_is_truthy() {
        let raw = record(json!({"yes": "yes", "no": "no", "revoked": "revoked"}));
        assert_eq!(read_boolean_flag(&raw, Some("yes"), None), Some(true));
        assert_eq!(read_boolean_flag(&raw, Some("no"), None), Some(true));
        assert_eq!(read_boolean_flag(&raw, Some("revoked"), None), Some(true));
    }

    #[test]
    fn boolean_flag_numbers_and_booleans() {
        let raw = record(json!({"zero": 0, "one": 1, "neg": -3, "f": 0.0, "t": true, "nil": null}));
        assert_eq!(read_boolean_flag(&raw, Some("zero"), None), Some(false));
        assert_eq!(read_boolean_flag(&raw, Some("one"), None), Some(true));
        assert_eq!(read_boolean_flag(&raw, Some("neg"), None), Some(true));
        assert_eq!(read_boolean_flag(&raw, Some("f"), None), Some(false));
        assert_eq!(read_boolean_flag(&raw, Some("t"), None), Some(true));
        assert_eq!(read_boolean_flag(&raw, Some("nil"), None), None);
        assert_eq!(read_boolean_flag(&raw, None, None), None);
    }

    #[test]
    fn boolean_flag_resolver_takes_precedence() {
        let raw = record(json!({"isValid": true}));
        let deny = |_: &RawDocument| Some(false);
        let abstain = |_: &RawDocument| None;
        assert_eq!(read_boolean_flag(&raw, Some("isValid"), Some(&deny)), Some(false));
        assert_eq!(read_boolean_flag(&raw, Some("isValid"), Some(&abstain)), Some(true));
        assert_eq!(read_boolean_flag(&raw, None, Some(&abstain)), None);
    }

    #[test]
    fn display_string_uses_shortest_float_form() {
        assert_eq!(display_string(&json!(1.5)), "1.5");
        assert_eq!(display_string(&json!(1e-7)), "1e-7");
        assert_eq!(display_string(&json!(4.0)), "4");
        assert_eq!(display_string(&json!(-0.125)), "-0.125");
    }

    #[test]
    fn display_string_renders_composites_as_json() {
        assert_eq!(display_string(&Value::Null), "");
        assert_eq!(display_string(&json!(["a", 1])), r#"["a",1]"#);
        assert_eq!(display_string(&json!({"k": "v"})), r#"{"k":"v"}"#);
    }
}
