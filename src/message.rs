use serde_json::{Map, Value};

/// One telemetry snapshot: instrument field name to value.
pub type Message = Map<String, Value>;

/// Reads `field` as a number.
///
/// Booleans count as `1.0`/`0.0`. Strings, nulls and nested values are not
/// usable and behave like an absent field.
pub fn number(message: &Message, field: &str) -> Option<f64> {
    match message.get(field)? {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        other => {
            log::debug!("ignoring unusable value for {:?}: {}", field, other);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn message(value: Value) -> Message {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn numbers_and_booleans() {
        let msg = message(json!({"55": 1, "RPM": 812.5, "doorlock": false}));
        assert_eq!(number(&msg, "55"), Some(1.0));
        assert_eq!(number(&msg, "RPM"), Some(812.5));
        assert_eq!(number(&msg, "doorlock"), Some(0.0));
    }

    #[test]
    fn absent_or_unusable() {
        let msg = message(json!({"55": "1", "70": null, "85": [1]}));
        assert_eq!(number(&msg, "55"), None);
        assert_eq!(number(&msg, "70"), None);
        assert_eq!(number(&msg, "85"), None);
        assert_eq!(number(&msg, "500"), None);
    }
}
