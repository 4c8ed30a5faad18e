use serde_json::{Map, Value};

use super::{LineRecord, RecordError};

const DOC_ID_KEYS: [&str; 3] = ["docId", "docid", "doc_id"];

pub(crate) fn read_record(line: &str) -> LineRecord {
    let value: Value = match serde_json::from_str(line) {
        Ok(value) => value,
        Err(err) => {
            return LineRecord::Rejected(RecordError::InvalidJson {
                message: err.to_string(),
            });
        }
    };

    let Some(object) = value.as_object() else {
        return LineRecord::Rejected(RecordError::NotAnObject);
    };

    LineRecord::Fields(vec![
        text_field(object, &["query"]),
        text_field(object, &DOC_ID_KEYS),
        text_field(object, &["rating"]),
    ])
}

fn text_field(object: &Map<String, Value>, keys: &[&str]) -> String {
    keys.iter()
        .find_map(|key| object.get(*key))
        .map(|value| match value {
            Value::String(text) => text.trim().to_string(),
            Value::Number(number) => number.to_string(),
            _ => String::new(),
        })
        .unwrap_or_default()
}
