use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::numeric::format_js_number;

pub const ID_FIELD: &str = "_id";

const RANK_FIELD: &str = "rank";
const HIGHLIGHT_FIELD: &str = "highlight";
const SOURCE_FIELD: &str = "_source";
const HIGHLIGHT_SEPARATOR: &str = " ... ";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Other(Value),
}

impl From<&Value> for FieldValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::String(text) => Self::Text(text.clone()),
            Value::Number(number) => number
                .as_f64()
                .map(Self::Number)
                .unwrap_or_else(|| Self::Other(value.clone())),
            other => Self::Other(other.clone()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    fields: Vec<(String, FieldValue)>,
}

impl Document {
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn text_fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.iter().filter_map(|(key, value)| match value {
            FieldValue::Text(text) => Some((key, text.as_str())),
            _ => None,
        })
    }

    fn insert_if_absent(&mut self, key: &str, value: &Value) {
        if self.get(key).is_none() {
            self.fields.push((key.to_string(), FieldValue::from(value)));
        }
    }
}

impl Serialize for Document {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_map(self.fields.iter().map(|(key, value)| (key, value)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultItem {
    #[serde(rename = "_id")]
    pub id: String,
    pub rank: usize,
    #[serde(flatten)]
    pub document: Document,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub highlight: BTreeMap<String, Vec<String>>,
}

impl ResultItem {
    pub fn from_json(position: usize, value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let id = match object.get(ID_FIELD)? {
            Value::String(text) if !text.is_empty() => text.clone(),
            Value::Number(number) => number.to_string(),
            _ => return None,
        };

        let rank = object
            .get(RANK_FIELD)
            .and_then(Value::as_f64)
            .filter(|rank| rank.is_finite() && *rank >= 1.0 && rank.fract() == 0.0)
            .map(|rank| rank as usize)
            .unwrap_or(position + 1);

        let mut document = Document::default();
        if let Some(source) = object.get(SOURCE_FIELD).and_then(Value::as_object) {
            for (key, value) in source {
                document.insert_if_absent(key, value);
            }
        }
        for (key, value) in object {
            if matches!(
                key.as_str(),
                ID_FIELD | RANK_FIELD | HIGHLIGHT_FIELD | SOURCE_FIELD
            ) {
                continue;
            }
            document.insert_if_absent(key, value);
        }

        let highlight = object
            .get(HIGHLIGHT_FIELD)
            .and_then(Value::as_object)
            .map(parse_highlight)
            .unwrap_or_default();

        Some(Self {
            id,
            rank,
            document,
            highlight,
        })
    }

    pub fn display_value(&self, field: &str) -> String {
        if field == ID_FIELD {
            return self.id.clone();
        }

        if let Some(fragments) = self.highlight.get(field).filter(|f| !f.is_empty()) {
            return fragments.join(HIGHLIGHT_SEPARATOR);
        }

        match self.document.get(field) {
            Some(FieldValue::Text(text)) => text.clone(),
            Some(FieldValue::Number(number)) => format_js_number(*number),
            _ => String::new(),
        }
    }
}

fn parse_highlight(object: &Map<String, Value>) -> BTreeMap<String, Vec<String>> {
    object
        .iter()
        .filter_map(|(field, fragments)| {
            let fragments = match fragments {
                Value::Array(values) => values
                    .iter()
                    .filter_map(Value::as_str)
                    .map(ToOwned::to_owned)
                    .collect::<Vec<_>>(),
                Value::String(text) => vec![text.clone()],
                _ => return None,
            };
            Some((field.clone(), fragments))
        })
        .collect()
}

pub fn items_from_json(value: &Value) -> Option<Vec<ResultItem>> {
    let elements = value.as_array()?;
    Some(
        elements
            .iter()
            .enumerate()
            .filter_map(|(position, element)| ResultItem::from_json(position, element))
            .collect(),
    )
}
