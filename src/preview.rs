use serde::de::DeserializeOwned;
use tracing::debug;

use crate::judgments::JudgmentGroup;
use crate::query_set::QueryEntry;

pub fn decode_judgment_previews(items: &[String]) -> Vec<JudgmentGroup> {
    decode_each(items, "judgment")
}

pub fn decode_query_previews(items: &[String]) -> Vec<QueryEntry> {
    decode_each(items, "query")
}

fn decode_each<T: DeserializeOwned>(items: &[String], kind: &str) -> Vec<T> {
    items
        .iter()
        .enumerate()
        .filter_map(|(index, raw)| match serde_json::from_str::<T>(raw) {
            Ok(value) => Some(value),
            Err(err) => {
                debug!(kind, index, error = %err, "dropping malformed preview item");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{decode_judgment_previews, decode_query_previews};

    #[test]
    fn malformed_items_are_filtered_out() {
        let items = vec![
            r#"{"query":"laptop","ratings":[{"docId":"d1","rating":"1"}]}"#.to_string(),
            "{not json".to_string(),
            r#"{"query":"phone"}"#.to_string(),
            r#"{"query":"tablet","ratings":[]}"#.to_string(),
        ];

        let groups = decode_judgment_previews(&items);
        let queries = groups
            .iter()
            .map(|group| group.query.as_str())
            .collect::<Vec<_>>();
        assert_eq!(queries, vec!["laptop", "tablet"]);
        assert_eq!(groups[0].ratings[0].doc_id, "d1");
    }

    #[test]
    fn query_previews_keep_order() {
        let items = vec![
            r#"{"queryText":"b"}"#.to_string(),
            "[]".to_string(),
            r#"{"queryText":"a","referenceAnswer":"x"}"#.to_string(),
        ];

        let entries = decode_query_previews(&items);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].query_text, "b");
        assert_eq!(entries[1].reference_answer.as_deref(), Some("x"));
    }
}
