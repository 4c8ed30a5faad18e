use super::JudgmentGroup;
use super::csv::escape_field;

pub fn to_csv(groups: &[JudgmentGroup]) -> String {
    let mut output = String::from("query,docid,rating\n");
    for group in groups {
        let query = escape_field(&group.query);
        for entry in &group.ratings {
            output.push_str(&format!(
                "{},{},{}\n",
                query,
                escape_field(&entry.doc_id),
                escape_field(&entry.rating)
            ));
        }
    }
    output
}
