use super::LineRecord;

const HEADER_COLUMNS: [&str; 3] = ["query", "docid", "rating"];

pub(crate) fn read_record(line: &str) -> LineRecord {
    let fields = split_csv_line(line);
    if is_header(&fields) {
        LineRecord::Header
    } else {
        LineRecord::Fields(fields)
    }
}

pub(crate) fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    fields.push(current.trim().to_string());

    fields
}

fn is_header(fields: &[String]) -> bool {
    fields.len() >= HEADER_COLUMNS.len()
        && fields
            .iter()
            .zip(HEADER_COLUMNS)
            .all(|(field, column)| field.eq_ignore_ascii_case(column))
}

pub(crate) fn escape_field(value: &str) -> String {
    if value.contains([',', '"']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
