pub mod compare;
pub mod export_judgments;
pub mod highlight;
pub mod parse_judgments;
pub mod parse_query_set;
pub mod preview;
