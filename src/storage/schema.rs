//! Database schema definitions

/// SQL to create the records table
pub const CREATE_RECORDS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS records (
    id INTEGER PRIMARY KEY,
    text TEXT,
    number INTEGER,
    date TEXT,
    image BLOB,
    signature BLOB
)
"#;

/// Column list shared by every SELECT against `records`
pub const RECORD_COLUMNS: &str = "id, text, number, date, image, signature";

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    vec![CREATE_RECORDS_TABLE]
}
