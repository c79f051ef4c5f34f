use tabled::{settings::Style, Table, Tabled};
use crate::shell::RecordView;

#[derive(Tabled)]
pub struct RecordRow {
    #[tabled(rename = "ID")]
    pub id: i64,
    #[tabled(rename = "Text")]
    pub text: String,
    #[tabled(rename = "Number")]
    pub number: i64,
    #[tabled(rename = "Date")]
    pub date: String,
    #[tabled(rename = "Image")]
    pub image: String,
    #[tabled(rename = "Signature")]
    pub signature: String,
}

impl From<&RecordView> for RecordRow {
    fn from(view: &RecordView) -> Self {
        Self {
            id: view.summary.id,
            text: view.summary.text.clone(),
            number: view.summary.number,
            date: view.summary.date.clone(),
            image: view.image.to_string(),
            signature: view.signature.to_string(),
        }
    }
}

pub fn record_table(views: &[RecordView]) -> String {
    if views.is_empty() {
        return String::new();
    }

    let rows: Vec<RecordRow> = views.iter().map(RecordRow::from).collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Record, RecordFields};

    #[test]
    fn test_record_table() {
        assert!(record_table(&[]).is_empty());

        let record = Record {
            id: 3,
            fields: RecordFields::new("hello", 5, "2024-01-01").with_image(Some(b"junk".to_vec())),
        };
        let table = record_table(&[RecordView::new(&record)]);
        assert!(table.contains("hello"));
        assert!(table.contains("2024-01-01"));
        assert!(table.contains("malformed image"));
    }
}
