use crate::shell::{Attachment, RecordView};
use crate::ui::theme::Theme;
use crate::ui::{theme, Icons};
use owo_colors::OwoColorize;

/// Width of the label column in a record card
const LABEL_WIDTH: usize = 10;

pub fn header(text: &str) {
    println!("{} {}", Icons::NOTE, text.style(theme().title));
}

pub fn success(label: &str) {
    println!("{} {}", Icons::CHECK, label.style(theme().done));
}

pub fn error(label: &str) {
    eprintln!("{} {}", Icons::CROSS, label.style(theme().failure));
}

pub fn info(label: &str, value: &str) {
    println!("{} {} {}", Icons::INFO, format!("{}:", label).style(theme().label), value);
}

/// An update or delete that matched no record
pub fn noop(id: i64, what: &str) {
    println!(
        "{} {}",
        Icons::EMPTY.style(theme().noop),
        format!("No record with id {}; nothing was {}", id, what).style(theme().noop)
    );
}

pub fn empty(text: &str) {
    println!("{} {}", Icons::EMPTY, text.style(theme().absent));
}

/// Picture status text, colored by whether it decoded
pub fn attachment_text(theme: &Theme, attachment: &Attachment) -> String {
    attachment.to_string().style(theme.attachment(attachment)).to_string()
}

fn field(label: &str, value: &str) {
    println!("  {} {}", format!("{:<LABEL_WIDTH$}", label).style(theme().label), value);
}

/// Print one record as a card
pub fn record_card(view: &RecordView) {
    println!();
    println!("{}", format!("━ Record {} ━", view.summary.id).style(theme().title));
    field("Text", &view.summary.text);
    field("Number", &view.summary.number.to_string());
    field("Date", &view.summary.date);
    field(&format!("{} Image", Icons::IMAGE), &attachment_text(theme(), &view.image));
    field(&format!("{} Signature", Icons::PEN), &attachment_text(theme(), &view.signature));
}
