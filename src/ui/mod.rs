pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{empty, error, header, info, noop, record_card, success};
pub use table::record_table;
pub use theme::theme;
