pub struct Icons;

impl Icons {
    pub const NOTE: &str = "📝";
    pub const CHECK: &str = "✅";
    pub const CROSS: &str = "❌";
    pub const INFO: &str = "ℹ️";
    pub const IMAGE: &str = "🖼️";
    pub const PEN: &str = "✍️";
    pub const EMPTY: &str = "∅";
}
