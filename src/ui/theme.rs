use owo_colors::Style;
use std::sync::OnceLock;
use crate::shell::Attachment;

static THEME: OnceLock<Theme> = OnceLock::new();

/// Styles for record output.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Record headings and banners
    pub title: Style,
    /// Field labels in a record card
    pub label: Style,
    /// A write that took effect
    pub done: Style,
    /// An operation that matched nothing
    pub noop: Style,
    pub failure: Style,
    /// Decoded pictures
    pub picture: Style,
    /// Missing values and empty listings
    pub absent: Style,
}

impl Theme {
    /// Colors only when stdout is a terminal and `NO_COLOR`/`CLICOLOR` allow it
    pub fn for_stdout() -> Self {
        if console::Term::stdout().is_term() && console::colors_enabled() {
            Self::colored()
        } else {
            Self::plain()
        }
    }

    pub fn colored() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().white().dimmed(),
            done: Style::new().green().bold(),
            noop: Style::new().yellow().italic(),
            failure: Style::new().red().bold(),
            picture: Style::new().magenta(),
            absent: Style::new().bright_black(),
        }
    }

    pub fn plain() -> Self {
        let none = Style::new();
        Self {
            title: none,
            label: none,
            done: none,
            noop: none,
            failure: none,
            picture: none,
            absent: none,
        }
    }

    /// Style for a stored picture's decode status
    pub fn attachment(&self, attachment: &Attachment) -> Style {
        match attachment {
            Attachment::Absent => self.absent,
            Attachment::Image { .. } => self.picture,
            Attachment::Malformed { .. } => self.failure,
        }
    }
}

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::for_stdout)
}
