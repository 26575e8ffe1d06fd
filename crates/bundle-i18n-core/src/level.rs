/// Message severity, rendered as a coloured glyph prefix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Level {
    System,
    Success,
    Info,
    /// Client error, e.g. wrong input.
    Error,
    /// Server error.
    Fatal,
}

impl Level {
    pub const ALL: [Level; 5] = [
        Level::System,
        Level::Success,
        Level::Info,
        Level::Error,
        Level::Fatal,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Level::System => "system",
            Level::Success => "success",
            Level::Info => "info",
            Level::Error => "error",
            Level::Fatal => "fatal",
        }
    }

    /// `rrggbbaa` hex colour.
    pub const fn color(self) -> &'static str {
        match self {
            Level::System => "ffd600ff",
            Level::Success => "38d667ff",
            Level::Info => "87ceeaff",
            Level::Error => "e55454ff",
            Level::Fatal => "ff2300ff",
        }
    }

    pub const fn glyph(self) -> &'static str {
        match self {
            Level::System => "\u{e80f}",
            Level::Success => "\u{e800}",
            Level::Info => "\u{e837}",
            Level::Error => "\u{26a0}",
            Level::Fatal => "\u{e810}",
        }
    }

    pub fn decorate(self, text: &str) -> String {
        format!("[#{}]{} {}[]", self.color(), self.glyph(), text)
    }
}
