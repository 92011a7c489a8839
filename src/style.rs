use crate::timeline::event::PhaseLabels;

/// ANSI text transforms. Purely cosmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    Plain,
    Gray,
    Yellow,
    Red,
}

impl Highlight {
    fn code(self) -> Option<&'static str> {
        match self {
            Highlight::Plain => None,
            Highlight::Gray => Some("90"),
            Highlight::Yellow => Some("33"),
            Highlight::Red => Some("31"),
        }
    }

    pub fn paint(self, text: &str) -> String {
        match self.code() {
            Some(code) => format!("\x1b[{}m{}\x1b[39m", code, text),
            None => text.to_string(),
        }
    }
}

/// How a printed timeline looks: the three highlights and the phase labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineStyle {
    pub neutral: Highlight,
    pub warning: Highlight,
    pub strong_warning: Highlight,
    pub labels: PhaseLabels,
}

impl Default for TimelineStyle {
    fn default() -> Self {
        Self {
            neutral: Highlight::Gray,
            warning: Highlight::Yellow,
            strong_warning: Highlight::Red,
            labels: PhaseLabels::default(),
        }
    }
}

impl TimelineStyle {
    pub fn plain() -> Self {
        Self {
            neutral: Highlight::Plain,
            warning: Highlight::Plain,
            strong_warning: Highlight::Plain,
            labels: PhaseLabels::default(),
        }
    }

    pub fn for_color(color: bool) -> Self {
        if color {
            Self::default()
        } else {
            Self::plain()
        }
    }
}
