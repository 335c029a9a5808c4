use ratatui::prelude::Color;
use ratatui::prelude::Line;
use ratatui::prelude::Style;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Normal,
    Error,
}

/// A one-line status message shown inside the active wizard pane.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    kind: NoticeKind,
}

impl Notice {
    pub fn new(text: &str) -> Notice {
        return Notice {
            text: text.to_string(),
            kind: NoticeKind::Normal,
        };
    }

    pub fn new_with_kind(kind: NoticeKind, text: &str) -> Notice {
        return Notice {
            text: text.to_string(),
            kind,
        };
    }

    pub fn kind(&self) -> NoticeKind {
        return self.kind;
    }

    pub fn as_line(&self) -> Line<'_> {
        match self.kind {
            NoticeKind::Normal => {
                return Line::styled(self.text.as_str(), Style::default().fg(Color::Green));
            }
            NoticeKind::Error => {
                return Line::styled(self.text.as_str(), Style::default().fg(Color::Red));
            }
        }
    }
}
