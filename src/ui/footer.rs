use crate::ui::theme::{ACCENT, BORDER, MUTED, SEPARATOR};
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

/// Key hints shown while the table has focus.
const TABLE_KEYS: &[(&str, &str)] = &[
    ("1-4", "Entity"),
    ("/", "Search"),
    ("o", "Sort"),
    ("s", "Sort column"),
    ("[ ]", "Page"),
    ("a", "Add"),
    ("e", "Edit"),
    ("d", "Delete"),
    ("r", "Refresh"),
    ("q", "Quit"),
];
const SEARCH_KEYS: &[(&str, &str)] = &[("type", "Filter"), ("Enter/Esc", "Back to table")];
const FORM_KEYS: &[(&str, &str)] = &[
    ("Tab", "Next field"),
    ("←/→", "Change option"),
    ("Enter", "Save"),
    ("Esc", "Cancel"),
];
const CONFIRM_KEYS: &[(&str, &str)] = &[("y", "Delete"), ("n/Esc", "Keep")];

/// Which key hints the footer shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FooterMode {
    Table,
    Search,
    Form,
    Confirm,
}

impl FooterMode {
    fn keys(self) -> &'static [(&'static str, &'static str)] {
        match self {
            FooterMode::Table => TABLE_KEYS,
            FooterMode::Search => SEARCH_KEYS,
            FooterMode::Form => FORM_KEYS,
            FooterMode::Confirm => CONFIRM_KEYS,
        }
    }
}

pub struct Footer {
    mode: FooterMode,
}

impl Footer {
    pub fn new(mode: FooterMode) -> Self {
        Self { mode }
    }

    /// Hints on the left, the crate version right-aligned.
    pub fn widget(&self, area: Rect) -> Paragraph<'static> {
        let key_style = Style::default().fg(ACCENT);
        let text_style = Style::default().fg(MUTED);
        let separator = Style::default().fg(SEPARATOR);

        let mut spans = vec![Span::raw(" ")];
        for (index, (key, action)) in self.mode.keys().iter().enumerate() {
            if index > 0 {
                spans.push(Span::styled(" │ ", separator));
            }
            spans.push(Span::styled(*key, key_style));
            spans.push(Span::styled(format!(" {action}"), text_style));
        }

        let version = format!("v{} ", env!("CARGO_PKG_VERSION"));
        let used: usize = spans.iter().map(|span| span.content.chars().count()).sum();
        let inner = usize::from(area.width.saturating_sub(2));
        let gap = inner.saturating_sub(used + version.chars().count());
        spans.push(Span::raw(" ".repeat(gap)));
        spans.push(Span::styled(version, text_style));

        Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(BORDER)),
        )
    }
}
