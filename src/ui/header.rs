use crate::schema::{EntitySchema, ENTITIES};
use crate::ui::theme::{ACCENT, BORDER, SEPARATOR, TEXT};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

const APP_TITLE: &str = "Registrar";

/// Entity navigation tabs, numbered for their shortcut keys.
pub struct Header<'a> {
    active: &'a EntitySchema,
}

impl<'a> Header<'a> {
    pub fn new(active: &'a EntitySchema) -> Self {
        Self { active }
    }

    pub fn widget(&self) -> Paragraph<'static> {
        let text_style = Style::default().fg(TEXT);
        let separator_style = Style::default().fg(SEPARATOR);
        let active_style = Style::default().fg(ACCENT).add_modifier(Modifier::BOLD);

        let mut spans = vec![
            Span::styled("  ", text_style),
            Span::styled(APP_TITLE, text_style.add_modifier(Modifier::BOLD)),
        ];
        for (index, entity) in ENTITIES.iter().enumerate() {
            spans.push(Span::styled("  │  ", separator_style));
            let style = if entity.name == self.active.name {
                active_style
            } else {
                text_style
            };
            spans.push(Span::styled(format!("{} {}", index + 1, entity.title), style));
        }

        Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::TOP | Borders::BOTTOM)
                .border_style(Style::default().fg(BORDER)),
        )
    }
}
