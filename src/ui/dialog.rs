//! Add/edit form and delete confirmation overlays.

use crate::ui::layout::centered_rect_by_size;
use crate::ui::panel::ModalState;
use crate::ui::theme::{ACCENT, MUTED, POPUP_BORDER, SELECTED_BG, TEXT};
use crate::view::{FormWidget, WidgetKind};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

const FORM_WIDTH: u16 = 64;
const CONFIRM_WIDTH: u16 = 50;
pub const CONFIRM_MESSAGE: &str = "Are you sure you want to delete this record?";

pub fn render_form_dialog(frame: &mut Frame, area: Rect, title: &str, modal: &ModalState) {
    let ModalState::Open { form, focused, .. } = modal else {
        return;
    };

    let mut lines = Vec::with_capacity(form.len() * 2);
    for (index, widget) in form.widgets.iter().enumerate() {
        let is_focused = index == *focused;
        let label_style = if is_focused {
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(TEXT)
        };
        lines.push(Line::from(Span::styled(format!(" {}", widget.label), label_style)));

        let mut value_line = Line::from(value_spans(widget, is_focused));
        if is_focused {
            value_line = value_line.style(Style::default().bg(SELECTED_BG));
        }
        lines.push(value_line);
    }

    let height = (lines.len() as u16).saturating_add(2);
    let rect = centered_rect_by_size(area, FORM_WIDTH, height);
    frame.render_widget(Clear, rect);
    let block = Block::default()
        .title(Span::styled(format!(" {title} "), Style::default().fg(ACCENT)))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(POPUP_BORDER));
    frame.render_widget(Paragraph::new(lines).block(block), rect);
}

fn value_spans(widget: &FormWidget, focused: bool) -> Vec<Span<'static>> {
    let text_style = Style::default().fg(TEXT);
    let muted = Style::default().fg(MUTED);
    let cursor = if focused { "▏" } else { "" };

    match &widget.kind {
        WidgetKind::Select { options } => {
            let label = options
                .iter()
                .find(|option| option.selected)
                .map(|option| option.label.clone())
                .unwrap_or_default();
            let style = if widget.value.is_empty() { muted } else { text_style };
            vec![
                Span::styled("   ◀ ", muted),
                Span::styled(label, style),
                Span::styled(" ▶", muted),
            ]
        }
        WidgetKind::Input { data_type } if widget.value.is_empty() => {
            let hint = data_type.hint().unwrap_or("");
            vec![
                Span::styled("   ", text_style),
                Span::styled(cursor, Style::default().fg(ACCENT)),
                Span::styled(hint, muted),
            ]
        }
        WidgetKind::TextArea => {
            let shown = widget.value.replace('\n', " ⏎ ");
            vec![
                Span::styled(format!("   {shown}"), text_style),
                Span::styled(cursor, Style::default().fg(ACCENT)),
            ]
        }
        WidgetKind::Input { .. } | WidgetKind::Number { .. } => vec![
            Span::styled(format!("   {}", widget.value), text_style),
            Span::styled(cursor, Style::default().fg(ACCENT)),
        ],
    }
}

/// Second line of the delete confirmation, naming the targeted record.
pub fn confirm_target(singular: &str, id: &str) -> String {
    format!("{singular} #{id}")
}

pub fn render_confirm_dialog(frame: &mut Frame, area: Rect, singular: &str, id: &str) {
    let rect = centered_rect_by_size(area, CONFIRM_WIDTH, 7);
    frame.render_widget(Clear, rect);
    let block = Block::default()
        .title(" Delete record ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(POPUP_BORDER));
    let lines = vec![
        Line::from(Span::styled(CONFIRM_MESSAGE, Style::default().fg(TEXT))),
        Line::from(Span::styled(
            confirm_target(singular, id),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("[y] ", Style::default().fg(ACCENT)),
            Span::styled("Delete    ", Style::default().fg(TEXT)),
            Span::styled("[n] ", Style::default().fg(ACCENT)),
            Span::styled("Cancel", Style::default().fg(TEXT)),
        ]),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block),
        rect,
    );
}
