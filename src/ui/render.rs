use crate::ui::app::{App, Focus};
use crate::ui::controller::PanelView;
use crate::ui::dialog::{render_confirm_dialog, render_form_dialog};
use crate::ui::footer::Footer;
use crate::ui::header::Header;
use crate::ui::layout::{
    column_widths, layout_regions, panel_regions, scroll_offset, ACTION_DELETE, ACTION_EDIT,
    COLUMN_SPACING,
};
use crate::ui::panel::{NotificationKind, PanelState};
use crate::ui::theme::{
    ACCENT, BORDER, FAILURE, MUTED, SELECTED_BG, SEPARATOR, SUCCESS, TEXT,
};
use crate::view::{Cell as ViewCell, TableBody};
use ratatui::layout::{Alignment, Constraint, Flex, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState};
use ratatui::Frame;

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();
    let (header, body, footer) = layout_regions(area);
    let state = app.state();
    let view = app.view();

    frame.render_widget(Header::new(state.entity).widget(), header);
    frame.render_widget(Clear, body);

    let regions = panel_regions(body);
    draw_toolbar(frame, regions.toolbar, app, &view);
    draw_table(frame, regions.table, app, &view);
    draw_status(frame, regions.status, state, &view);

    frame.render_widget(Footer::new(app.footer_mode()).widget(footer), footer);

    if let Some(title) = app.modal_title() {
        render_form_dialog(frame, body, &title, &state.modal);
    }
    if let Some(id) = &state.confirm_delete {
        render_confirm_dialog(frame, body, state.entity.singular(), id);
    }
}

fn draw_toolbar(frame: &mut Frame<'_>, area: Rect, app: &App, view: &PanelView) {
    let text_style = Style::default().fg(TEXT);
    let muted = Style::default().fg(MUTED);
    let searching = app.focus() == Focus::Search;

    let search_style = if searching {
        Style::default().fg(ACCENT)
    } else {
        muted
    };
    let search_text = if view.search.is_empty() && !searching {
        Span::styled("press / to search", muted)
    } else {
        Span::styled(view.search.clone(), text_style)
    };
    let mut search_line = vec![
        Span::styled(" Search: ", search_style),
        search_text,
    ];
    if searching {
        search_line.push(Span::styled("▏", Style::default().fg(ACCENT)));
    }
    let sort_label = view
        .sort_options
        .get(view.selected_sort)
        .map(|option| option.label.clone())
        .unwrap_or_default();
    search_line.push(Span::styled("  │  ", Style::default().fg(SEPARATOR)));
    search_line.push(Span::styled("Sort: ", muted));
    search_line.push(Span::styled(sort_label, text_style));

    let lines = vec![
        Line::from(vec![
            Span::styled(" ", text_style),
            Span::styled(view.title, text_style.add_modifier(Modifier::BOLD)),
        ]),
        Line::from(Span::styled(format!(" {}", view.subtitle), muted)),
        Line::from(search_line),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn draw_table(frame: &mut Frame<'_>, area: Rect, app: &App, view: &PanelView) {
    let state = app.state();
    let table_focused = app.focus() == Focus::Table && !state.modal.is_open();
    let header_cells = view.header.cells.iter().enumerate().map(|(index, cell)| {
        let mut style = Style::default().fg(TEXT).add_modifier(Modifier::BOLD);
        if cell.indicator.is_some() {
            style = style.fg(ACCENT);
        }
        if table_focused && index == app.column() {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        Cell::from(cell.title()).style(style)
    });
    let header_row = Row::new(header_cells);

    let rows: Vec<Row> = match &view.body {
        TableBody::Rows(rows) => rows
            .iter()
            .enumerate()
            .map(|(index, row)| {
                let cells = row.cells.iter().map(|cell| match cell {
                    ViewCell::Text(text) => Cell::from(text.clone()),
                    ViewCell::Actions { .. } => Cell::from(format!("{ACTION_EDIT} {ACTION_DELETE}"))
                        .style(Style::default().fg(MUTED)),
                });
                let style = if index == state.selected_row {
                    Style::default().bg(SELECTED_BG)
                } else {
                    Style::default()
                };
                Row::new(cells).style(style)
            })
            .collect(),
        TableBody::Empty(_) => Vec::new(),
    };

    let widths: Vec<Constraint> = column_widths(&view.header, area.width)
        .into_iter()
        .map(Constraint::Length)
        .collect();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(BORDER));
    let inner = block.inner(area);
    let table = Table::new(rows, widths)
        .header(header_row)
        .column_spacing(COLUMN_SPACING)
        .flex(Flex::Start)
        .block(block);
    let mut table_state = TableState::default();
    if !state.records.is_empty() {
        table_state = table_state
            .with_offset(scroll_offset(state.selected_row, area))
            .with_selected(Some(state.selected_row));
    }
    frame.render_stateful_widget(table, area, &mut table_state);

    if let TableBody::Empty(empty) = &view.body {
        let placeholder = Rect {
            y: inner.y.saturating_add(2),
            height: inner.height.saturating_sub(2).min(2),
            ..inner
        };
        let lines = vec![
            Line::from(Span::styled(
                empty.title,
                Style::default().fg(TEXT).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(empty.hint, Style::default().fg(MUTED))),
        ];
        frame.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center),
            placeholder,
        );
    }
}

fn draw_status(frame: &mut Frame<'_>, area: Rect, state: &PanelState, view: &PanelView) {
    let muted = Style::default().fg(MUTED);
    let enabled = Style::default().fg(TEXT);
    let pagination = &view.pagination;

    let mut spans = vec![
        Span::styled(
            " ◀ [ Prev",
            if pagination.has_previous() { enabled } else { muted },
        ),
        Span::styled(format!("  {}  ", pagination.label()), enabled),
        Span::styled(
            "Next ] ▶",
            if pagination.has_next() { enabled } else { muted },
        ),
        Span::styled(format!("  ({} total)", pagination.total), muted),
    ];
    if view.loading {
        spans.push(Span::styled("  Loading...", Style::default().fg(ACCENT)));
    }
    if let Some(notification) = &state.notification {
        let color = match notification.kind {
            NotificationKind::Success => SUCCESS,
            NotificationKind::Error => FAILURE,
        };
        spans.push(Span::styled("  │  ", Style::default().fg(SEPARATOR)));
        spans.push(Span::styled(
            notification.message.clone(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::schema_for;
    use crate::ui::controller::ViewController;
    use crate::ui::panel::PanelIntent;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::time::Duration;

    fn students_app(page_size: u32, count: usize) -> App {
        let controller = ViewController::new(schema_for("students").unwrap(), page_size);
        let mut app = App::new(controller, Duration::from_secs(3));
        let records = (1..=count)
            .map(|id| {
                serde_json::json!({"id": id, "firstName": format!("Student{id}")})
                    .as_object()
                    .cloned()
                    .unwrap()
            })
            .collect();
        app.dispatch(PanelIntent::PageLoaded {
            records,
            total: count as u64,
        });
        app
    }

    fn screen(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn table_scrolls_to_selected_row() {
        let mut app = students_app(25, 25);
        app.dispatch(PanelIntent::SelectRow { delta: 20 });
        let text = screen(&app, 100, 24);
        assert!(text.contains("Student21"), "{text}");
        assert!(!text.contains("Student5 "), "{text}");
    }

    #[test]
    fn unscrolled_table_starts_at_first_record() {
        let app = students_app(25, 25);
        let text = screen(&app, 100, 24);
        assert!(text.contains("Student1 "), "{text}");
        assert!(!text.contains("Student21"), "{text}");
    }

    #[test]
    fn delete_confirmation_names_the_record() {
        let mut app = students_app(10, 5);
        app.dispatch(PanelIntent::RequestDelete { id: "4".into() });
        let text = screen(&app, 100, 30);
        assert!(text.contains("Are you sure you want to delete this record?"));
        assert!(text.contains("Student #4"), "{text}");
    }
}
