use ratatui::layout::Rect;

use crate::view::HeaderSpec;

/// Gap between table columns.
pub const COLUMN_SPACING: u16 = 1;
/// Width reserved for the actions column.
pub const ACTIONS_WIDTH: u16 = 9;
const MIN_COLUMN_WIDTH: u16 = 3;
/// Edit trigger in the actions cell, followed by a space and the delete one.
pub const ACTION_EDIT: &str = "[e]";
pub const ACTION_DELETE: &str = "[d]";

pub fn layout_regions(area: Rect) -> (Rect, Rect, Rect) {
    let header_height = area.height.min(3);
    let footer_height = 3.min(area.height.saturating_sub(header_height));
    let header = Rect {
        x: area.x,
        y: area.y,
        width: area.width,
        height: header_height,
    };
    let footer = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(footer_height),
        width: area.width,
        height: footer_height,
    };
    let body = Rect {
        x: area.x,
        y: area.y + header_height,
        width: area.width,
        height: area.height.saturating_sub(header_height + footer_height),
    };
    (header, body, footer)
}

/// Regions of the records panel inside the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelRegions {
    /// Title, search and sort lines.
    pub toolbar: Rect,
    /// Bordered table, header row first.
    pub table: Rect,
    /// Pagination and notification line.
    pub status: Rect,
}

pub fn panel_regions(body: Rect) -> PanelRegions {
    let toolbar_height = body.height.min(3);
    let status_height = 1.min(body.height.saturating_sub(toolbar_height));
    let toolbar = Rect {
        height: toolbar_height,
        ..body
    };
    let status = Rect {
        y: body.y + body.height.saturating_sub(status_height),
        height: status_height,
        ..body
    };
    let table = Rect {
        y: body.y + toolbar_height,
        height: body
            .height
            .saturating_sub(toolbar_height + status_height),
        ..body
    };
    PanelRegions {
        toolbar,
        table,
        status,
    }
}

/// Column widths for a table drawn inside a bordered block of `width`.
/// Data columns share the space left after the actions column.
pub fn column_widths(header: &HeaderSpec, width: u16) -> Vec<u16> {
    let count = header.column_count() as u16;
    if count == 0 {
        return Vec::new();
    }
    let inner = width.saturating_sub(2);
    let data_columns = count.saturating_sub(1).max(1);
    let available = inner
        .saturating_sub(ACTIONS_WIDTH)
        .saturating_sub(COLUMN_SPACING * count.saturating_sub(1));
    let data_width = (available / data_columns).max(MIN_COLUMN_WIDTH);

    let mut widths = vec![data_width; usize::from(count - 1)];
    widths.push(ACTIONS_WIDTH);
    widths
}

/// Column under `x` and the offset of `x` inside that column. Clicks on
/// borders and column gaps hit nothing.
pub fn column_at(header: &HeaderSpec, table: Rect, x: u16) -> Option<(usize, u16)> {
    if x <= table.x || x >= table.x + table.width.saturating_sub(1) {
        return None;
    }
    let mut left = table.x + 1;
    for (index, width) in column_widths(header, table.width).into_iter().enumerate() {
        if x < left {
            return None;
        }
        if x < left + width {
            return Some((index, x - left));
        }
        left += width + COLUMN_SPACING;
    }
    None
}

/// Column under a click at `(x, y)`, if it lands on the header row of the
/// table drawn in `table`.
pub fn header_column_at(header: &HeaderSpec, table: Rect, x: u16, y: u16) -> Option<usize> {
    if y != table.y + 1 {
        return None;
    }
    column_at(header, table, x).map(|(index, _)| index)
}

/// Data rows that fit below the header inside the bordered table.
pub fn visible_rows(table: Rect) -> usize {
    usize::from(table.height.saturating_sub(3))
}

/// First drawn row: the smallest offset that keeps `selected` on screen.
pub fn scroll_offset(selected: usize, table: Rect) -> usize {
    let visible = visible_rows(table).max(1);
    (selected + 1).saturating_sub(visible)
}

/// Position, counted from the first drawn row, of the data row under a
/// click at `y`.
pub fn row_at(table: Rect, y: u16) -> Option<usize> {
    let first = table.y + 2;
    let last = table.y + table.height.saturating_sub(1);
    (y >= first && y < last).then(|| usize::from(y - first))
}

pub fn centered_rect_by_size(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
