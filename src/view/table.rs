//! Table headers, rows and the sort dropdown derived from field metadata.

use crate::client::{record_id, Record, SortOrder, SortSpec};
use crate::schema::FieldDescriptor;
use crate::view::{is_truthy, value_text, EMPTY_CELL};

pub const ACTIONS_LABEL: &str = "Actions";

/// Direction glyph shown next to the active sort column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortIndicator {
    Ascending,
    Descending,
}

impl SortIndicator {
    pub fn glyph(self) -> &'static str {
        match self {
            SortIndicator::Ascending => "▲",
            SortIndicator::Descending => "▼",
        }
    }
}

impl From<SortOrder> for SortIndicator {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::Asc => SortIndicator::Ascending,
            SortOrder::Desc => SortIndicator::Descending,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    /// Field key; `None` for the actions column.
    pub key: Option<&'static str>,
    pub label: String,
    /// Clicking the header changes the sort.
    pub sortable: bool,
    pub indicator: Option<SortIndicator>,
}

impl HeaderCell {
    /// Label with the direction glyph appended when sorted.
    pub fn title(&self) -> String {
        match self.indicator {
            Some(indicator) => format!("{} {}", self.label, indicator.glyph()),
            None => self.label.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderSpec {
    pub cells: Vec<HeaderCell>,
}

impl HeaderSpec {
    pub fn column_count(&self) -> usize {
        self.cells.len()
    }

    /// Field key of a clickable column.
    pub fn sort_key_at(&self, column: usize) -> Option<&'static str> {
        self.cells
            .get(column)
            .filter(|cell| cell.sortable)
            .and_then(|cell| cell.key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    /// Edit and delete triggers for the row's record.
    Actions { id: Option<String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSpec {
    pub id: Option<String>,
    pub cells: Vec<Cell>,
}

/// Placeholder shown instead of rows when the page is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub colspan: usize,
    pub title: &'static str,
    pub hint: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableBody {
    Rows(Vec<RowSpec>),
    Empty(EmptyState),
}

impl TableBody {
    /// Rendered row count; the empty state occupies one row.
    pub fn row_count(&self) -> usize {
        match self {
            TableBody::Rows(rows) => rows.len(),
            TableBody::Empty(_) => 1,
        }
    }
}

pub struct TableRenderer;

impl TableRenderer {
    pub fn render_header(fields: &[FieldDescriptor], sort: Option<&SortSpec>) -> HeaderSpec {
        let mut cells: Vec<HeaderCell> = fields
            .iter()
            .filter(|field| field.show_in_table)
            .map(|field| HeaderCell {
                key: Some(field.key),
                label: field.label.to_string(),
                sortable: field.sortable,
                indicator: sort
                    .filter(|sort| field.sortable && sort.field == field.key)
                    .map(|sort| sort.order.into()),
            })
            .collect();
        cells.push(HeaderCell {
            key: None,
            label: ACTIONS_LABEL.to_string(),
            sortable: false,
            indicator: None,
        });
        HeaderSpec { cells }
    }

    pub fn render_rows(fields: &[FieldDescriptor], records: &[Record]) -> TableBody {
        let visible: Vec<&FieldDescriptor> =
            fields.iter().filter(|field| field.show_in_table).collect();

        if records.is_empty() {
            return TableBody::Empty(EmptyState {
                colspan: visible.len() + 1,
                title: "No records found",
                hint: "Try adjusting your search or add a new record",
            });
        }

        let rows = records
            .iter()
            .map(|record| {
                let id = record_id(record);
                let mut cells: Vec<Cell> = visible
                    .iter()
                    .map(|field| Cell::Text(cell_text(record, field.key)))
                    .collect();
                cells.push(Cell::Actions { id: id.clone() });
                RowSpec { id, cells }
            })
            .collect();
        TableBody::Rows(rows)
    }
}

fn cell_text(record: &Record, key: &str) -> String {
    let value = record.get(key);
    if !is_truthy(value) {
        return EMPTY_CELL.to_string();
    }
    value.map(value_text).unwrap_or_else(|| EMPTY_CELL.to_string())
}

/// One entry of the sort dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOption {
    pub label: String,
    /// `None` is the "Sort by..." entry that clears the sort.
    pub sort: Option<SortSpec>,
}

/// "Sort by..." followed by A-Z and Z-A entries for every sortable field.
pub fn sort_options(fields: &[FieldDescriptor]) -> Vec<SortOption> {
    let mut options = vec![SortOption {
        label: "Sort by...".to_string(),
        sort: None,
    }];
    for field in fields.iter().filter(|field| field.sortable) {
        options.push(SortOption {
            label: format!("{} (A-Z)", field.label),
            sort: Some(SortSpec::new(field.key, SortOrder::Asc)),
        });
        options.push(SortOption {
            label: format!("{} (Z-A)", field.label),
            sort: Some(SortSpec::new(field.key, SortOrder::Desc)),
        });
    }
    options
}
