//! Pure state → presentation descriptions.
//!
//! Nothing in this module touches the terminal. The ratatui adapter in
//! `ui::render` and the plain-text adapter in [`text`] both consume these
//! descriptions.

mod form;
mod pagination;
mod table;
pub mod text;

use serde_json::Value;

pub use form::{FormRenderer, FormSpec, FormViolation, FormWidget, SelectOption, WidgetKind};
pub use pagination::PaginationView;
pub use table::{
    sort_options, Cell, EmptyState, HeaderCell, HeaderSpec, RowSpec, SortIndicator, SortOption,
    TableBody, TableRenderer,
};

/// Placeholder for missing or falsy cell values.
pub const EMPTY_CELL: &str = "-";

/// JavaScript-style truthiness: missing, null, false, 0 and "" are falsy.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(number)) => number.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(text)) => !text.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Display text of a JSON value; strings are shown without quotes.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
