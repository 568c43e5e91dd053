//! Form generation from field metadata.

use serde_json::{Number, Value};
use thiserror::Error;

use crate::client::Record;
use crate::schema::{DataType, FieldDescriptor, NumberBounds};
use crate::view::{is_truthy, value_text};

/// Suffix appended to the labels of required fields.
const REQUIRED_MARKER: &str = " *";

/// Widget used to edit one field.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetKind {
    /// Single-line input of the given type (text, email, date, tel).
    Input { data_type: DataType },
    Number { bounds: NumberBounds },
    TextArea,
    /// Options start with the empty "Select {label}" placeholder.
    Select { options: Vec<SelectOption> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormWidget {
    pub key: &'static str,
    /// Plain field label, used in validation messages.
    pub field_label: &'static str,
    /// Display label, suffixed with `*` when required.
    pub label: String,
    pub required: bool,
    pub kind: WidgetKind,
    pub value: String,
}

/// An input constraint the form does not satisfy. Submission is blocked
/// until it is fixed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormViolation {
    #[error("Please fill in {label}")]
    Missing { label: String },

    #[error("{label} must be a number")]
    NotANumber { label: String },

    #[error("{label} must be at least {min}")]
    BelowMin { label: String, min: f64 },

    #[error("{label} must be at most {max}")]
    AboveMax { label: String, max: f64 },
}

impl FormWidget {
    pub fn is_multiline(&self) -> bool {
        matches!(self.kind, WidgetKind::TextArea)
    }

    /// Type a character. Selects ignore typing; number inputs only accept
    /// characters that can appear in a decimal number.
    pub fn push_char(&mut self, ch: char) {
        match self.kind {
            WidgetKind::Select { .. } => {}
            WidgetKind::Number { .. } => {
                if ch.is_ascii_digit() || matches!(ch, '.' | '-') {
                    self.value.push(ch);
                }
            }
            WidgetKind::TextArea => self.value.push(ch),
            WidgetKind::Input { .. } => {
                if ch != '\n' {
                    self.value.push(ch);
                }
            }
        }
    }

    pub fn pop_char(&mut self) {
        if !matches!(self.kind, WidgetKind::Select { .. }) {
            self.value.pop();
        }
    }

    /// Move the selection of a select widget, wrapping at both ends.
    pub fn cycle_option(&mut self, forward: bool) {
        let WidgetKind::Select { options } = &mut self.kind else {
            return;
        };
        if options.is_empty() {
            return;
        }
        let len = options.len();
        let current = options.iter().position(|option| option.selected).unwrap_or(0);
        let next = if forward {
            (current + 1) % len
        } else {
            (current + len - 1) % len
        };
        for (index, option) in options.iter_mut().enumerate() {
            option.selected = index == next;
        }
        self.value = options[next].value.clone();
    }

    fn validate(&self) -> Result<(), FormViolation> {
        let label = self.field_label.to_string();
        if self.value.is_empty() {
            if self.required {
                return Err(FormViolation::Missing { label });
            }
            return Ok(());
        }

        let WidgetKind::Number { bounds } = &self.kind else {
            return Ok(());
        };
        let number: f64 = self
            .value
            .trim()
            .parse()
            .map_err(|_| FormViolation::NotANumber {
                label: label.clone(),
            })?;
        if let Some(min) = bounds.min {
            if number < min {
                return Err(FormViolation::BelowMin { label, min });
            }
        }
        if let Some(max) = bounds.max {
            if number > max {
                return Err(FormViolation::AboveMax { label, max });
            }
        }
        Ok(())
    }

    fn payload_value(&self) -> Value {
        match self.kind {
            WidgetKind::Number { .. } => number_value(&self.value),
            _ => Value::String(self.value.clone()),
        }
    }
}

/// Empty or unparsable numbers become null; whole numbers stay integers.
fn number_value(text: &str) -> Value {
    let Ok(number) = text.trim().parse::<f64>() else {
        return Value::Null;
    };
    if number.fract() == 0.0 && number.abs() < 9_007_199_254_740_992.0 {
        return Value::from(number as i64);
    }
    Number::from_f64(number).map_or(Value::Null, Value::Number)
}

/// Editable description of an add/edit form.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormSpec {
    pub widgets: Vec<FormWidget>,
}

impl FormSpec {
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    pub fn widget(&self, key: &str) -> Option<&FormWidget> {
        self.widgets.iter().find(|widget| widget.key == key)
    }

    pub fn widget_mut(&mut self, key: &str) -> Option<&mut FormWidget> {
        self.widgets.iter_mut().find(|widget| widget.key == key)
    }

    /// First unmet input constraint, in form order.
    pub fn validate(&self) -> Result<(), FormViolation> {
        self.widgets.iter().try_for_each(FormWidget::validate)
    }

    /// JSON body for create/update calls.
    pub fn payload(&self) -> Record {
        self.widgets
            .iter()
            .map(|widget| (widget.key.to_string(), widget.payload_value()))
            .collect()
    }
}

pub struct FormRenderer;

impl FormRenderer {
    /// One widget per editable, non-id field, pre-filled from `existing`.
    pub fn render(fields: &[FieldDescriptor], existing: Option<&Record>) -> FormSpec {
        let widgets = fields
            .iter()
            .filter(|field| field.is_form_field())
            .map(|field| Self::widget(field, existing))
            .collect();
        FormSpec { widgets }
    }

    fn widget(field: &FieldDescriptor, existing: Option<&Record>) -> FormWidget {
        let current = existing.and_then(|record| record.get(field.key));
        let prefill = if is_truthy(current) {
            current.map(value_text).unwrap_or_default()
        } else {
            String::new()
        };

        let label = if field.required {
            format!("{}{}", field.label, REQUIRED_MARKER)
        } else {
            field.label.to_string()
        };

        let (kind, value) = match field.data_type {
            DataType::Select => {
                let chosen = current.and_then(Value::as_str);
                let mut options = vec![SelectOption {
                    value: String::new(),
                    label: format!("Select {}", field.label),
                    selected: false,
                }];
                options.extend(field.options.iter().map(|option| SelectOption {
                    value: option.to_string(),
                    label: option.to_string(),
                    selected: chosen == Some(*option),
                }));
                let value = options
                    .iter()
                    .find(|option| option.selected)
                    .map(|option| option.value.clone())
                    .unwrap_or_default();
                if value.is_empty() {
                    options[0].selected = true;
                }
                (WidgetKind::Select { options }, value)
            }
            DataType::Number => (
                WidgetKind::Number {
                    bounds: field.bounds.unwrap_or_default(),
                },
                prefill,
            ),
            DataType::Textarea => (WidgetKind::TextArea, prefill),
            data_type => (WidgetKind::Input { data_type }, prefill),
        };

        FormWidget {
            key: field.key,
            field_label: field.label,
            label,
            required: field.required,
            kind,
            value,
        }
    }
}
