use serde::Serialize;

/// Key of the server-assigned identifier field.
pub const ID_KEY: &str = "id";

/// Input type of a field, mirroring the widget used to edit it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Text,
    Email,
    Date,
    Number,
    Select,
    Textarea,
    Tel,
}

impl DataType {
    pub fn as_str(self) -> &'static str {
        match self {
            DataType::Text => "text",
            DataType::Email => "email",
            DataType::Date => "date",
            DataType::Number => "number",
            DataType::Select => "select",
            DataType::Textarea => "textarea",
            DataType::Tel => "tel",
        }
    }

    /// Placeholder hint shown in empty single-line inputs.
    pub fn hint(self) -> Option<&'static str> {
        match self {
            DataType::Email => Some("name@example.com"),
            DataType::Date => Some("YYYY-MM-DD"),
            DataType::Tel => Some("phone number"),
            _ => None,
        }
    }
}

/// Numeric input constraints. Absent bounds are not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct NumberBounds {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: Option<f64>,
}

/// Metadata describing one attribute of an entity's records.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldDescriptor {
    pub key: &'static str,
    pub label: &'static str,
    pub data_type: DataType,
    pub show_in_table: bool,
    pub required: bool,
    pub sortable: bool,
    pub editable: bool,
    pub bounds: Option<NumberBounds>,
    /// Allowed values for `select` fields, in display order.
    pub options: &'static [&'static str],
}

impl FieldDescriptor {
    /// Visible, sortable, editable, optional field.
    pub const fn new(key: &'static str, label: &'static str, data_type: DataType) -> Self {
        Self {
            key,
            label,
            data_type,
            show_in_table: true,
            required: false,
            sortable: true,
            editable: true,
            bounds: None,
            options: &[],
        }
    }

    /// The server-assigned identifier column.
    pub const fn id() -> Self {
        Self::new(ID_KEY, "ID", DataType::Text).read_only()
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn read_only(mut self) -> Self {
        self.editable = false;
        self
    }

    pub const fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    pub const fn hidden(mut self) -> Self {
        self.show_in_table = false;
        self
    }

    pub const fn bounded(mut self, min: Option<f64>, max: Option<f64>, step: Option<f64>) -> Self {
        self.bounds = Some(NumberBounds { min, max, step });
        self
    }

    pub const fn choices(mut self, options: &'static [&'static str]) -> Self {
        self.options = options;
        self
    }

    pub fn is_id(&self) -> bool {
        self.key == ID_KEY
    }

    /// True when the field gets a widget in add/edit forms.
    pub fn is_form_field(&self) -> bool {
        self.editable && !self.is_id()
    }
}

/// One record category managed by the panel.
#[derive(Debug, PartialEq, Serialize)]
pub struct EntitySchema {
    /// Collection name, also the REST path segment.
    pub name: &'static str,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub fields: &'static [FieldDescriptor],
}

impl EntitySchema {
    /// Singular display name, e.g. "Student" for "Students".
    pub fn singular(&self) -> &'static str {
        self.title.strip_suffix('s').unwrap_or(self.title)
    }

    pub fn field(&self, key: &str) -> Option<&'static FieldDescriptor> {
        self.fields.iter().find(|field| field.key == key)
    }

    pub fn table_fields(&self) -> impl Iterator<Item = &'static FieldDescriptor> {
        self.fields.iter().filter(|field| field.show_in_table)
    }

    /// True when clicking the field's column header changes the sort.
    pub fn is_header_sortable(&self, key: &str) -> bool {
        self.field(key)
            .is_some_and(|field| field.show_in_table && field.sortable)
    }
}
