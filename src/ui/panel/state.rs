use crate::client::{ListQuery, Record, SortSpec};
use crate::schema::{EntitySchema, ENTITIES};
use crate::ui::mvi::UiState;
use crate::view::{FormSpec, FormViolation, PaginationView};

pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Parameters of the next list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    /// 1-based.
    pub page: u32,
    pub page_size: u32,
    pub search: String,
    pub sort: Option<SortSpec>,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            search: String::new(),
            sort: None,
        }
    }
}

impl QueryState {
    pub fn to_list_query(&self) -> ListQuery {
        let query = ListQuery::page(self.page, self.page_size).with_search(&self.search);
        match &self.sort {
            Some(sort) => query.with_sort(sort.clone()),
            None => query,
        }
    }

    /// Back to page 1 with no search and no sort.
    pub fn reset(&mut self) {
        *self = Self {
            page_size: self.page_size,
            ..Self::default()
        };
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalMode {
    Add,
    Edit { id: String },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ModalState {
    #[default]
    Closed,
    Open {
        mode: ModalMode,
        form: FormSpec,
        /// Index of the focused widget.
        focused: usize,
    },
}

impl ModalState {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }

    pub fn mode(&self) -> Option<&ModalMode> {
        match self {
            Self::Open { mode, .. } => Some(mode),
            Self::Closed => None,
        }
    }

    pub fn form(&self) -> Option<&FormSpec> {
        match self {
            Self::Open { form, .. } => Some(form),
            Self::Closed => None,
        }
    }

    /// Mode and request body of a submission, or the first violated input
    /// constraint. `None` when no form is open.
    pub fn submission(&self) -> Option<Result<(ModalMode, Record), FormViolation>> {
        let Self::Open { mode, form, .. } = self else {
            return None;
        };
        Some(form.validate().map(|()| (mode.clone(), form.payload())))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Error,
        }
    }
}

/// Everything one records panel shows.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelState {
    pub entity: &'static EntitySchema,
    pub query: QueryState,
    pub modal: ModalState,
    /// Id of the record awaiting delete confirmation.
    pub confirm_delete: Option<String>,
    pub records: Vec<Record>,
    /// Total reported by the last successful load.
    pub total: u64,
    pub loading: bool,
    pub notification: Option<Notification>,
    /// Bumped every time a notification is raised.
    pub notices: u64,
    pub selected_row: usize,
}

impl Default for PanelState {
    fn default() -> Self {
        Self::new(&ENTITIES[0], DEFAULT_PAGE_SIZE)
    }
}

impl UiState for PanelState {}

impl PanelState {
    pub fn new(entity: &'static EntitySchema, page_size: u32) -> Self {
        Self {
            entity,
            query: QueryState {
                page_size: page_size.max(1),
                ..QueryState::default()
            },
            modal: ModalState::Closed,
            confirm_delete: None,
            records: Vec::new(),
            total: 0,
            loading: false,
            notification: None,
            notices: 0,
            selected_row: 0,
        }
    }

    pub fn pagination(&self) -> PaginationView {
        PaginationView::new(self.query.page, self.query.page_size, self.total)
    }

    pub fn selected_record(&self) -> Option<&Record> {
        self.records.get(self.selected_row)
    }

    pub fn is_confirming(&self) -> bool {
        self.confirm_delete.is_some()
    }
}
