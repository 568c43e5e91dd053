use crate::client::{Record, SortSpec};
use crate::schema::EntitySchema;
use crate::ui::mvi::Intent;
use crate::ui::panel::ModalMode;

#[derive(Debug, Clone)]
pub enum PanelIntent {
    // Query
    SwitchEntity(&'static EntitySchema),
    /// Search text was edited; an empty string clears the search.
    SearchChanged { text: String },
    /// Sort dropdown selection; `None` clears the sort.
    SortSelected(Option<SortSpec>),
    /// Column header clicked. Ignored for columns that cannot sort.
    HeaderClicked { key: String },
    NextPage,
    PrevPage,
    Refresh,

    // Remote results
    PageLoaded { records: Vec<Record>, total: u64 },
    LoadFailed,

    // Modal
    OpenAdd,
    /// Edit requested; the record is fetched before the form opens.
    OpenEdit { id: String },
    RecordFetched { id: String, record: Record },
    FetchFailed,
    CloseModal,
    FocusNext,
    FocusPrev,
    InputChar(char),
    Backspace,
    CycleOption { forward: bool },
    Submit,
    Saved { mode: ModalMode },
    SaveFailed,

    // Delete
    RequestDelete { id: String },
    ConfirmDelete,
    CancelDelete,
    Deleted,
    DeleteFailed,

    // Misc
    SelectRow { delta: isize },
    DismissNotification,
}

impl Intent for PanelIntent {}

impl PanelIntent {
    /// True for intents that arrive from a finished remote call.
    pub fn is_remote_result(&self) -> bool {
        matches!(
            self,
            Self::PageLoaded { .. }
                | Self::LoadFailed
                | Self::RecordFetched { .. }
                | Self::FetchFailed
                | Self::Saved { .. }
                | Self::SaveFailed
                | Self::Deleted
                | Self::DeleteFailed
        )
    }
}
