mod intent;
mod reducer;
mod state;

pub use intent::PanelIntent;
pub use reducer::{
    PanelReducer, CREATED, DELETED, DELETE_FAILED, FETCH_FAILED, LOAD_FAILED, SAVE_FAILED,
    UPDATED,
};
pub use state::{
    ModalMode, ModalState, Notification, NotificationKind, PanelState, QueryState,
    DEFAULT_PAGE_SIZE,
};
