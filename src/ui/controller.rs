//! Drives one records panel: reduces intents into [`PanelState`] and decides
//! which remote call, if any, each transition needs.

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::client::{ListQuery, Record, RecordStore};
use crate::schema::EntitySchema;
use crate::ui::mvi::Reducer;
use crate::ui::panel::{ModalMode, PanelIntent, PanelReducer, PanelState};
use crate::view::{
    sort_options, HeaderSpec, PaginationView, SortOption, TableBody, TableRenderer,
};

/// A remote call requested by a state transition. Executing it yields the
/// intent that reports the outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteCommand {
    Load {
        entity: &'static str,
        query: ListQuery,
    },
    Fetch {
        entity: &'static str,
        id: String,
    },
    Create {
        entity: &'static str,
        payload: Record,
    },
    Update {
        entity: &'static str,
        id: String,
        payload: Record,
    },
    Remove {
        entity: &'static str,
        id: String,
    },
}

impl RemoteCommand {
    pub async fn execute(self, store: &dyn RecordStore) -> PanelIntent {
        match self {
            RemoteCommand::Load { entity, query } => match store.list(entity, &query).await {
                Ok(page) => {
                    debug!(entity, records = page.records.len(), total = page.total, "Page loaded");
                    PanelIntent::PageLoaded {
                        records: page.records,
                        total: page.total,
                    }
                }
                Err(err) => {
                    warn!(entity, kind = err.kind(), error = %err, "Failed to load records");
                    PanelIntent::LoadFailed
                }
            },
            RemoteCommand::Fetch { entity, id } => match store.get_by_id(entity, &id).await {
                Ok(record) => PanelIntent::RecordFetched { id, record },
                Err(err) => {
                    warn!(entity, id = %id, kind = err.kind(), error = %err, "Failed to fetch record");
                    PanelIntent::FetchFailed
                }
            },
            RemoteCommand::Create { entity, payload } => match store.create(entity, &payload).await
            {
                Ok(_) => {
                    info!(entity, "Record created");
                    PanelIntent::Saved {
                        mode: ModalMode::Add,
                    }
                }
                Err(err) => {
                    warn!(entity, kind = err.kind(), error = %err, "Failed to create record");
                    PanelIntent::SaveFailed
                }
            },
            RemoteCommand::Update {
                entity,
                id,
                payload,
            } => match store.update(entity, &id, &payload).await {
                Ok(_) => {
                    info!(entity, id = %id, "Record updated");
                    PanelIntent::Saved {
                        mode: ModalMode::Edit { id },
                    }
                }
                Err(err) => {
                    warn!(entity, id = %id, kind = err.kind(), error = %err, "Failed to update record");
                    PanelIntent::SaveFailed
                }
            },
            RemoteCommand::Remove { entity, id } => match store.remove(entity, &id).await {
                Ok(()) => {
                    info!(entity, id = %id, "Record deleted");
                    PanelIntent::Deleted
                }
                Err(err) => {
                    warn!(entity, id = %id, kind = err.kind(), error = %err, "Failed to delete record");
                    PanelIntent::DeleteFailed
                }
            },
        }
    }
}

/// Remote work implied by an intent, decided against the state before the
/// transition.
enum Effect {
    None,
    Reload,
    Fetch(String),
    Save(ModalMode, Record),
    Remove(String),
}

impl Effect {
    fn of(state: &PanelState, intent: &PanelIntent) -> Self {
        match intent {
            PanelIntent::SwitchEntity(_)
            | PanelIntent::SearchChanged { .. }
            | PanelIntent::SortSelected(_)
            | PanelIntent::Refresh
            | PanelIntent::Saved { .. }
            | PanelIntent::Deleted => Effect::Reload,
            PanelIntent::HeaderClicked { key } if state.entity.is_header_sortable(key) => {
                Effect::Reload
            }
            PanelIntent::NextPage if state.pagination().has_next() => Effect::Reload,
            PanelIntent::PrevPage if state.pagination().has_previous() => Effect::Reload,
            PanelIntent::OpenEdit { id } => Effect::Fetch(id.clone()),
            PanelIntent::Submit => match state.modal.submission() {
                Some(Ok((mode, payload))) => Effect::Save(mode, payload),
                _ => Effect::None,
            },
            PanelIntent::ConfirmDelete => match &state.confirm_delete {
                Some(id) => Effect::Remove(id.clone()),
                None => Effect::None,
            },
            _ => Effect::None,
        }
    }
}

/// Pure description of what the panel shows.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelView {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub header: HeaderSpec,
    pub body: TableBody,
    pub pagination: PaginationView,
    pub sort_options: Vec<SortOption>,
    /// Index into `sort_options` matching the active sort.
    pub selected_sort: usize,
    pub search: String,
    pub loading: bool,
}

pub struct ViewController {
    state: PanelState,
    notified_at: Option<Instant>,
}

impl ViewController {
    pub fn new(entity: &'static EntitySchema, page_size: u32) -> Self {
        Self {
            state: PanelState::new(entity, page_size),
            notified_at: None,
        }
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    /// Initial load of the first page.
    pub fn start(&mut self) -> Option<RemoteCommand> {
        self.dispatch(PanelIntent::Refresh)
    }

    pub fn dispatch(&mut self, intent: PanelIntent) -> Option<RemoteCommand> {
        let effect = Effect::of(&self.state, &intent);
        if let PanelIntent::SwitchEntity(entity) = &intent {
            info!(entity = entity.name, "Switching entity");
        }

        let notices = self.state.notices;
        self.state = PanelReducer::reduce(std::mem::take(&mut self.state), intent);
        if self.state.notification.is_none() {
            self.notified_at = None;
        } else if self.state.notices != notices {
            self.notified_at = Some(Instant::now());
        }

        let entity = self.state.entity.name;
        match effect {
            Effect::None => None,
            Effect::Reload => Some(RemoteCommand::Load {
                entity,
                query: self.state.query.to_list_query(),
            }),
            Effect::Fetch(id) => Some(RemoteCommand::Fetch { entity, id }),
            Effect::Save(ModalMode::Add, payload) => {
                Some(RemoteCommand::Create { entity, payload })
            }
            Effect::Save(ModalMode::Edit { id }, payload) => Some(RemoteCommand::Update {
                entity,
                id,
                payload,
            }),
            Effect::Remove(id) => Some(RemoteCommand::Remove { entity, id }),
        }
    }

    /// Dismiss a notification shown for at least `ttl`. Returns true when
    /// one was dismissed.
    pub fn expire_notification(&mut self, now: Instant, ttl: Duration) -> bool {
        let Some(shown_at) = self.notified_at else {
            return false;
        };
        if now.saturating_duration_since(shown_at) < ttl {
            return false;
        }
        self.dispatch(PanelIntent::DismissNotification);
        true
    }

    /// "Add New Student" or "Edit Student" while a form is open.
    pub fn modal_title(&self) -> Option<String> {
        let singular = self.state.entity.singular();
        self.state.modal.mode().map(|mode| match mode {
            ModalMode::Add => format!("Add New {singular}"),
            ModalMode::Edit { .. } => format!("Edit {singular}"),
        })
    }

    pub fn view(&self) -> PanelView {
        let fields = self.state.entity.fields;
        let sort = self.state.query.sort.as_ref();
        let sort_options = sort_options(fields);
        let selected_sort = sort_options
            .iter()
            .position(|option| option.sort.as_ref() == sort)
            .unwrap_or(0);
        PanelView {
            title: self.state.entity.title,
            subtitle: self.state.entity.subtitle,
            header: TableRenderer::render_header(fields, sort),
            body: TableRenderer::render_rows(fields, &self.state.records),
            pagination: self.state.pagination(),
            sort_options,
            selected_sort,
            search: self.state.query.search.clone(),
            loading: self.state.loading,
        }
    }
}
