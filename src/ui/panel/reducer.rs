use crate::client::SortSpec;
use crate::ui::mvi::Reducer;
use crate::ui::panel::intent::PanelIntent;
use crate::ui::panel::state::{ModalMode, ModalState, Notification, PanelState};
use crate::view::FormRenderer;

pub const LOAD_FAILED: &str = "Failed to load data";
pub const FETCH_FAILED: &str = "Failed to load record";
pub const SAVE_FAILED: &str = "Failed to save record";
pub const DELETE_FAILED: &str = "Failed to delete record";
pub const CREATED: &str = "Record created successfully";
pub const UPDATED: &str = "Record updated successfully";
pub const DELETED: &str = "Record deleted successfully";

pub struct PanelReducer;

impl Reducer for PanelReducer {
    type State = PanelState;
    type Intent = PanelIntent;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            PanelIntent::SwitchEntity(entity) => {
                state.entity = entity;
                state.query.reset();
                state.modal = ModalState::Closed;
                state.confirm_delete = None;
                state.records.clear();
                state.total = 0;
                state.selected_row = 0;
                state.loading = true;
            }
            PanelIntent::SearchChanged { text } => {
                state.query.search = text;
                state.query.page = 1;
                state.loading = true;
            }
            PanelIntent::SortSelected(sort) => {
                state.query.sort = sort;
                state.loading = true;
            }
            PanelIntent::HeaderClicked { key } => {
                if !state.entity.is_header_sortable(&key) {
                    return state;
                }
                state.query.sort = Some(match state.query.sort.take() {
                    Some(current) if current.field == key => {
                        SortSpec::new(key, current.order.toggled())
                    }
                    _ => SortSpec::ascending(key),
                });
                state.loading = true;
            }
            PanelIntent::NextPage => {
                if state.pagination().has_next() {
                    state.query.page += 1;
                    state.loading = true;
                }
            }
            PanelIntent::PrevPage => {
                if state.pagination().has_previous() {
                    state.query.page -= 1;
                    state.loading = true;
                }
            }
            PanelIntent::Refresh => state.loading = true,

            PanelIntent::PageLoaded { records, total } => {
                state.selected_row = state.selected_row.min(records.len().saturating_sub(1));
                state.records = records;
                state.total = total;
                state.loading = false;
            }
            PanelIntent::LoadFailed => fail(&mut state, LOAD_FAILED),

            PanelIntent::OpenAdd => {
                state.confirm_delete = None;
                state.modal = ModalState::Open {
                    mode: ModalMode::Add,
                    form: FormRenderer::render(state.entity.fields, None),
                    focused: 0,
                };
            }
            PanelIntent::OpenEdit { .. } => state.loading = true,
            PanelIntent::RecordFetched { id, record } => {
                state.loading = false;
                state.confirm_delete = None;
                state.modal = ModalState::Open {
                    mode: ModalMode::Edit { id },
                    form: FormRenderer::render(state.entity.fields, Some(&record)),
                    focused: 0,
                };
            }
            PanelIntent::FetchFailed => fail(&mut state, FETCH_FAILED),
            PanelIntent::CloseModal => state.modal = ModalState::Closed,
            PanelIntent::FocusNext => move_focus(&mut state.modal, true),
            PanelIntent::FocusPrev => move_focus(&mut state.modal, false),
            PanelIntent::InputChar(ch) => {
                if let ModalState::Open { form, focused, .. } = &mut state.modal {
                    if let Some(widget) = form.widgets.get_mut(*focused) {
                        widget.push_char(ch);
                    }
                }
            }
            PanelIntent::Backspace => {
                if let ModalState::Open { form, focused, .. } = &mut state.modal {
                    if let Some(widget) = form.widgets.get_mut(*focused) {
                        widget.pop_char();
                    }
                }
            }
            PanelIntent::CycleOption { forward } => {
                if let ModalState::Open { form, focused, .. } = &mut state.modal {
                    if let Some(widget) = form.widgets.get_mut(*focused) {
                        widget.cycle_option(forward);
                    }
                }
            }
            PanelIntent::Submit => match state.modal.submission() {
                Some(Ok(_)) => state.loading = true,
                Some(Err(violation)) => {
                    notify(&mut state, Notification::error(violation.to_string()));
                }
                None => {}
            },
            PanelIntent::Saved { mode } => {
                state.modal = ModalState::Closed;
                let message = match mode {
                    ModalMode::Add => CREATED,
                    ModalMode::Edit { .. } => UPDATED,
                };
                notify(&mut state, Notification::success(message));
                state.loading = true;
            }
            PanelIntent::SaveFailed => fail(&mut state, SAVE_FAILED),

            PanelIntent::RequestDelete { id } => state.confirm_delete = Some(id),
            PanelIntent::ConfirmDelete => {
                if state.confirm_delete.take().is_some() {
                    state.loading = true;
                }
            }
            PanelIntent::CancelDelete => state.confirm_delete = None,
            PanelIntent::Deleted => {
                notify(&mut state, Notification::success(DELETED));
                state.loading = true;
            }
            PanelIntent::DeleteFailed => fail(&mut state, DELETE_FAILED),

            PanelIntent::SelectRow { delta } => {
                let last = state.records.len().saturating_sub(1);
                state.selected_row = state.selected_row.saturating_add_signed(delta).min(last);
            }
            PanelIntent::DismissNotification => state.notification = None,
        }
        state
    }
}

/// A remote call finished with an error: stop loading and tell the user.
fn fail(state: &mut PanelState, message: &str) {
    state.loading = false;
    notify(state, Notification::error(message));
}

/// Show `notification`, counting it as newly raised even when it repeats
/// the one already on screen.
fn notify(state: &mut PanelState, notification: Notification) {
    state.notification = Some(notification);
    state.notices = state.notices.wrapping_add(1);
}

fn move_focus(modal: &mut ModalState, forward: bool) {
    let ModalState::Open { form, focused, .. } = modal else {
        return;
    };
    let len = form.len();
    if len == 0 {
        return;
    }
    *focused = if forward {
        (*focused + 1) % len
    } else {
        (*focused + len - 1) % len
    };
}
