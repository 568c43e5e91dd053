use crate::schema::ENTITIES;
use crate::ui::controller::{PanelView, RemoteCommand, ViewController};
use crate::ui::footer::FooterMode;
use crate::ui::layout::{
    column_at, header_column_at, layout_regions, panel_regions, row_at, scroll_offset,
    ACTION_DELETE, ACTION_EDIT,
};
use crate::view::{Cell, TableBody};
use crate::ui::panel::{PanelIntent, PanelState};
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::warn;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Focus {
    Table,
    Search,
}

pub type CommandSender = mpsc::Sender<RemoteCommand>;

pub struct App {
    should_quit: bool,
    focus: Focus,
    size: Option<(u16, u16)>,
    controller: ViewController,
    commands: Option<CommandSender>,
    /// Header column targeted by the keyboard sort key.
    column: usize,
    notification_ttl: Duration,
}

impl App {
    pub fn new(controller: ViewController, notification_ttl: Duration) -> Self {
        Self {
            should_quit: false,
            focus: Focus::Table,
            size: None,
            controller,
            commands: None,
            column: 0,
            notification_ttl,
        }
    }

    pub fn set_command_sender(&mut self, sender: CommandSender) {
        self.commands = Some(sender);
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
    }

    pub fn state(&self) -> &PanelState {
        self.controller.state()
    }

    pub fn view(&self) -> PanelView {
        self.controller.view()
    }

    pub fn modal_title(&self) -> Option<String> {
        self.controller.modal_title()
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn footer_mode(&self) -> FooterMode {
        let state = self.state();
        if state.is_confirming() {
            FooterMode::Confirm
        } else if state.modal.is_open() {
            FooterMode::Form
        } else if self.focus == Focus::Search {
            FooterMode::Search
        } else {
            FooterMode::Table
        }
    }

    /// Load the first page.
    pub fn start(&mut self) {
        if let Some(command) = self.controller.start() {
            self.send_command(command);
        }
    }

    /// Reduce an intent and forward the remote call it implies.
    pub fn dispatch(&mut self, intent: PanelIntent) {
        if intent.is_remote_result() {
            tracing::trace!(?intent, "Remote result");
        }
        if let Some(command) = self.controller.dispatch(intent) {
            self.send_command(command);
        }
    }

    pub fn on_tick(&mut self) {
        self.controller
            .expire_notification(Instant::now(), self.notification_ttl);
    }

    pub fn on_resize(&mut self, cols: u16, rows: u16) {
        self.size = Some((cols, rows));
    }

    pub fn switch_entity(&mut self, index: usize) {
        let Some(entity) = ENTITIES.get(index) else {
            return;
        };
        self.focus = Focus::Table;
        self.column = 0;
        self.dispatch(PanelIntent::SwitchEntity(entity));
    }

    /// Move to the neighbouring entity tab, wrapping at both ends.
    pub fn cycle_entity(&mut self, forward: bool) {
        let len = ENTITIES.len();
        let current = ENTITIES
            .iter()
            .position(|entity| entity.name == self.state().entity.name)
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % len
        } else {
            (current + len - 1) % len
        };
        self.switch_entity(next);
    }

    pub fn move_column(&mut self, delta: isize) {
        let count = self.view().header.column_count();
        // The actions column is not sortable, so the cursor stops before it.
        let last = count.saturating_sub(2);
        self.column = self.column.saturating_add_signed(delta).min(last);
    }

    /// Sort by the column under the keyboard cursor.
    pub fn sort_by_column(&mut self) {
        let key = self.view().header.sort_key_at(self.column);
        if let Some(key) = key {
            self.dispatch(PanelIntent::HeaderClicked {
                key: key.to_string(),
            });
        }
    }

    /// Step through the sort dropdown options.
    pub fn cycle_sort(&mut self, forward: bool) {
        let view = self.view();
        let len = view.sort_options.len();
        if len == 0 {
            return;
        }
        let next = if forward {
            (view.selected_sort + 1) % len
        } else {
            (view.selected_sort + len - 1) % len
        };
        let sort = view.sort_options[next].sort.clone();
        self.dispatch(PanelIntent::SortSelected(sort));
    }

    pub fn push_search(&mut self, ch: char) {
        let mut text = self.state().query.search.clone();
        text.push(ch);
        self.dispatch(PanelIntent::SearchChanged { text });
    }

    pub fn pop_search(&mut self) {
        let mut text = self.state().query.search.clone();
        if text.pop().is_some() {
            self.dispatch(PanelIntent::SearchChanged { text });
        }
    }

    pub fn selected_id(&self) -> Option<String> {
        self.state()
            .selected_record()
            .and_then(crate::client::record_id)
    }

    pub fn edit_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            self.dispatch(PanelIntent::OpenEdit { id });
        }
    }

    pub fn delete_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            self.dispatch(PanelIntent::RequestDelete { id });
        }
    }

    /// Clicks are hit-tested against the table drawn for the current size:
    /// a header cell sorts, a data row selects, and the edit and delete
    /// triggers in the actions cell act on that row's record.
    pub fn on_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let state = self.state();
        if state.modal.is_open() || state.is_confirming() {
            return;
        }
        let Some((cols, rows)) = self.size else {
            return;
        };
        let (_, body, _) = layout_regions(Rect::new(0, 0, cols, rows));
        let table = panel_regions(body).table;
        let view = self.view();
        let header = &view.header;

        if let Some(column) = header_column_at(header, table, mouse.column, mouse.row) {
            self.focus = Focus::Table;
            self.column = column.min(header.column_count().saturating_sub(2));
            if let Some(key) = header.sort_key_at(column) {
                self.dispatch(PanelIntent::HeaderClicked {
                    key: key.to_string(),
                });
            }
            return;
        }

        let Some(drawn) = row_at(table, mouse.row) else {
            return;
        };
        let row = scroll_offset(self.state().selected_row, table) + drawn;
        if row >= self.state().records.len() {
            return;
        }
        let delta = row as isize - self.state().selected_row as isize;
        self.focus = Focus::Table;
        self.dispatch(PanelIntent::SelectRow { delta });

        let Some((column, offset)) = column_at(header, table, mouse.column) else {
            return;
        };
        let TableBody::Rows(rows) = &view.body else {
            return;
        };
        let Some(Cell::Actions { id: Some(id) }) =
            rows.get(row).and_then(|spec| spec.cells.get(column))
        else {
            return;
        };
        let edit_end = ACTION_EDIT.chars().count() as u16;
        let delete_start = edit_end + 1;
        let delete_end = delete_start + ACTION_DELETE.chars().count() as u16;
        if offset < edit_end {
            self.dispatch(PanelIntent::OpenEdit { id: id.clone() });
        } else if (delete_start..delete_end).contains(&offset) {
            self.dispatch(PanelIntent::RequestDelete { id: id.clone() });
        }
    }

    fn send_command(&mut self, command: RemoteCommand) {
        let Some(sender) = &self.commands else {
            return;
        };
        if let Err(err) = sender.try_send(command) {
            warn!(error = %err, "Dropping remote command");
        }
    }
}
