use crate::ui::app::{App, Focus};
use crate::ui::panel::{ModalState, PanelIntent};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if is_ctrl_char(key, 'c') || is_ctrl_char(key, 'q') {
        app.request_quit();
        return;
    }

    if app.state().is_confirming() {
        handle_confirm_key(app, key);
        return;
    }
    if app.state().modal.is_open() {
        handle_form_key(app, key);
        return;
    }
    match app.focus() {
        Focus::Search => handle_search_key(app, key),
        Focus::Table => handle_table_key(app, key),
    }
}

fn handle_confirm_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
            app.dispatch(PanelIntent::ConfirmDelete)
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.dispatch(PanelIntent::CancelDelete)
        }
        _ => {}
    }
}

fn handle_form_key(app: &mut App, key: KeyEvent) {
    if is_ctrl_char(key, 's') {
        app.dispatch(PanelIntent::Submit);
        return;
    }
    let multiline = match &app.state().modal {
        ModalState::Open { form, focused, .. } => form
            .widgets
            .get(*focused)
            .is_some_and(|widget| widget.is_multiline()),
        ModalState::Closed => false,
    };
    match key.code {
        KeyCode::Esc => app.dispatch(PanelIntent::CloseModal),
        KeyCode::Tab | KeyCode::Down => app.dispatch(PanelIntent::FocusNext),
        KeyCode::BackTab | KeyCode::Up => app.dispatch(PanelIntent::FocusPrev),
        KeyCode::Left => app.dispatch(PanelIntent::CycleOption { forward: false }),
        KeyCode::Right => app.dispatch(PanelIntent::CycleOption { forward: true }),
        KeyCode::Backspace => app.dispatch(PanelIntent::Backspace),
        KeyCode::Enter if multiline && key.modifiers.contains(KeyModifiers::SHIFT) => {
            app.dispatch(PanelIntent::InputChar('\n'))
        }
        KeyCode::Enter => app.dispatch(PanelIntent::Submit),
        KeyCode::Char(ch) => app.dispatch(PanelIntent::InputChar(ch)),
        _ => {}
    }
}

fn handle_search_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Tab => app.set_focus(Focus::Table),
        KeyCode::Backspace => app.pop_search(),
        KeyCode::Char(ch) => app.push_search(ch),
        _ => {}
    }
}

fn handle_table_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.request_quit(),
        KeyCode::Char(ch @ '1'..='9') => {
            let index = ch.to_digit(10).unwrap_or(1) as usize;
            app.switch_entity(index - 1);
        }
        KeyCode::Tab => app.cycle_entity(true),
        KeyCode::BackTab => app.cycle_entity(false),
        KeyCode::Char('/') => app.set_focus(Focus::Search),
        KeyCode::Char('o') => app.cycle_sort(true),
        KeyCode::Char('O') => app.cycle_sort(false),
        KeyCode::Left | KeyCode::Char('h') => app.move_column(-1),
        KeyCode::Right | KeyCode::Char('l') => app.move_column(1),
        KeyCode::Char('s') => app.sort_by_column(),
        KeyCode::Char('[') | KeyCode::PageUp => app.dispatch(PanelIntent::PrevPage),
        KeyCode::Char(']') | KeyCode::PageDown => app.dispatch(PanelIntent::NextPage),
        KeyCode::Char('r') => app.dispatch(PanelIntent::Refresh),
        KeyCode::Up | KeyCode::Char('k') => app.dispatch(PanelIntent::SelectRow { delta: -1 }),
        KeyCode::Down | KeyCode::Char('j') => app.dispatch(PanelIntent::SelectRow { delta: 1 }),
        KeyCode::Char('a') | KeyCode::Char('n') => app.dispatch(PanelIntent::OpenAdd),
        KeyCode::Char('e') | KeyCode::Enter => app.edit_selected(),
        KeyCode::Char('d') | KeyCode::Delete => app.delete_selected(),
        _ => {}
    }
}

fn is_ctrl_char(key: KeyEvent, needle: char) -> bool {
    matches!(key.code, KeyCode::Char(ch) if ch.eq_ignore_ascii_case(&needle))
        && key.modifiers.contains(KeyModifiers::CONTROL)
}
