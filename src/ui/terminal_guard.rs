use crossterm::cursor::{Hide, Show};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, Clear as TermClear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub type PanelTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Leaves raw mode, the alternate screen and mouse capture when dropped or
/// when the process panics, whichever comes first.
pub struct TerminalGuard {
    active: Arc<AtomicBool>,
}

impl TerminalGuard {
    fn arm() -> Self {
        let active = Arc::new(AtomicBool::new(true));
        let hook_flag = Arc::clone(&active);
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            restore_once(&hook_flag);
            previous(info);
        }));
        Self { active }
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore_once(&self.active);
    }
}

fn restore_once(active: &AtomicBool) {
    if !active.swap(false, Ordering::SeqCst) {
        return;
    }
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = stdout.execute(DisableMouseCapture);
    let _ = stdout.execute(LeaveAlternateScreen);
    let _ = stdout.execute(Show);
}

pub fn setup_terminal() -> io::Result<(PanelTerminal, TerminalGuard)> {
    enable_raw_mode()?;
    let guard = TerminalGuard::arm();

    let mut stdout = io::stdout();
    stdout
        .execute(EnterAlternateScreen)?
        .execute(EnableMouseCapture)?
        .execute(TermClear(ClearType::All))?
        .execute(Hide)?;

    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    Ok((terminal, guard))
}
