//! Terminal session guard.

use crossterm::{
    cursor, execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::warn;
use std::io;

/// Raw mode, alternate screen and hidden cursor for as long as it lives.
pub struct TerminalSession {
    alternate_screen: bool,
}

impl TerminalSession {
    /// Enter raw mode, optionally switch to the alternate screen and hide
    /// the cursor.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal setup fails. Raw mode is left again
    /// before returning.
    pub fn enter(alternate_screen: bool) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let session = Self { alternate_screen };

        let mut stdout = io::stdout();
        if alternate_screen {
            execute!(stdout, EnterAlternateScreen)?;
        }
        execute!(stdout, cursor::Hide)?;
        Ok(session)
    }

    /// Current terminal size as (columns, rows).
    ///
    /// # Errors
    ///
    /// Returns an error if the size cannot be queried.
    pub fn size() -> io::Result<(u16, u16)> {
        terminal::size()
    }

    fn restore(&self) -> io::Result<()> {
        let mut stdout = io::stdout();
        execute!(stdout, cursor::Show)?;
        if self.alternate_screen {
            execute!(stdout, LeaveAlternateScreen)?;
        }
        terminal::disable_raw_mode()
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            warn!("Failed to restore terminal: {e}");
        }
    }
}
