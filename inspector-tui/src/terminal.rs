//! Raw-mode terminal setup and teardown.

use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::{cursor, event, execute, terminal};

/// Puts the terminal in raw mode on the alternate screen; restores on drop.
pub struct Terminal {
    stdout: Stdout,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            event::EnableMouseCapture
        )?;
        Ok(Self { stdout })
    }

    pub fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    pub fn out(&mut self) -> &mut Stdout {
        &mut self.stdout
    }

    /// Block until at least one event arrives, then drain any pending ones.
    pub fn poll(&self, timeout: Duration) -> io::Result<Vec<event::Event>> {
        let mut events = Vec::new();
        if event::poll(timeout)? {
            events.push(event::read()?);
            while event::poll(Duration::ZERO)? {
                events.push(event::read()?);
            }
        }
        Ok(events)
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(
            self.stdout,
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
        let _ = self.stdout.flush();
    }
}
