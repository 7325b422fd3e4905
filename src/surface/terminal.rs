use crate::dispatcher::{DisplaySurface, PopupId};
use crate::error::{RemError, Result};
use colored::*;
use std::io::{self, Write};

const POPUP_WIDTH: usize = 44;

/// Renders reminders as text. Used when no desktop notification service is
/// around, and in tests.
pub struct TerminalSurface<W: Write> {
    out: W,
    open: Option<PopupId>,
    next_id: u64,
}

impl TerminalSurface<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            open: None,
            next_id: 0,
        }
    }

    #[cfg(test)]
    pub fn open_popup(&self) -> Option<PopupId> {
        self.open
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TerminalSurface<W> {
    fn emit(&mut self, lines: &[String]) -> Result<()> {
        let mut write = || -> io::Result<()> {
            for line in lines {
                writeln!(self.out, "{}", line)?;
            }
            self.out.flush()
        };
        write().map_err(|e| RemError::Display(format!("terminal write failed: {}", e)))
    }
}

impl<W: Write> DisplaySurface for TerminalSurface<W> {
    fn notifications_supported(&self) -> bool {
        true
    }

    fn show_native_notification(&mut self, title: &str, body: &str) -> Result<()> {
        self.emit(&[format!("{} {}", format!("[{}]", title).bold().blue(), body)])
    }

    fn show_popup(&mut self, message: &str, time: &str) -> Result<PopupId> {
        let border = "─".repeat(POPUP_WIDTH);
        self.emit(&[
            format!("┌{}┐", border).cyan().to_string(),
            format!("{} {}", "│".cyan(), message.bold()),
            format!("{} {}", "│".cyan(), time.dimmed()),
            format!("└{}┘", border).cyan().to_string(),
        ])?;

        self.next_id += 1;
        let id = PopupId(self.next_id);
        self.open = Some(id);
        Ok(id)
    }

    fn close_popup(&mut self, popup: PopupId) -> Result<()> {
        if self.open == Some(popup) {
            self.open = None;
            self.emit(&["(reminder dismissed)".dimmed().to_string()])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_native_notification_line() {
        plain();
        let mut surface = TerminalSurface::new(Vec::new());
        surface.show_native_notification("Time to drink water", "sip").unwrap();

        let out = String::from_utf8(surface.into_inner()).unwrap();
        assert_eq!(out, "[Time to drink water] sip\n");
    }

    #[test]
    fn test_popup_shows_message_and_time() {
        plain();
        let mut surface = TerminalSurface::new(Vec::new());
        let id = surface.show_popup("drink up", "10:15:00").unwrap();

        assert_eq!(surface.open_popup(), Some(id));
        let out = String::from_utf8(surface.into_inner()).unwrap();
        assert!(out.contains("drink up"));
        assert!(out.contains("10:15:00"));
    }

    #[test]
    fn test_close_only_matching_popup() {
        plain();
        let mut surface = TerminalSurface::new(Vec::new());
        let first = surface.show_popup("one", "10:00:00").unwrap();
        let second = surface.show_popup("two", "10:01:00").unwrap();

        surface.close_popup(first).unwrap();
        assert_eq!(surface.open_popup(), Some(second));

        surface.close_popup(second).unwrap();
        assert_eq!(surface.open_popup(), None);
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_is_a_display_error() {
        plain();
        let mut surface = TerminalSurface::new(BrokenPipe);

        let result = surface.show_popup("drink", "10:00:00");
        assert!(matches!(result, Err(RemError::Display(_))));
        assert_eq!(surface.open_popup(), None);

        let result = surface.show_native_notification("title", "drink");
        assert!(matches!(result, Err(RemError::Display(_))));
    }
}
