//! Terminal width queries

/// Reports the terminal's column count, if it can.
pub trait TerminalWidth {
    fn columns(&self) -> Option<u16>;
}

/// Asks the controlling terminal through crossterm.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrosstermWidth;

impl TerminalWidth for CrosstermWidth {
    fn columns(&self) -> Option<u16> {
        match crossterm::terminal::size() {
            Ok((columns, _rows)) if columns > 0 => Some(columns),
            Ok(_) => None,
            Err(error) => {
                tracing::trace!(%error, "terminal size query failed");
                None
            }
        }
    }
}

/// A terminal of known width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedWidth(pub u16);

impl TerminalWidth for FixedWidth {
    fn columns(&self) -> Option<u16> {
        Some(self.0)
    }
}

/// A terminal that never reports a width.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnknownWidth;

impl TerminalWidth for UnknownWidth {
    fn columns(&self) -> Option<u16> {
        None
    }
}
