//! Back-end-facing vocabulary: the abstract diff output the scheduler emits
//! ([`PaintCommand`]) and the normalized input it consumes
//! ([`BackendEvent`]). Concrete terminal I/O (ANSI encoding, raw-mode
//! toggling, crossterm's event reader) lives outside this crate's scope;
//! this module only defines the interface a back-end implements.
//!
//! Grounded on the teacher's `renderer::diff::DiffRenderer`, which fuses
//! "what changed" with "how to write it to a crossterm `Write`r" into one
//! method — `SPEC_FULL` pulls the former out as these plain data types so a
//! test harness or an alternate front-end can consume a patch without
//! depending on `crossterm` at all.

use crate::error::ConfigError;
use crate::frame::CellRun;
use crate::input::{KeyEvent, MouseEvent};
use crate::types::Cell;

/// One instruction for a terminal back-end to carry out. Emitted by the
/// scheduler once per tick (a `CellRuns`/`FullRepaint` pair at most) plus
/// whenever cursor visibility or the alt-screen/mouse-capture state change.
#[derive(Debug, Clone, PartialEq)]
pub enum PaintCommand {
    FullRepaint { width: u16, height: u16, cells: Vec<Cell> },
    CellRuns(Vec<CellRun>),
    SetCursor { row: u16, col: u16, visible: bool },
    EnterAltScreen,
    ExitAltScreen,
    ShowCursor,
    HideCursor,
    Bell,
}

/// A decoded, already-canonical input event. Raw escape-sequence parsing is
/// a back-end concern; by the time an event reaches the scheduler it is one
/// of these.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    Paste(String),
    FocusGained,
    FocusLost,
}

/// Run-time knobs the scheduler and input router read at startup. Grounded
/// on the teacher's `App::builder` options (alt-screen/mouse toggles passed
/// as constructor args) — collected here into one record so a host can load
/// them from a file or CLI flags instead of threading separate parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Whether to switch the terminal into the alternate screen buffer on
    /// startup and restore the primary buffer on exit.
    pub alt_screen: bool,
    /// Whether to enable mouse capture (clicks, motion, scroll).
    pub mouse: bool,
    /// Maximum gap between two presses, in milliseconds, for the second to
    /// continue a click chain (double/triple click) rather than start a new
    /// one.
    pub click_interval_ms: u64,
    /// Maximum cell distance between two presses for the second to continue
    /// a click chain.
    pub double_click_cell_tolerance: u16,
    /// How many consecutive frames a focus-by-id request is retried before
    /// it is dropped.
    pub focus_retry_frames: u32,
    /// Whether to request bracketed-paste mode so multi-byte pastes arrive
    /// as one `BackendEvent::Paste` instead of a flood of key events.
    pub bracketed_paste: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            alt_screen: true,
            mouse: true,
            click_interval_ms: 400,
            double_click_cell_tolerance: 1,
            focus_retry_frames: 2,
            bracketed_paste: true,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.click_interval_ms == 0 {
            return Err(ConfigError::InvalidClickInterval(self.click_interval_ms));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn zero_click_interval_is_rejected() {
        let cfg = Config { click_interval_ms: 0, ..Config::default() };
        assert!(matches!(cfg.validate(), Err(ConfigError::InvalidClickInterval(0))));
    }
}
