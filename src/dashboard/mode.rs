use crate::dashboard::error::{DashboardError, Result};

/// Interaction mode of a dashboard session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Viewing,
    Customizing,
}

impl Mode {
    pub fn allows_edits(&self) -> bool {
        matches!(self, Mode::Customizing)
    }

    pub fn require_customizing(&self) -> Result<()> {
        if self.allows_edits() {
            Ok(())
        } else {
            Err(DashboardError::InvalidMode)
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Viewing => "viewing",
            Mode::Customizing => "customizing",
        }
    }
}

/// Two-state switch behind the "Customize / Done" control. Only a toggle is
/// exposed; there is no way to jump to a specific mode.
#[derive(Clone, Debug, Default)]
pub struct ModeController {
    mode: Mode,
}

impl ModeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn toggle(&mut self) -> Mode {
        self.mode = match self.mode {
            Mode::Viewing => Mode::Customizing,
            Mode::Customizing => Mode::Viewing,
        };
        tracing::debug!(mode = self.mode.as_str(), "dashboard mode toggled");
        self.mode
    }
}
