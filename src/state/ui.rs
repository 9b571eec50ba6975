//! Local UI chrome state.
//!
//! DESIGN
//! ======
//! Keeps transient presentation concerns out of domain state (`room`, `game`)
//! so chrome controls can evolve independently of protocol data.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

/// Transient banner shown at the top of the shell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub is_error: bool,
}

/// UI state for dark mode and the global notice banner.
///
/// Provided via context as `RwSignal<UiState>`.
#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub dark_mode: bool,
    pub notice: Option<Notice>,
}

impl UiState {
    pub fn notify(&mut self, message: impl Into<String>) {
        self.notice = Some(Notice { message: message.into(), is_error: false });
    }

    pub fn notify_error(&mut self, message: impl Into<String>) {
        self.notice = Some(Notice { message: message.into(), is_error: true });
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }
}
