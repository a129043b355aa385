use crate::window::WindowId;

/// Which part of a window a pointer drag grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragTarget {
    Move,
    LeftEdge,
    RightEdge,
    BottomEdge,
    BottomLeftCorner,
    BottomRightCorner,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Drag {
    pub window: WindowId,
    pub target: DragTarget,
    pub column: u16,
    pub row: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Desktop,
    /// Keystrokes edit the focused window's URL bar; `original` is restored on
    /// cancel.
    EditingUrl { window: WindowId, original: String },
}

/// Terminal host state that is not part of the desktop itself.
#[derive(Debug, Default, Clone)]
pub struct AppState {
    mode: InputMode,
    help_visible: bool,
    drag: Option<Drag>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> &InputMode {
        &self.mode
    }

    pub fn begin_url_edit(&mut self, window: WindowId, original: String) {
        self.mode = InputMode::EditingUrl { window, original };
    }

    /// Leave URL editing, returning what was being edited.
    pub fn end_url_edit(&mut self) -> Option<(WindowId, String)> {
        match std::mem::take(&mut self.mode) {
            InputMode::EditingUrl { window, original } => Some((window, original)),
            InputMode::Desktop => None,
        }
    }

    pub fn help_visible(&self) -> bool {
        self.help_visible
    }

    pub fn toggle_help_visible(&mut self) {
        self.help_visible = !self.help_visible;
    }

    pub fn drag(&self) -> Option<&Drag> {
        self.drag.as_ref()
    }

    pub fn begin_drag(&mut self, drag: Drag) {
        self.drag = Some(drag);
    }

    /// Move the drag to a new cell, returning the cell delta since the last
    /// update.
    pub fn update_drag(&mut self, column: u16, row: u16) -> Option<(i32, i32)> {
        let drag = self.drag.as_mut()?;
        let delta = (
            column as i32 - drag.column as i32,
            row as i32 - drag.row as i32,
        );
        drag.column = column;
        drag.row = row;
        Some(delta)
    }

    pub fn end_drag(&mut self) -> Option<Drag> {
        self.drag.take()
    }
}
