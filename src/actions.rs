use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    ToggleHelp,
    // Focus
    FocusNext,
    FocusPrev,
    // Window lifecycle
    NewWindow,
    CloseWindow,
    // Navigation
    EditUrl,
    GoBack,
    DismissStatus,
    // Geometry
    NudgeLeft,
    NudgeRight,
    NudgeUp,
    NudgeDown,
    LeftEdgeOut,
    LeftEdgeIn,
    RightEdgeOut,
    RightEdgeIn,
    BottomEdgeOut,
    BottomEdgeIn,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::Quit => "Quit",
            Action::ToggleHelp => "Toggle help",
            Action::FocusNext => "Focus next window",
            Action::FocusPrev => "Focus previous window",
            Action::NewWindow => "New window",
            Action::CloseWindow => "Close focused window",
            Action::EditUrl => "Edit URL bar",
            Action::GoBack => "Back",
            Action::DismissStatus => "Dismiss status message",
            Action::NudgeLeft => "Move left",
            Action::NudgeRight => "Move right",
            Action::NudgeUp => "Move up",
            Action::NudgeDown => "Move down",
            Action::LeftEdgeOut => "Widen from the left",
            Action::LeftEdgeIn => "Narrow from the left",
            Action::RightEdgeOut => "Widen from the right",
            Action::RightEdgeIn => "Narrow from the right",
            Action::BottomEdgeOut => "Grow downward",
            Action::BottomEdgeIn => "Shrink upward",
        };
        write!(f, "{}", s)
    }
}
