use std::collections::HashMap;
use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::actions::Action;

/// A key plus the exact modifier set it must be pressed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyCombo {
    pub const fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn matches(&self, key: &KeyEvent) -> bool {
        key.code == self.code && key.modifiers == self.mods
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (flag, label) in [
            (KeyModifiers::CONTROL, "Ctrl+"),
            (KeyModifiers::SHIFT, "Shift+"),
            (KeyModifiers::ALT, "Alt+"),
        ] {
            if self.mods.contains(flag) {
                f.write_str(label)?;
            }
        }
        match self.code {
            KeyCode::Char(c) => write!(f, "{}", c.to_ascii_uppercase()),
            KeyCode::F(n) => write!(f, "F{n}"),
            KeyCode::Esc => f.write_str("Esc"),
            KeyCode::Backspace => f.write_str("Backspace"),
            other => write!(f, "{other:?}"),
        }
    }
}

/// Action → key table for the terminal host.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    map: HashMap<Action, Vec<KeyCombo>>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        use Action::*;
        use KeyCode::{BackTab, Char, Down, Esc, Left, Right, Tab, Up};
        let shift = KeyModifiers::SHIFT;
        let alt = KeyModifiers::ALT;
        let table = [
            (Quit, KeyCombo::new(Char('q'), KeyModifiers::CONTROL)),
            (Quit, KeyCombo::plain(Char('q'))),
            (ToggleHelp, KeyCombo::plain(Char('?'))),
            (ToggleHelp, KeyCombo::plain(KeyCode::F(1))),
            (FocusNext, KeyCombo::plain(Tab)),
            // Shift is already folded into BackTab by the console driver.
            (FocusPrev, KeyCombo::plain(BackTab)),
            (NewWindow, KeyCombo::plain(Char('n'))),
            (CloseWindow, KeyCombo::plain(Char('w'))),
            (EditUrl, KeyCombo::plain(Char('e'))),
            (GoBack, KeyCombo::plain(Char('b'))),
            (GoBack, KeyCombo::plain(KeyCode::Backspace)),
            (DismissStatus, KeyCombo::plain(Esc)),
            (NudgeLeft, KeyCombo::plain(Left)),
            (NudgeRight, KeyCombo::plain(Right)),
            (NudgeUp, KeyCombo::plain(Up)),
            (NudgeDown, KeyCombo::plain(Down)),
            (LeftEdgeOut, KeyCombo::new(Left, alt)),
            (LeftEdgeIn, KeyCombo::new(Right, alt)),
            (RightEdgeOut, KeyCombo::new(Right, shift)),
            (RightEdgeIn, KeyCombo::new(Left, shift)),
            (BottomEdgeOut, KeyCombo::new(Down, shift)),
            (BottomEdgeIn, KeyCombo::new(Up, shift)),
        ];
        let mut kb = Self::new();
        for (action, combo) in table {
            kb.add(action, combo);
        }
        kb
    }
}

impl KeyBindings {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    pub fn add(&mut self, action: Action, combo: KeyCombo) {
        self.map.entry(action).or_default().push(combo);
    }

    pub fn matches(&self, action: Action, key: &KeyEvent) -> bool {
        self.map
            .get(&action)
            .is_some_and(|combos| combos.iter().any(|c| c.matches(key)))
    }

    pub fn action_for_key(&self, key: &KeyEvent) -> Option<Action> {
        self.map
            .iter()
            .find_map(|(action, combos)| combos.iter().any(|c| c.matches(key)).then_some(*action))
    }

    /// Help rows sorted by action label.
    pub fn help_entries(&self) -> Vec<(Action, Vec<String>)> {
        let mut rows: Vec<(Action, Vec<String>)> = self
            .map
            .keys()
            .map(|action| (*action, self.combos_for(*action)))
            .collect();
        rows.sort_by_cached_key(|(action, _)| action.to_string());
        rows
    }

    pub fn combos_for(&self, action: Action) -> Vec<String> {
        self.map
            .get(&action)
            .into_iter()
            .flatten()
            .map(KeyCombo::to_string)
            .collect()
    }
}
