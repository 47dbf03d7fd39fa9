use std::collections::HashMap;
use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    CloseWindow,
    MinimizeWindow,
    ToggleMaximize,
    CycleNextWindow,
    CyclePrevWindow,
    ToggleStartMenu,
    ToggleMouseCapture,
    // Start menu navigation, only consulted while the menu is open
    MenuUp,
    MenuDown,
    MenuSelect,
    MenuClose,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::Quit => "Quit",
            Action::CloseWindow => "Close window",
            Action::MinimizeWindow => "Minimize window",
            Action::ToggleMaximize => "Maximize / restore window",
            Action::CycleNextWindow => "Next window",
            Action::CyclePrevWindow => "Previous window",
            Action::ToggleStartMenu => "Start menu",
            Action::ToggleMouseCapture => "Toggle mouse capture",
            Action::MenuUp => "Menu up",
            Action::MenuDown => "Menu down",
            Action::MenuSelect => "Menu select",
            Action::MenuClose => "Close menu",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyCombo {
    pub fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    pub fn matches(&self, key: &KeyEvent) -> bool {
        key.code == self.code && key.modifiers == self.mods
    }

    pub fn display(&self) -> String {
        let mut parts = Vec::new();
        if self.mods.contains(KeyModifiers::CONTROL) {
            parts.push("Ctrl".to_string());
        }
        if self.mods.contains(KeyModifiers::SHIFT) {
            parts.push("Shift".to_string());
        }
        if self.mods.contains(KeyModifiers::ALT) {
            parts.push("Alt".to_string());
        }
        parts.push(match self.code {
            KeyCode::Char(c) => c.to_ascii_uppercase().to_string(),
            KeyCode::F(n) => format!("F{n}"),
            other => format!("{other:?}"),
        });
        parts.join("+")
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// Action to key-combo table.
///
/// Global actions are checked before a key reaches the active window, so the
/// defaults all carry a modifier (or are function keys) to leave plain typing
/// to the applications.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    map: HashMap<Action, Vec<KeyCombo>>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        use Action::*;
        let alt = KeyModifiers::ALT;
        let none = KeyModifiers::NONE;
        let mut kb = Self::empty();
        kb.add(Quit, KeyCombo::new(KeyCode::Char('q'), KeyModifiers::CONTROL));
        kb.add(CloseWindow, KeyCombo::new(KeyCode::Char('w'), alt));
        kb.add(CloseWindow, KeyCombo::new(KeyCode::F(4), alt));
        kb.add(MinimizeWindow, KeyCombo::new(KeyCode::Char('m'), alt));
        kb.add(ToggleMaximize, KeyCombo::new(KeyCode::Char('x'), alt));
        kb.add(ToggleMaximize, KeyCombo::new(KeyCode::F(11), none));
        kb.add(CycleNextWindow, KeyCombo::new(KeyCode::Char('n'), alt));
        kb.add(CyclePrevWindow, KeyCombo::new(KeyCode::Char('p'), alt));
        kb.add(ToggleStartMenu, KeyCombo::new(KeyCode::Char('s'), alt));
        kb.add(ToggleStartMenu, KeyCombo::new(KeyCode::F(1), none));
        kb.add(ToggleMouseCapture, KeyCombo::new(KeyCode::F(12), none));
        kb.add(MenuUp, KeyCombo::new(KeyCode::Up, none));
        kb.add(MenuDown, KeyCombo::new(KeyCode::Down, none));
        kb.add(MenuSelect, KeyCombo::new(KeyCode::Enter, none));
        kb.add(MenuClose, KeyCombo::new(KeyCode::Esc, none));
        kb
    }
}

impl KeyBindings {
    pub fn empty() -> Self {
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
            .is_some_and(|list| list.iter().any(|c| c.matches(key)))
    }

    /// First action among `candidates` bound to `key`, in candidate order.
    pub fn first_match(&self, candidates: &[Action], key: &KeyEvent) -> Option<Action> {
        candidates.iter().copied().find(|a| self.matches(*a, key))
    }

    pub fn combos_for(&self, action: Action) -> Vec<String> {
        self.map
            .get(&action)
            .map(|list| list.iter().map(KeyCombo::display).collect())
            .unwrap_or_default()
    }
}
