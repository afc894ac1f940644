//! Key events and the bindings that turn them into navigation inputs.

use std::collections::HashMap;

use crate::navigate::NavInput;

/// Modifier keys held during a key press.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    /// Control key held
    pub ctrl: bool,
    /// Shift key held
    pub shift: bool,
    /// Alt key held
    pub alt: bool,
    /// Super/Command key held
    pub meta: bool,
}

impl Modifiers {
    /// No modifiers
    pub const NONE: Self = Self {
        ctrl: false,
        shift: false,
        alt: false,
        meta: false,
    };
}

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Character key
    Char(char),
    Enter,
    Escape,
    Backspace,
    Tab,
    Space,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
}

/// A key combination (key + modifiers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyCombo {
    pub const fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// Create a key combo without modifiers
    pub const fn key(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    /// Add ctrl modifier
    pub const fn ctrl(mut self) -> Self {
        self.modifiers.ctrl = true;
        self
    }

    /// Add meta modifier
    pub const fn meta(mut self) -> Self {
        self.modifiers.meta = true;
        self
    }
}

/// Lookup table from key combos to navigation inputs.
#[derive(Debug, Clone, Default)]
pub struct Keybinds {
    binds: HashMap<KeyCombo, NavInput>,
}

impl Keybinds {
    /// Create empty keybinds
    pub fn new() -> Self {
        Self::default()
    }

    /// Arrow keys, Home/End, vi-style `hjkl`, and Ctrl+C / Cmd+C to copy.
    pub fn navigation() -> Self {
        let mut binds = Self::new();
        for (key, input) in [
            (Key::Up, NavInput::Previous),
            (Key::Char('k'), NavInput::Previous),
            (Key::Down, NavInput::Next),
            (Key::Char('j'), NavInput::Next),
            (Key::Left, NavInput::CollapseOrParent),
            (Key::Char('h'), NavInput::CollapseOrParent),
            (Key::Right, NavInput::ExpandOrChild),
            (Key::Char('l'), NavInput::ExpandOrChild),
            (Key::Home, NavInput::First),
            (Key::End, NavInput::Last),
        ] {
            binds.bind(KeyCombo::key(key), input);
        }
        binds.bind(KeyCombo::key(Key::Char('c')).ctrl(), NavInput::Copy);
        binds.bind(KeyCombo::key(Key::Char('c')).meta(), NavInput::Copy);
        binds
    }

    /// Add or replace a binding
    pub fn bind(&mut self, key: KeyCombo, input: NavInput) {
        self.binds.insert(key, input);
    }

    /// Look up the input bound to a key combo.
    ///
    /// Falls back to the unshifted binding for character keys.
    pub fn get(&self, key: &KeyCombo) -> Option<NavInput> {
        if let Some(input) = self.binds.get(key) {
            return Some(*input);
        }
        match key.key {
            Key::Char(c) if key.modifiers.shift => {
                let mut unshifted = *key;
                unshifted.key = Key::Char(c.to_ascii_lowercase());
                unshifted.modifiers.shift = false;
                self.binds.get(&unshifted).copied()
            }
            _ => None,
        }
    }
}
