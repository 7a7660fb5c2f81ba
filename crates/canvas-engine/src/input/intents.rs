use serde::{Deserialize, Serialize};

use crate::api::error::Result;

/// A held direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Left,
    Right,
    Up,
    Down,
}

/// Key codes bound to each intent. Several keys may share an intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub left: Vec<u32>,
    pub right: Vec<u32>,
    pub up: Vec<u32>,
    pub down: Vec<u32>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            left: vec!['a' as u32],
            right: vec!['d' as u32],
            up: vec!['w' as u32],
            down: vec!['s' as u32],
        }
    }
}

impl KeyBindings {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn intent_for(&self, key_code: u32) -> Option<Intent> {
        if self.left.contains(&key_code) {
            Some(Intent::Left)
        } else if self.right.contains(&key_code) {
            Some(Intent::Right)
        } else if self.up.contains(&key_code) {
            Some(Intent::Up)
        } else if self.down.contains(&key_code) {
            Some(Intent::Down)
        } else {
            None
        }
    }
}

/// Snapshot of held intents, read by controllers during the tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Intents {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl Intents {
    pub fn set(&mut self, intent: Intent, held: bool) {
        match intent {
            Intent::Left => self.left = held,
            Intent::Right => self.right = held,
            Intent::Up => self.up = held,
            Intent::Down => self.down = held,
        }
    }

    pub fn is_held(&self, intent: Intent) -> bool {
        match intent {
            Intent::Left => self.left,
            Intent::Right => self.right,
            Intent::Up => self.up,
            Intent::Down => self.down,
        }
    }
}
