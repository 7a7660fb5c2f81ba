use crate::input::intents::{Intent, Intents, KeyBindings};

/// Raw key transitions from the host. Mapping to intents happens in
/// `InputQueue::poll`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown { key_code: u32 },
    KeyUp { key_code: u32 },
}

/// Buffers key events between ticks and folds them into the held-intent
/// snapshot the world reads. Events arrive at host timing; the snapshot only
/// changes when the loop polls.
pub struct InputQueue {
    bindings: KeyBindings,
    pending: Vec<InputEvent>,
    held: Intents,
}

impl InputQueue {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            pending: Vec::with_capacity(16),
            held: Intents::default(),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.pending.push(event);
    }

    pub fn key_down(&mut self, key_code: u32) {
        self.push(InputEvent::KeyDown { key_code });
    }

    pub fn key_up(&mut self, key_code: u32) {
        self.push(InputEvent::KeyUp { key_code });
    }

    /// Apply pending events in arrival order and return the snapshot.
    /// Unbound keys are dropped. Held intents persist until released.
    pub fn poll(&mut self) -> Intents {
        for event in self.pending.drain(..) {
            let (key_code, held) = match event {
                InputEvent::KeyDown { key_code } => (key_code, true),
                InputEvent::KeyUp { key_code } => (key_code, false),
            };
            if let Some(intent) = self.bindings.intent_for(key_code) {
                self.held.set(intent, held);
            }
        }
        self.held
    }

    /// Release everything, e.g. when the host surface loses focus.
    pub fn release_all(&mut self) {
        self.pending.clear();
        self.held = Intents::default();
    }

    pub fn is_held(&self, intent: Intent) -> bool {
        self.held.is_held(intent)
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new(KeyBindings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: u32 = 'a' as u32;
    const W: u32 = 'w' as u32;
    const D: u32 = 'd' as u32;

    #[test]
    fn poll_folds_press_and_release() {
        let mut q = InputQueue::default();
        q.key_down(A);
        q.key_down(W);
        q.key_up(A);
        q.key_down('q' as u32);
        assert_eq!(q.pending(), 4);

        let intents = q.poll();
        assert!(!intents.left);
        assert!(intents.up);
        assert_eq!(q.pending(), 0);
    }

    #[test]
    fn held_intent_survives_empty_poll() {
        let mut q = InputQueue::default();
        q.key_down(D);
        q.poll();
        assert!(q.poll().right, "no key-up yet, still held");
        assert!(q.is_held(Intent::Right));
    }

    #[test]
    fn snapshot_changes_only_on_poll() {
        let mut q = InputQueue::default();
        let before = q.poll();
        q.key_down(A);
        assert!(!q.is_held(Intent::Left));
        assert_ne!(q.poll(), before);
    }

    #[test]
    fn custom_bindings_are_used() {
        let bindings = KeyBindings::from_json(r#"{ "left": [37] }"#).unwrap();
        let mut q = InputQueue::new(bindings);
        q.key_down(37);
        q.key_down(A);
        assert!(q.poll().left);
        q.key_up(37);
        assert!(!q.poll().left, "'a' is no longer bound to left");
    }

    #[test]
    fn release_all_clears_state() {
        let mut q = InputQueue::default();
        q.key_down(W);
        q.poll();
        q.key_down(D);
        q.release_all();
        assert_eq!(q.poll(), Intents::default());
    }
}
