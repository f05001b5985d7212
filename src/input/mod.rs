use std::collections::{HashMap, HashSet};
use std::hash::Hash;

pub use winit::event::MouseButton;
pub use winit::keyboard::KeyCode;

use crate::world::Direction;

/// Represents a raw input source that can be bound to an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    Key(KeyCode),
    Mouse(MouseButton),
}

/// Raw hardware state for a single frame.
#[derive(Debug, Default)]
pub struct InputState {
    pub keys_held: HashSet<KeyCode>,
    pub keys_pressed: HashSet<KeyCode>,

    pub mouse_held: HashSet<MouseButton>,
    pub mouse_pressed: HashSet<MouseButton>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear_frame_state(&mut self) {
        self.keys_pressed.clear();
        self.mouse_pressed.clear();
    }

    pub fn is_key_held(&self, key: KeyCode) -> bool { self.keys_held.contains(&key) }
    pub fn is_key_pressed(&self, key: KeyCode) -> bool { self.keys_pressed.contains(&key) }
    pub fn is_mouse_pressed(&self, button: MouseButton) -> bool { self.mouse_pressed.contains(&button) }

    fn source_pressed(&self, source: InputSource) -> bool {
        match source {
            InputSource::Key(k) => self.is_key_pressed(k),
            InputSource::Mouse(b) => self.is_mouse_pressed(b),
        }
    }
}

/// Maps logical actions to one or more physical inputs.
///
/// Actions are reported in the order they were first bound, so two presses
/// landing in the same frame always resolve the same way.
#[derive(Debug, Clone)]
pub struct ActionMap<A: Hash + Eq + Copy> {
    bindings: HashMap<A, Vec<InputSource>>,
    order: Vec<A>,
}

impl<A: Hash + Eq + Copy> ActionMap<A> {
    pub fn new() -> Self {
        Self { bindings: HashMap::new(), order: Vec::new() }
    }

    pub fn bind(&mut self, action: A, source: InputSource) {
        if !self.bindings.contains_key(&action) {
            self.order.push(action);
        }
        self.bindings.entry(action).or_default().push(source);
    }

    /// True if any source bound to `action` went down this frame.
    pub fn is_pressed(&self, action: A, input: &InputState) -> bool {
        self.bindings
            .get(&action)
            .is_some_and(|sources| sources.iter().any(|s| input.source_pressed(*s)))
    }

    /// Every action pressed this frame, in binding order.  Holding a key
    /// reports it once, on the frame it went down.
    pub fn triggered(&self, input: &InputState) -> Vec<A> {
        self.order.iter().copied().filter(|a| self.is_pressed(*a, input)).collect()
    }
}

impl<A: Hash + Eq + Copy> Default for ActionMap<A> {
    fn default() -> Self { Self::new() }
}

// ── Game bindings ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Move(Direction),
    Advance,
    Quit,
}

/// Arrow keys and WASD move, Space / Enter / left click advance dialogue,
/// Escape quits.
pub fn default_bindings() -> ActionMap<Action> {
    let mut map = ActionMap::new();
    let moves = [
        (Direction::Left, KeyCode::ArrowLeft, KeyCode::KeyA),
        (Direction::Right, KeyCode::ArrowRight, KeyCode::KeyD),
        (Direction::Up, KeyCode::ArrowUp, KeyCode::KeyW),
        (Direction::Down, KeyCode::ArrowDown, KeyCode::KeyS),
    ];
    for (dir, arrow, letter) in moves {
        map.bind(Action::Move(dir), InputSource::Key(arrow));
        map.bind(Action::Move(dir), InputSource::Key(letter));
    }
    map.bind(Action::Advance, InputSource::Key(KeyCode::Space));
    map.bind(Action::Advance, InputSource::Key(KeyCode::Enter));
    map.bind(Action::Advance, InputSource::Mouse(MouseButton::Left));
    map.bind(Action::Quit, InputSource::Key(KeyCode::Escape));
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(input: &mut InputState, key: KeyCode) {
        input.keys_held.insert(key);
        input.keys_pressed.insert(key);
    }

    #[test]
    fn arrows_and_wasd_share_an_action() {
        let map = default_bindings();
        let mut input = InputState::new();
        press(&mut input, KeyCode::KeyA);
        assert_eq!(map.triggered(&input), vec![Action::Move(Direction::Left)]);

        input.clear_frame_state();
        press(&mut input, KeyCode::ArrowLeft);
        assert!(map.is_pressed(Action::Move(Direction::Left), &input));
    }

    #[test]
    fn held_key_triggers_once() {
        let map = default_bindings();
        let mut input = InputState::new();
        press(&mut input, KeyCode::ArrowRight);
        assert_eq!(map.triggered(&input).len(), 1);

        input.clear_frame_state();
        assert!(input.is_key_held(KeyCode::ArrowRight));
        assert!(map.triggered(&input).is_empty());
    }

    #[test]
    fn click_advances() {
        let map = default_bindings();
        let mut input = InputState::new();
        input.mouse_held.insert(MouseButton::Left);
        input.mouse_pressed.insert(MouseButton::Left);
        assert_eq!(map.triggered(&input), vec![Action::Advance]);
    }

    #[test]
    fn simultaneous_presses_follow_binding_order() {
        let map = default_bindings();
        let mut input = InputState::new();
        press(&mut input, KeyCode::Escape);
        press(&mut input, KeyCode::Space);
        press(&mut input, KeyCode::ArrowUp);
        assert_eq!(
            map.triggered(&input),
            vec![Action::Move(Direction::Up), Action::Advance, Action::Quit]
        );
    }

    #[test]
    fn unbound_action_is_never_pressed() {
        let map: ActionMap<Action> = ActionMap::new();
        let mut input = InputState::new();
        press(&mut input, KeyCode::Space);
        assert!(!map.is_pressed(Action::Advance, &input));
    }
}
