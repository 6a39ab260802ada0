/// Platform-agnostic keyboard handling
use std::collections::HashSet;

/// Platform-independent input events
#[derive(Debug, Clone)]
pub enum InputEvent {
    KeyDown(String),
    KeyUp(String),

    // Window events
    FocusLost,
    VisibilityChanged { visible: bool },
}

/// Keyboard state with a previous-frame snapshot.
///
/// Keys are the browser's `KeyboardEvent.key` strings; the native backend
/// maps its key codes onto the same names so both platforms share one
/// controller path. `end_frame` must be called exactly once per frame,
/// after all gameplay reads, to roll the snapshot forward.
pub struct InputState {
    pub pressed_keys: HashSet<String>,
    previous_keys: HashSet<String>,
    pub mouse_pos: (f32, f32),
}

impl InputState {
    pub fn new() -> Self {
        Self {
            pressed_keys: HashSet::new(),
            previous_keys: HashSet::new(),
            mouse_pos: (0.0, 0.0),
        }
    }

    /// Process an input event and update state
    pub fn process_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyDown(key) => {
                self.pressed_keys.insert(key.clone());
            }
            InputEvent::KeyUp(key) => {
                self.pressed_keys.remove(key.as_str());
            }
            InputEvent::FocusLost => {
                self.clear_keys();
            }
            InputEvent::VisibilityChanged { visible: _ } => {
                self.clear_keys();
            }
        }
    }

    pub fn is_key_pressed(&self, key: &str) -> bool {
        self.pressed_keys.contains(key)
    }

    /// True only on the frame the key transitioned from released to pressed.
    pub fn is_key_just_pressed(&self, key: &str) -> bool {
        self.pressed_keys.contains(key) && !self.previous_keys.contains(key)
    }

    /// Roll the snapshot forward. Call once per frame, after all reads.
    pub fn end_frame(&mut self) {
        self.previous_keys.clone_from(&self.pressed_keys);
    }

    pub fn clear_keys(&mut self) {
        self.pressed_keys.clear();
    }
}

/// Key mapping configuration
#[derive(Clone)]
pub struct KeyBindings {
    pub left: String,
    pub right: String,
    pub jump: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            left: "ArrowLeft".to_string(),
            right: "ArrowRight".to_string(),
            jump: " ".to_string(),
        }
    }
}

/// High-level input queries over the raw key set
#[derive(Clone)]
pub struct InputProcessor {
    bindings: KeyBindings,
}

impl InputProcessor {
    pub fn new(bindings: KeyBindings) -> Self {
        Self { bindings }
    }

    pub fn default() -> Self {
        Self::new(KeyBindings::default())
    }

    pub fn is_moving_left(&self, input: &InputState) -> bool {
        input.is_key_pressed(&self.bindings.left)
            || input.is_key_pressed("a")
            || input.is_key_pressed("A")
    }

    pub fn is_moving_right(&self, input: &InputState) -> bool {
        input.is_key_pressed(&self.bindings.right)
            || input.is_key_pressed("d")
            || input.is_key_pressed("D")
    }

    pub fn is_jump_held(&self, input: &InputState) -> bool {
        input.is_key_pressed(&self.bindings.jump) || input.is_key_pressed("Space")
    }

    /// Edge-triggered jump query: fires once per press, not per frame held.
    pub fn jump_just_pressed(&self, input: &InputState) -> bool {
        input.is_key_just_pressed(&self.bindings.jump) || input.is_key_just_pressed("Space")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(input: &mut InputState, key: &str) {
        input.process_event(&InputEvent::KeyDown(key.to_string()));
    }

    fn release(input: &mut InputState, key: &str) {
        input.process_event(&InputEvent::KeyUp(key.to_string()));
    }

    #[test]
    fn test_just_pressed_only_on_transition_frame() {
        let mut input = InputState::new();

        press(&mut input, " ");
        assert!(input.is_key_just_pressed(" "));

        // Still held on the next frame: no longer "just" pressed
        input.end_frame();
        assert!(input.is_key_pressed(" "));
        assert!(!input.is_key_just_pressed(" "));
    }

    #[test]
    fn test_release_and_repress_retriggers() {
        let mut input = InputState::new();

        press(&mut input, " ");
        input.end_frame();
        release(&mut input, " ");
        input.end_frame();

        press(&mut input, " ");
        assert!(input.is_key_just_pressed(" "));
    }

    #[test]
    fn test_focus_loss_clears_keys() {
        let mut input = InputState::new();
        press(&mut input, "ArrowLeft");
        press(&mut input, " ");

        input.process_event(&InputEvent::FocusLost);
        assert!(!input.is_key_pressed("ArrowLeft"));
        assert!(!input.is_key_pressed(" "));
    }

    #[test]
    fn test_processor_accepts_wasd_alternates() {
        let mut input = InputState::new();
        let processor = InputProcessor::default();

        press(&mut input, "a");
        assert!(processor.is_moving_left(&input));
        release(&mut input, "a");

        press(&mut input, "D");
        assert!(processor.is_moving_right(&input));
    }

    #[test]
    fn test_jump_edge_via_processor() {
        let mut input = InputState::new();
        let processor = InputProcessor::default();

        press(&mut input, " ");
        assert!(processor.jump_just_pressed(&input));

        input.end_frame();
        assert!(processor.is_jump_held(&input));
        assert!(!processor.jump_just_pressed(&input));
    }
}
