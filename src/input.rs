//! Types relating to user input.

use hashbrown::HashSet;

/// Symbolic names for virtual key codes.
#[repr(u8)]
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
#[allow(missing_docs)]
pub enum KeyCode {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,

    // The digit keys above the alphabetic keys.
    Alpha0,
    Alpha1,
    Alpha2,
    Alpha3,
    Alpha4,
    Alpha5,
    Alpha6,
    Alpha7,
    Alpha8,
    Alpha9,

    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,

    Up,
    Down,
    Left,
    Right,

    LeftControl,
    LeftShift,
    LeftAlt,
    RightControl,
    RightShift,
    RightAlt,
    CapsLock,

    Space,
    Return,
    Tab,
    Backspace,
    Escape,
    Delete,
    Insert,
    Home,
    End,
    PageUp,
    PageDown,

    Minus,
    Equals,
    LeftBracket,
    RightBracket,
    Backslash,
    Semicolon,
    Quote,
    Comma,
    Period,
    Slash,
    Backquote,

    Keypad0,
    Keypad1,
    Keypad2,
    Keypad3,
    Keypad4,
    Keypad5,
    Keypad6,
    Keypad7,
    Keypad8,
    Keypad9,
    KeypadPeriod,
    KeypadDivide,
    KeypadMultiply,
    KeypadMinus,
    KeypadPlus,
    KeypadEnter,
}

/// The three tracked mouse buttons.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

impl MouseButton {
    fn index(self) -> usize {
        match self {
            MouseButton::Left => 0,
            MouseButton::Middle => 1,
            MouseButton::Right => 2,
        }
    }
}

/// The input snapshot for the current frame.
///
/// The backend feeds events in before the `update` hook runs; user code only
/// ever sees it read-only through [`Window`](crate::Window).
#[derive(Debug, Default)]
pub struct Input {
    keys_down: HashSet<KeyCode>,
    keys_pressed: HashSet<KeyCode>,
    keys_released: HashSet<KeyCode>,
    buttons: [bool; 3],
    mouse_pixel: (i32, i32),
}

impl Input {
    pub(crate) fn new() -> Input {
        Input::default()
    }

    /// Starts a new frame, forgetting this frame's presses and releases.
    pub(crate) fn update(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
    }

    pub(crate) fn press_key(&mut self, key: KeyCode) {
        if self.keys_down.insert(key) {
            self.keys_pressed.insert(key);
        }
    }

    pub(crate) fn release_key(&mut self, key: KeyCode) {
        if self.keys_down.remove(&key) {
            self.keys_released.insert(key);
        }
    }

    pub(crate) fn set_button(&mut self, button: MouseButton, down: bool) {
        self.buttons[button.index()] = down;
    }

    pub(crate) fn set_mouse_pixel(&mut self, x: i32, y: i32) {
        self.mouse_pixel = (x, y);
    }

    /// Returns the mouse position in window pixels (top-left origin).
    pub fn mouse_pixel(&self) -> (i32, i32) {
        self.mouse_pixel
    }

    /// Returns true if the specified key is currently down.
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Returns true if the specified key was pressed since the last update.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Returns true if the specified key was released since the last update.
    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.keys_released.contains(&key)
    }

    /// Returns true if the specified mouse button is held.
    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.buttons[button.index()]
    }

    /// Returns an iterator over all keys that are currently down.
    pub fn get_keys_down(&self) -> impl Iterator<Item = KeyCode> + '_ {
        self.keys_down.iter().copied()
    }

    /// Returns an iterator over all keys that were pressed since the last
    /// update.
    pub fn get_keys_pressed(&self) -> impl Iterator<Item = KeyCode> + '_ {
        self.keys_pressed.iter().copied()
    }

    /// Returns an iterator over all keys that were released since the last
    /// update.
    pub fn get_keys_released(&self) -> impl Iterator<Item = KeyCode> + '_ {
        self.keys_released.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_key_is_pressed_once() {
        let mut input = Input::new();

        input.update();
        input.press_key(KeyCode::Equals);
        assert!(input.is_key_pressed(KeyCode::Equals));
        assert!(input.is_key_down(KeyCode::Equals));

        // Still held on the next frame, no new press event.
        input.update();
        assert!(!input.is_key_pressed(KeyCode::Equals));
        assert!(input.is_key_down(KeyCode::Equals));

        input.update();
        input.release_key(KeyCode::Equals);
        assert!(input.is_key_released(KeyCode::Equals));
        assert!(!input.is_key_down(KeyCode::Equals));
    }

    #[test]
    fn repeated_press_does_not_retrigger() {
        let mut input = Input::new();
        input.press_key(KeyCode::A);
        input.update();
        input.press_key(KeyCode::A);
        assert!(!input.is_key_pressed(KeyCode::A));
        assert_eq!(input.get_keys_down().collect::<Vec<_>>(), vec![KeyCode::A]);
    }

    #[test]
    fn pressed_keys_are_listed_for_one_frame() {
        let mut input = Input::new();
        input.press_key(KeyCode::W);
        input.press_key(KeyCode::LeftShift);
        let mut pressed: Vec<_> = input.get_keys_pressed().collect();
        pressed.sort_by_key(|k| *k as u32);
        let mut expected = vec![KeyCode::W, KeyCode::LeftShift];
        expected.sort_by_key(|k| *k as u32);
        assert_eq!(pressed, expected);

        input.update();
        assert_eq!(input.get_keys_pressed().count(), 0);
        assert_eq!(input.get_keys_down().count(), 2);
    }

    #[test]
    fn release_of_unheld_key_is_ignored() {
        let mut input = Input::new();
        input.release_key(KeyCode::Space);
        assert_eq!(input.get_keys_released().count(), 0);
    }

    #[test]
    fn mouse_buttons() {
        let mut input = Input::new();
        input.set_button(MouseButton::Right, true);
        assert!(input.is_button_down(MouseButton::Right));
        assert!(!input.is_button_down(MouseButton::Left));
        input.set_button(MouseButton::Right, false);
        assert!(!input.is_button_down(MouseButton::Right));
    }
}
