//! Held-key state fed by keydown / keyup listeners.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl InputState {
    /// Update from a `KeyboardEvent`. Both `code` and `key` are accepted so
    /// callers can pass whichever is populated; space only reliably shows up
    /// in `code`.
    ///
    /// Returns true if the key is one of ours (the caller should then
    /// `prevent_default` so the page does not scroll).
    pub fn apply_key(&mut self, key: &str, pressed: bool) -> bool {
        match key {
            "ArrowLeft" | "KeyA" | "a" | "A" => self.left = pressed,
            "ArrowRight" | "KeyD" | "d" | "D" => self.right = pressed,
            "Space" | " " | "ArrowUp" | "KeyW" | "w" | "W" => self.jump = pressed,
            _ => return false,
        }
        true
    }

    /// Drop everything held, e.g. when the window loses focus and keyup
    /// events will never arrive.
    pub fn release_all(&mut self) {
        *self = Self::default();
    }

    /// -1 for left, 1 for right, 0 for neither. Left wins when both are held.
    pub fn horizontal(&self) -> i8 {
        if self.left {
            -1
        } else if self.right {
            1
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_keys_and_space() {
        let mut input = InputState::default();
        assert!(input.apply_key("ArrowLeft", true));
        assert!(input.apply_key("Space", true));
        assert_eq!(input, InputState { left: true, right: false, jump: true });
        assert!(input.apply_key("ArrowLeft", false));
        assert!(!input.left);
        assert!(input.jump);
    }

    #[test]
    fn test_unrelated_key_not_consumed() {
        let mut input = InputState::default();
        assert!(!input.apply_key("Enter", true));
        assert!(!input.apply_key("F5", true));
        assert_eq!(input, InputState::default());
    }

    #[test]
    fn test_left_wins_over_right() {
        let mut input = InputState::default();
        input.apply_key("KeyD", true);
        assert_eq!(input.horizontal(), 1);
        input.apply_key("KeyA", true);
        assert_eq!(input.horizontal(), -1);
        input.release_all();
        assert_eq!(input.horizontal(), 0);
    }
}
