//! Game action definitions

/// Everything the player can ask the game to do
///
/// Keyboard / gamepad:
/// - A, Left / stick or d-pad left = MoveLeft
/// - D, Right / stick or d-pad right = MoveRight
/// - W, Up / stick or d-pad up = LookUp
/// - S, Down / stick or d-pad down = LookDown
/// - Space / A (South) = Jump
/// - R / Start = Restart
/// - Escape / Select = Quit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    LookUp,
    LookDown,
    Jump,
    Restart,
    Quit,
}

/// Snapshot of the player's intent for one frame
///
/// Held inputs are levels; `jump`, `restart` and `quit` are edges (true
/// only on the frame they were pressed).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputFrame {
    /// -1 = left, 0 = none, 1 = right
    pub move_dir: i32,
    pub look_up: bool,
    pub look_down: bool,
    pub jump: bool,
    pub restart: bool,
    pub quit: bool,
}

impl InputFrame {
    /// Combine left/right holds into a direction; both held cancel out
    pub fn direction(left: bool, right: bool) -> i32 {
        right as i32 - left as i32
    }
}
