use retro_cockpit::window::KeyCode;
use crate::constants::WHEEL_NOTCH_DELTA;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Launch,
    Reset,
    ToggleFullscreen,
    ToggleHud,
    Scan
}

/// While the launch prompt is up only the confirm keys do anything.
pub fn command_for_key(key_code: KeyCode, awaiting_launch: bool) -> Option<Command> {
    if awaiting_launch {
        return match key_code {
            KeyCode::Y | KeyCode::Enter | KeyCode::KpEnter => Some(Command::Launch),
            _ => None
        };
    }
    match key_code {
        KeyCode::R => Some(Command::Reset),
        KeyCode::F | KeyCode::F11 => Some(Command::ToggleFullscreen),
        KeyCode::I => Some(Command::ToggleHud),
        KeyCode::S => Some(Command::Scan),
        _ => None
    }
}

/// Converts a wheel event in notches (up is positive) into a page-style scroll delta.
pub fn wheel_delta(dy: f32) -> f32 {
    -dy * WHEEL_NOTCH_DELTA
}
