//! Device key events and their mapping onto editor commands.

use crate::editor::EditorCommand;

/// Physical keys of the handheld's five-way pad plus Back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKey {
    Up,
    Down,
    Left,
    Right,
    Ok,
    Back,
}

/// Phase of a key event as reported by the input source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputType {
    Press,
    Release,
    Short,
    Long,
    Repeat,
}

/// A single key event from the input source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    pub key: InputKey,
    pub kind: InputType,
}

impl InputEvent {
    pub fn new(key: InputKey, kind: InputType) -> Self {
        Self { key, kind }
    }

    /// Shorthand for the `Press` event of `key`.
    pub fn press(key: InputKey) -> Self {
        Self::new(key, InputType::Press)
    }
}

/// What a key asks the application to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Edit(EditorCommand),
    /// Leave the editor loop. Not an editor operation.
    Exit,
}

impl InputKey {
    pub fn action(self) -> KeyAction {
        match self {
            InputKey::Up => KeyAction::Edit(EditorCommand::Increment),
            InputKey::Down => KeyAction::Edit(EditorCommand::Decrement),
            InputKey::Right => KeyAction::Edit(EditorCommand::CursorRight),
            InputKey::Left => KeyAction::Edit(EditorCommand::CursorLeft),
            InputKey::Ok => KeyAction::Edit(EditorCommand::ToggleActive),
            InputKey::Back => KeyAction::Exit,
        }
    }
}

impl InputEvent {
    /// Action for this event, or `None` for anything but a press.
    pub fn action(&self) -> Option<KeyAction> {
        match self.kind {
            InputType::Press => Some(self.key.action()),
            InputType::Release | InputType::Short | InputType::Long | InputType::Repeat => None,
        }
    }
}
