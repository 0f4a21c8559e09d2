//! Field editor state machine for the credential code.
//!
//! [`FieldEditor`] owns the code being edited, the cursor, and the emulation
//! state. Two orthogonal machines live here:
//!
//! - the `(cursor, digits)` pair, a bounded counter array mutated by the four
//!   edit operations, with no terminal state;
//! - [`EmulationState`], toggled between `Idle` and `Transmitting`. Entering
//!   `Transmitting` sends [`IndicatorCommand::Start`] and leaving it sends
//!   [`IndicatorCommand::Stop`].
//!
//! Dropping an editor that is still transmitting sends exactly one `Stop`, so
//! the indicator can never be left running after teardown.

use log::debug;

use crate::code::{CODE_LEN, CardCode, DigitIndex};
use crate::indicator::{IndicatorCommand, IndicatorSink};

/// Whether the (placeholder) transmission is running.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum EmulationState {
    #[default]
    Idle,
    Transmitting,
}

impl EmulationState {
    pub fn is_active(self) -> bool {
        matches!(self, EmulationState::Transmitting)
    }

    fn toggled(self) -> Self {
        match self {
            EmulationState::Idle => EmulationState::Transmitting,
            EmulationState::Transmitting => EmulationState::Idle,
        }
    }

    /// Action attached to entering this state.
    fn entry_action(self) -> IndicatorCommand {
        match self {
            EmulationState::Idle => IndicatorCommand::Stop,
            EmulationState::Transmitting => IndicatorCommand::Start,
        }
    }
}

/// The mutating operations of the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorCommand {
    Increment,
    Decrement,
    CursorRight,
    CursorLeft,
    ToggleActive,
}

/// Read-only view of the editor handed to the display surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    /// One uppercase hex character per digit, left to right.
    pub digits: [char; CODE_LEN],
    pub cursor: usize,
    pub active: bool,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            digits: CardCode::zeroed().to_hex_chars(),
            cursor: DigitIndex::FIRST.get(),
            active: false,
        }
    }
}

/// Credential code editor driving an indicator sink `S`.
pub struct FieldEditor<S: IndicatorSink> {
    code: CardCode,
    cursor: DigitIndex,
    state: EmulationState,
    indicator: S,
}

impl<S: IndicatorSink> FieldEditor<S> {
    /// All digits zero, cursor on the first digit, idle.
    pub fn new(indicator: S) -> Self {
        Self {
            code: CardCode::zeroed(),
            cursor: DigitIndex::FIRST,
            state: EmulationState::Idle,
            indicator,
        }
    }

    pub fn code(&self) -> &CardCode {
        &self.code
    }

    pub fn cursor(&self) -> DigitIndex {
        self.cursor
    }

    pub fn state(&self) -> EmulationState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    pub fn indicator(&self) -> &S {
        &self.indicator
    }

    pub fn indicator_mut(&mut self) -> &mut S {
        &mut self.indicator
    }

    pub fn increment_at_cursor(&mut self) {
        let digit = &mut self.code[self.cursor];
        *digit = digit.wrapping_inc();
    }

    pub fn decrement_at_cursor(&mut self) {
        let digit = &mut self.code[self.cursor];
        *digit = digit.wrapping_dec();
    }

    pub fn move_cursor_right(&mut self) {
        self.cursor = self.cursor.next();
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.prev();
    }

    pub fn toggle_active(&mut self) {
        self.state = self.state.toggled();
        debug!("Emulation {:?} with code {}", self.state, self.code);
        self.indicator.send(self.state.entry_action());
    }

    /// Apply one editor command.
    pub fn apply(&mut self, command: EditorCommand) {
        match command {
            EditorCommand::Increment => self.increment_at_cursor(),
            EditorCommand::Decrement => self.decrement_at_cursor(),
            EditorCommand::CursorRight => self.move_cursor_right(),
            EditorCommand::CursorLeft => self.move_cursor_left(),
            EditorCommand::ToggleActive => self.toggle_active(),
        }
    }

    pub fn render_snapshot(&self) -> Snapshot {
        Snapshot {
            digits: self.code.to_hex_chars(),
            cursor: self.cursor.get(),
            active: self.state.is_active(),
        }
    }
}

impl<S: IndicatorSink> Drop for FieldEditor<S> {
    fn drop(&mut self) {
        if self.state.is_active() {
            debug!("Stopping indicator on teardown");
            self.state = EmulationState::Idle;
            self.indicator.send(IndicatorCommand::Stop);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::Nibble;
    use crate::indicator::RecordingSink;

    /// Editor with the digit under the cursor set to `value`.
    fn editor_at(sink: &mut RecordingSink, value: u8) -> FieldEditor<&mut RecordingSink> {
        let mut editor = FieldEditor::new(sink);
        for _ in 0..value {
            editor.increment_at_cursor();
        }
        editor
    }

    fn digit_under_cursor<S: IndicatorSink>(editor: &FieldEditor<S>) -> u8 {
        editor.code()[editor.cursor()].value()
    }

    #[test]
    fn test_initial_state() {
        let mut sink = RecordingSink::default();
        let editor = FieldEditor::new(&mut sink);
        assert_eq!(*editor.code(), CardCode::zeroed());
        assert_eq!(editor.cursor(), DigitIndex::FIRST);
        assert_eq!(editor.state(), EmulationState::Idle);
        drop(editor);
        assert!(sink.commands.is_empty());
    }

    #[test]
    fn test_increment_wraps_for_every_value() {
        for v in 0..=0xF {
            let mut sink = RecordingSink::default();
            let mut editor = editor_at(&mut sink, v);
            editor.increment_at_cursor();
            let expected = if v == 0xF { 0 } else { v + 1 };
            assert_eq!(digit_under_cursor(&editor), expected, "increment from {v}");
        }
    }

    #[test]
    fn test_decrement_wraps_for_every_value() {
        for v in 0..=0xF {
            let mut sink = RecordingSink::default();
            let mut editor = editor_at(&mut sink, v);
            editor.decrement_at_cursor();
            let expected = if v == 0 { 0xF } else { v - 1 };
            assert_eq!(digit_under_cursor(&editor), expected, "decrement from {v}");
        }
    }

    #[test]
    fn test_increment_decrement_round_trip() {
        for v in 0..=0xF {
            let mut sink = RecordingSink::default();
            let mut editor = editor_at(&mut sink, v);
            editor.increment_at_cursor();
            editor.decrement_at_cursor();
            assert_eq!(digit_under_cursor(&editor), v);
            editor.decrement_at_cursor();
            editor.increment_at_cursor();
            assert_eq!(digit_under_cursor(&editor), v);
        }
    }

    #[test]
    fn test_cursor_moves_and_wraps() {
        let mut sink = RecordingSink::default();
        let mut editor = FieldEditor::new(&mut sink);

        for expected in 1..CODE_LEN {
            editor.move_cursor_right();
            assert_eq!(editor.cursor().get(), expected);
        }
        editor.move_cursor_right();
        assert_eq!(editor.cursor(), DigitIndex::FIRST);

        editor.move_cursor_left();
        assert_eq!(editor.cursor(), DigitIndex::LAST);
        for expected in (0..CODE_LEN - 1).rev() {
            editor.move_cursor_left();
            assert_eq!(editor.cursor().get(), expected);
        }
    }

    #[test]
    fn test_edits_only_touch_digit_under_cursor() {
        let mut sink = RecordingSink::default();
        let mut editor = FieldEditor::new(&mut sink);
        editor.move_cursor_right();
        editor.move_cursor_right();
        editor.decrement_at_cursor();
        assert_eq!(editor.code().to_hex_chars(), ['0', '0', 'F', '0', '0', '0']);
    }

    #[test]
    fn test_double_toggle_emits_start_then_stop() {
        let mut sink = RecordingSink::default();
        let mut editor = FieldEditor::new(&mut sink);
        editor.toggle_active();
        assert!(editor.is_active());
        editor.toggle_active();
        assert!(!editor.is_active());
        drop(editor);
        assert_eq!(
            sink.commands,
            [IndicatorCommand::Start, IndicatorCommand::Stop]
        );
    }

    #[test]
    fn test_teardown_while_active_stops_once() {
        let mut sink = RecordingSink::default();
        let mut editor = FieldEditor::new(&mut sink);
        editor.toggle_active();
        drop(editor);
        assert_eq!(
            sink.commands,
            [IndicatorCommand::Start, IndicatorCommand::Stop]
        );
    }

    #[test]
    fn test_snapshot_is_six_hex_chars() {
        let mut sink = RecordingSink::default();
        let mut editor = FieldEditor::new(&mut sink);
        for index in DigitIndex::all() {
            for value in 0..=0xF {
                let snapshot = editor.render_snapshot();
                assert_eq!(snapshot.digits.len(), CODE_LEN);
                assert!(
                    snapshot
                        .digits
                        .iter()
                        .all(|c| "0123456789ABCDEF".contains(*c))
                );
                assert_eq!(
                    snapshot.digits[index.get()],
                    Nibble::new(value).unwrap().to_hex_char()
                );
                editor.increment_at_cursor();
            }
            // Leave a distinct value behind so later positions see mixed digits.
            for _ in 0..index.get() * 3 {
                editor.decrement_at_cursor();
            }
            editor.move_cursor_right();
        }
        assert_eq!(editor.render_snapshot().digits, ['0', 'D', 'A', '7', '4', '1']);
    }

    #[test]
    fn test_apply_dispatches_commands() {
        let mut sink = RecordingSink::default();
        let mut editor = FieldEditor::new(&mut sink);
        editor.apply(EditorCommand::Decrement);
        editor.apply(EditorCommand::CursorLeft);
        editor.apply(EditorCommand::Increment);
        editor.apply(EditorCommand::CursorRight);
        editor.apply(EditorCommand::ToggleActive);

        assert_eq!(editor.code()[DigitIndex::FIRST], Nibble::MAX);
        assert_eq!(editor.code()[DigitIndex::LAST], Nibble::new(1).unwrap());
        assert_eq!(editor.cursor(), DigitIndex::FIRST);
        assert!(editor.render_snapshot().active);
    }
}
